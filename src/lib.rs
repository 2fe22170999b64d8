//! # Slackpack
//!
//! A Rust library (and two small binaries) for exporting every public
//! conversation of a Slack workspace into one CSV table, and for turning that
//! table into a set of descriptive charts.
//!
//! ## Overview
//!
//! Slackpack has two independent pipelines that share one file format:
//! - **Export** - walks `conversations.list`, joins public channels, drains
//!   each channel's history and thread replies, resolves authors and writes
//!   `timestamp,channel,username,location,message` rows
//! - **Stats** - reads that table back and charts user and channel activity,
//!   hourly activity, per-channel sentiment and top keywords
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use slackpack::api::WebClient;
//! use slackpack::config::{ExportConfig, StatsConfig};
//! use slackpack::export::run_export;
//! use slackpack::stats::generate_charts;
//!
//! fn main() -> slackpack::Result<()> {
//!     let config = ExportConfig::from_env()?;
//!     let stats = run_export(WebClient::from_config(&config)?, &config)?;
//!     println!("{} rows exported", stats.rows);
//!
//!     let report = generate_charts(&StatsConfig::new())?;
//!     println!("{} active channels", report.channels.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Testing Without Slack
//!
//! The export pipeline only talks to Slack through the [`api::SlackApi`]
//! trait, so a scripted implementation can stand in for the Web API:
//!
//! ```rust
//! use slackpack::api::{Page, SlackApi};
//! use slackpack::export::Exporter;
//! use slackpack::prelude::*;
//!
//! struct OneChannel;
//!
//! impl SlackApi for OneChannel {
//!     fn list_channels(&self, _: Option<&str>) -> Result<Page<Channel>> {
//!         Ok(Page::last(vec![Channel::new("C1", "general").with_member(true)]))
//!     }
//!     fn join_channel(&self, _: &str) -> Result<()> {
//!         Ok(())
//!     }
//!     fn history(&self, _: &str, _: Option<&str>) -> Result<Page<Message>> {
//!         Ok(Page::last(vec![Message::new("1700000000.000100", "hi").with_user("U1")]))
//!     }
//!     fn replies(&self, _: &str, _: &str, _: Option<&str>) -> Result<Page<Message>> {
//!         Ok(Page::last(Vec::new()))
//!     }
//!     fn user_name(&self, _: &str) -> Result<String> {
//!         Ok("alice".to_string())
//!     }
//! }
//!
//! let export = Exporter::new(OneChannel).export()?;
//! assert_eq!(export.rows.len(), 1);
//! assert_eq!(export.rows[0].username, "alice");
//! # Ok::<(), SlackpackError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`config`] - [`ExportConfig`](config::ExportConfig), [`StatsConfig`](config::StatsConfig)
//! - [`core`] - the export table: [`ExportRow`], CSV writer and reader
//! - [`message`] - Slack [`Channel`] and [`Message`] records
//! - [`retry`] - [`RetryPolicy`](retry::RetryPolicy) with exponential backoff
//! - [`progress`] - per-channel progress reporting
//! - `api` - [`SlackApi`](api::SlackApi) trait and the Web API client (feature `export`)
//! - `export` - the export pipeline (feature `export`)
//! - `stats` - aggregates, sentiment, keywords and charts (feature `stats`)
//! - `cli` - command-line arguments for the binaries (feature `cli`)
//! - [`error`] - [`SlackpackError`], [`Result`]
//! - [`prelude`] - Convenient re-exports
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `export` | Web API client and export pipeline (`reqwest`, `serde_json`) |
//! | `stats` | Statistics and charts (`plotters`, `regex`, `vader_sentiment`) |
//! | `cli` | The `slack-export` / `slack-stats` binaries (`clap`, `tracing-subscriber`) |
//! | `full` | All of the above (default) |

#[cfg(feature = "export")]
pub mod api;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
#[cfg(feature = "export")]
pub mod export;
pub mod message;
pub mod progress;
pub mod retry;
#[cfg(feature = "stats")]
pub mod stats;

// Re-export the main types at the crate root for convenience
pub use crate::core::models::ExportRow;
pub use error::{Result, SlackpackError};
pub use message::{Channel, Message};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use slackpack::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Result, SlackpackError};
    pub use crate::message::{Channel, Message};

    pub use crate::config::{ExportConfig, StatsConfig};
    pub use crate::core::models::{ExportRow, Location, OutputConfig};
    pub use crate::core::output::{to_csv, write_csv};
    pub use crate::core::reader::read_csv;
    pub use crate::progress::{Progress, ProgressCallback};
    pub use crate::retry::RetryPolicy;

    #[cfg(feature = "export")]
    pub use crate::api::{SlackApi, WebClient};
    #[cfg(feature = "export")]
    pub use crate::export::{Exporter, run_export};

    #[cfg(feature = "stats")]
    pub use crate::stats::{SentimentScorer, StatsReport, VaderScorer, generate_charts};
}
