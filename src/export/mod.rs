//! Slack workspace export.
//!
//! - [`pagination`] - [`drain`] cursor-paginated listings
//! - [`threads`] - [`splice_replies`] and [`sort_newest_first`]
//! - [`exporter`] - [`Exporter`], the pipeline tying API calls together
//!
//! # Example
//!
//! ```rust,no_run
//! use slackpack::api::WebClient;
//! use slackpack::config::ExportConfig;
//! use slackpack::export::run_export;
//!
//! let config = ExportConfig::from_env()?;
//! let client = WebClient::from_config(&config)?;
//! let stats = run_export(&client, &config)?;
//! println!("{} rows written", stats.rows);
//! # Ok::<(), slackpack::SlackpackError>(())
//! ```

pub mod exporter;
pub mod pagination;
pub mod threads;

pub use exporter::{Export, ExportStats, Exporter, UNKNOWN_USER, resolve_username, run_export};
pub use pagination::{Drained, drain};
pub use threads::{sort_newest_first, splice_replies};
