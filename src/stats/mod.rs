//! Descriptive statistics over the export table.
//!
//! - [`aggregates`] - activity counts, hourly histogram, channel sentiment
//! - [`keywords`] - tokenizer, stop-words, [`top_keywords`]
//! - [`sentiment`] - [`SentimentScorer`] and [`VaderScorer`]
//! - [`chart`] - [`BarChart`] rendered to SVG
//! - [`report`] - [`StatsReport`] and the chart document
//!
//! # Example
//!
//! ```rust,no_run
//! use slackpack::config::StatsConfig;
//! use slackpack::stats::generate_charts;
//!
//! let report = generate_charts(&StatsConfig::new())?;
//! println!("{} users above threshold", report.users.len());
//! # Ok::<(), slackpack::SlackpackError>(())
//! ```

pub mod aggregates;
pub mod chart;
pub mod keywords;
pub mod report;
pub mod sentiment;

pub use aggregates::{
    channel_sentiment, count_by, hourly_activity, most_active_channels, most_active_users,
    peak_hours,
};
pub use chart::BarChart;
pub use keywords::top_keywords;
pub use report::{StatsReport, generate_charts, generate_charts_with, render_html, write_report};
pub use sentiment::{SentimentScorer, VaderScorer};
