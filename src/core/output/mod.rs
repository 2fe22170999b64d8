//! Output writers.
//!
//! - [`write_csv`] / [`to_csv`] - the flat export table
//!
//! # Example
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use slackpack::core::models::{ExportRow, OutputConfig};
//! use slackpack::core::output::write_csv;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(10, 30, 0).unwrap();
//! let rows = vec![
//!     ExportRow::new(ts, "general", "alice", "Hello!"),
//!     ExportRow::new(ts, "general", "bob", "Hi there!"),
//! ];
//!
//! write_csv(&rows, "all_channel_conversations.csv", &OutputConfig::new())?;
//! # Ok::<(), slackpack::SlackpackError>(())
//! ```

mod csv_writer;

pub use csv_writer::{to_csv, write_csv};
