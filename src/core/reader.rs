//! CSV reader for the export table.
//!
//! Accepts both table layouts the exporter has produced:
//!
//! | Layout | Header |
//! |--------|--------|
//! | current | `timestamp,channel,username,location,message` |
//! | legacy | `timestamp,channel,username,message` |
//!
//! Rows without a `location` column are treated as [`Location::Main`].
//! Timestamps are read with [`TIMESTAMP_FORMAT`]; raw Slack timestamps
//! (`1700000000.000100`) are accepted as well and converted to local time.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{Local, NaiveDateTime, Timelike};
use serde::Deserialize;

use crate::core::models::{ExportRow, Location, TIMESTAMP_FORMAT};
use crate::error::{Result, SlackpackError};
use crate::message::parse_slack_ts;

const REQUIRED_COLUMNS: [&str; 4] = ["timestamp", "channel", "username", "message"];

#[derive(Debug, Deserialize)]
struct CsvRow {
    timestamp: String,
    channel: String,
    username: String,
    #[serde(default)]
    location: Option<String>,
    message: String,
}

/// Reads an export table from disk.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Vec<ExportRow>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    from_csv_reader(file).map_err(|e| e.with_path(path))
}

/// Reads an export table from any reader.
///
/// # Example
///
/// ```rust
/// use slackpack::core::reader::from_csv_reader;
/// use slackpack::core::models::Location;
///
/// let data = "timestamp,channel,username,message\n2024-06-15 12:30:00,general,alice,Hello\n";
/// let rows = from_csv_reader(data.as_bytes())?;
///
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].location, Location::Main);
/// # Ok::<(), slackpack::SlackpackError>(())
/// ```
pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<ExportRow>> {
    let mut reader = csv::ReaderBuilder::new().flexible(false).from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(SlackpackError::invalid_format(
                "CSV",
                format!("missing column '{}'", column),
            ));
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line());
        let raw: CsvRow = record.deserialize(Some(&headers))?;

        let timestamp = parse_table_timestamp(&raw.timestamp)
            .ok_or_else(|| SlackpackError::invalid_timestamp(&raw.timestamp, line))?;
        let location = match raw.location.as_deref() {
            Some(tag) => tag.parse::<Location>()?,
            None => Location::Main,
        };

        rows.push(ExportRow {
            timestamp,
            channel: raw.channel,
            username: raw.username,
            location,
            message: raw.message,
        });
    }

    Ok(rows)
}

fn parse_table_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(ts) = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT) {
        return Some(ts);
    }
    parse_slack_ts(value)
        .ok()
        .and_then(|dt| dt.with_timezone(&Local).naive_local().with_nanosecond(0))
}
