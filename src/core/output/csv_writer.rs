//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::models::{ExportRow, OutputConfig};
use crate::error::{Result, SlackpackError};

/// Writes export rows to a CSV file.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: Depends on OutputConfig
///   - Default: `timestamp`, `channel`, `username`, `location`, `message`
///   - Without location: `timestamp`, `channel`, `username`, `message`
/// - Timestamps: local time, `%Y-%m-%d %H:%M:%S`
/// - Encoding: UTF-8
pub fn write_csv(rows: &[ExportRow], output_path: impl AsRef<Path>, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_rows(rows, file, config)
}

/// Converts export rows to a CSV string.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use slackpack::core::models::{ExportRow, OutputConfig};
/// use slackpack::core::output::to_csv;
///
/// let ts = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap().and_hms_opt(12, 30, 0).unwrap();
/// let rows = vec![ExportRow::new(ts, "general", "alice", "Hello")];
///
/// let csv = to_csv(&rows, &OutputConfig::new())?;
/// assert!(csv.starts_with("timestamp,channel,username,location,message\n"));
/// assert!(csv.contains("2024-06-15 12:30:00,general,alice,main,Hello"));
/// # Ok::<(), slackpack::SlackpackError>(())
/// ```
pub fn to_csv(rows: &[ExportRow], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_rows(rows, &mut buffer, config)?;
    String::from_utf8(buffer)
        .map_err(|e| SlackpackError::invalid_format("CSV", format!("non UTF-8 output: {}", e)))
}

fn write_rows<W: Write>(rows: &[ExportRow], sink: W, config: &OutputConfig) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);

    writer.write_record(build_header(config))?;

    for row in rows {
        writer.write_record(build_record(row, config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = vec!["timestamp", "channel", "username"];
    if config.include_location {
        header.push("location");
    }
    header.push("message");
    header
}

/// Build CSV record for a single row.
fn build_record(row: &ExportRow, config: &OutputConfig) -> Vec<String> {
    let mut record = vec![
        row.formatted_timestamp(),
        row.channel.clone(),
        row.username.clone(),
    ];
    if config.include_location {
        record.push(row.location.to_string());
    }
    record.push(row.message.clone());
    record
}
