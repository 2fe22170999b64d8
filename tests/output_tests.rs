//! Tests for the export table on disk and the stats pipeline reading it.

use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use slackpack::config::StatsConfig;
use slackpack::core::models::Location;
use slackpack::prelude::*;
use slackpack::stats::{StatsReport, generate_charts_with};
use tempfile::tempdir;

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 2, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn sample_rows() -> Vec<ExportRow> {
    vec![
        ExportRow::new(at(1, 9, 0), "general", "alice", "Deploy went out, looks good"),
        ExportRow::new(at(1, 9, 5), "general", "bob", "Line one\nline two")
            .with_location(Location::Thread),
        ExportRow::new(at(1, 14, 30), "random", "carol", "\"quoted\" and, commas"),
        ExportRow::new(at(2, 23, 59), "random", "ünïcödé", "Привет 👋"),
    ]
}

// ============================================================================
// CSV table
// ============================================================================

#[test]
fn test_csv_round_trip_preserves_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("table.csv");
    let rows = sample_rows();

    write_csv(&rows, &path, &OutputConfig::new()).unwrap();
    let back = read_csv(&path).unwrap();

    assert_eq!(back, rows);
}

#[test]
fn test_csv_round_trip_without_location() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("legacy.csv");

    write_csv(&sample_rows(), &path, &OutputConfig::new().without_location()).unwrap();
    let back = read_csv(&path).unwrap();

    assert_eq!(back.len(), 4);
    assert!(back.iter().all(|r| r.location == Location::Main));
    assert_eq!(back[1].message, "Line one\nline two");
}

#[test]
fn test_empty_table_has_header_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.csv");

    write_csv(&[], &path, &OutputConfig::new()).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "timestamp,channel,username,location,message\n"
    );
    assert!(read_csv(&path).unwrap().is_empty());
}

#[test]
fn test_read_missing_file() {
    let dir = tempdir().unwrap();
    let err = read_csv(dir.path().join("nope.csv")).unwrap_err();
    assert!(err.is_io());
}

#[test]
fn test_read_missing_column_names_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "timestamp,channel,message\n2024-01-01 00:00:00,general,hi\n").unwrap();

    let err = read_csv(&path).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("username"), "{text}");
    assert!(text.contains("bad.csv"), "{text}");
}

#[test]
fn test_read_bad_timestamp_reports_line() {
    let data = "timestamp,channel,username,message\n\
                2024-01-01 00:00:00,general,alice,ok\n\
                yesterday,general,bob,broken\n";
    let err = slackpack::core::reader::from_csv_reader(data.as_bytes()).unwrap_err();

    assert!(err.is_invalid_timestamp());
    assert!(err.to_string().contains("line 3"), "{err}");
}

// ============================================================================
// Stats from a table on disk
// ============================================================================

#[test]
fn test_generate_charts_from_table() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("table.csv");
    let output = dir.path().join("charts.html");

    let mut rows = Vec::new();
    for i in 0..12 {
        let user = ["alice", "bob", "carol"][i % 3];
        rows.push(ExportRow::new(at(3, 10, i as u32), "general", user, "standup notes posted"));
    }
    rows.push(ExportRow::new(at(3, 18, 0), "offtopic", "dave", "pizza tonight"));
    write_csv(&rows, &input, &OutputConfig::new()).unwrap();

    let config = StatsConfig::new().with_input(&input).with_output(&output);
    let report = generate_charts_with(&config, &|_: &str| 0.1).unwrap();

    assert_eq!(report.total_messages, 13);
    assert_eq!(report.channels, vec![("general".to_string(), 12)]);
    assert_eq!(report.users.len(), 0);
    assert_eq!(report.hourly[10], 12);
    assert_eq!(report.hourly[18], 1);
    assert_eq!(report.sentiment.len(), 1);
    assert_eq!(report.keywords.len(), 5);

    let html = fs::read_to_string(&output).unwrap();
    for title in [
        "Most Active Users",
        "Most Active Channels",
        "Peak Activity Times",
        "Message Sentiment by Channel",
        "Top Keywords",
    ] {
        assert!(html.contains(title), "missing chart {title}");
    }
}

#[test]
fn test_empty_table_still_renders_every_chart() {
    let report = StatsReport::compute(&[], &StatsConfig::new(), &|_: &str| 0.0);
    assert_eq!(report.total_messages, 0);
    assert_eq!(report.hourly, [0; 24]);

    let html = slackpack::stats::render_html(&report).unwrap();
    assert_eq!(html.matches("<svg").count(), 5);
}
