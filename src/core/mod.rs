//! Core table types shared by both pipelines.
//!
//! This module contains:
//! - [`models`] - [`ExportRow`], [`Location`] and [`OutputConfig`]
//! - [`output`] - CSV writer for the export table
//! - [`reader`] - CSV reader used by the stats pipeline

pub mod models;
pub mod output;
pub mod reader;

pub use models::{ExportRow, Location, OutputConfig, TIMESTAMP_FORMAT};
pub use output::{to_csv, write_csv};
pub use reader::{from_csv_reader, read_csv};
