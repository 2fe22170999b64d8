//! Flat export rows and output configuration.

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::{Result, SlackpackError};

/// Fixed pattern used for the `timestamp` column (local time, second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Where a message lives: the channel's main timeline or inside a thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    #[default]
    Main,
    Thread,
}

impl Location {
    /// Returns the tag written to the `location` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Main => "main",
            Location::Thread => "thread",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = SlackpackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "main" => Ok(Location::Main),
            "thread" => Ok(Location::Thread),
            other => Err(SlackpackError::invalid_format(
                "CSV",
                format!("unknown location '{}', expected 'main' or 'thread'", other),
            )),
        }
    }
}

/// One row of the exported table.
///
/// The timestamp is a local wall-clock time truncated to whole seconds, which
/// is exactly what survives a write/read cycle through the CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub timestamp: NaiveDateTime,
    pub channel: String,
    pub username: String,
    pub location: Location,
    pub message: String,
}

impl ExportRow {
    /// Creates a row on the main timeline.
    pub fn new(
        timestamp: NaiveDateTime,
        channel: impl Into<String>,
        username: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            channel: channel.into(),
            username: username.into(),
            location: Location::Main,
            message: message.into(),
        }
    }

    /// Builder method to set the location.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Flattens a Slack message with its resolved channel and author names.
    pub fn from_message(
        msg: &Message,
        channel: impl Into<String>,
        username: impl Into<String>,
    ) -> Result<Self> {
        let timestamp = msg
            .timestamp()?
            .with_timezone(&Local)
            .naive_local()
            .with_nanosecond(0)
            .ok_or_else(|| SlackpackError::invalid_timestamp(&msg.ts, None))?;

        let location = if msg.is_reply() {
            Location::Thread
        } else {
            Location::Main
        };

        Ok(Self {
            timestamp,
            channel: channel.into(),
            username: username.into(),
            location,
            message: msg.text.clone(),
        })
    }

    /// Returns the timestamp formatted with [`TIMESTAMP_FORMAT`].
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Configuration for the CSV output.
///
/// The default layout has five columns:
/// `timestamp, channel, username, location, message`.
/// [`without_location`](Self::without_location) drops the `location` column
/// for consumers expecting the older four-column table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Include the `location` column
    pub include_location: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            include_location: true,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn without_location(mut self) -> Self {
        self.include_location = false;
        self
    }
}
