//! Unified error types for slackpack.
//!
//! A single [`SlackpackError`] enum covers the export pipeline (Slack API,
//! HTTP transport, credentials) and the stats pipeline (CSV parsing, chart
//! rendering).
//!
//! # Transient vs. fatal
//!
//! Only [`SlackpackError::Api`] is considered transient: Slack answered, but
//! with `ok: false` or a non-success status (rate limits, flaky backends).
//! [`RetryPolicy`](crate::retry::RetryPolicy) retries those and nothing else.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for slackpack operations.
///
/// # Example
///
/// ```rust
/// use slackpack::error::Result;
/// use slackpack::ExportRow;
///
/// fn load() -> Result<Vec<ExportRow>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, SlackpackError>;

/// The error type for all slackpack operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SlackpackError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input table doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV reading or writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON decoding error for an API payload.
    #[cfg(feature = "export")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The HTTP request itself failed (DNS, TLS, connection reset, ...).
    #[cfg(feature = "export")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Slack rejected a call.
    ///
    /// Produced for `{"ok": false, "error": "..."}` bodies and for
    /// non-success HTTP statuses such as `429 Too Many Requests`.
    #[error("Slack API error in {method}: {error}")]
    Api {
        /// Web API method name, e.g. `conversations.history`
        method: &'static str,
        /// Error code reported by Slack
        error: String,
    },

    /// The bearer token is missing from the environment.
    #[error("{var} environment variable not set. Please set it with your Slack API token and try again.")]
    MissingToken {
        /// Name of the environment variable that was checked
        var: &'static str,
    },

    /// A timestamp in an API payload or in the CSV table could not be parsed.
    #[error("Invalid timestamp '{input}'{}", line.map(|l| format!(" on line {}", l)).unwrap_or_default())]
    InvalidTimestamp {
        /// The offending value
        input: String,
        /// CSV line number, when reading a table
        line: Option<u64>,
    },

    /// The input doesn't match the expected structure.
    #[error("Invalid {format} format: {message}{}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// Chart rendering failed.
    #[error("Failed to render chart '{chart}': {message}")]
    Render {
        /// Title of the chart being drawn
        chart: String,
        /// Backend error description
        message: String,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl SlackpackError {
    /// Creates a Slack API error.
    pub fn api(method: &'static str, error: impl Into<String>) -> Self {
        SlackpackError::Api {
            method,
            error: error.into(),
        }
    }

    /// Creates a missing-token error for the given variable.
    pub fn missing_token(var: &'static str) -> Self {
        SlackpackError::MissingToken { var }
    }

    /// Creates an invalid timestamp error.
    pub fn invalid_timestamp(input: impl Into<String>, line: Option<u64>) -> Self {
        SlackpackError::InvalidTimestamp {
            input: input.into(),
            line,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        SlackpackError::InvalidFormat {
            format,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a render error.
    pub fn render(chart: impl Into<String>, message: impl ToString) -> Self {
        SlackpackError::Render {
            chart: chart.into(),
            message: message.to_string(),
        }
    }

    /// Attaches a file path to errors that carry one.
    #[must_use]
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            SlackpackError::InvalidFormat {
                format, message, ..
            } => SlackpackError::InvalidFormat {
                format,
                message,
                path: Some(file.into()),
            },
            other => other,
        }
    }

    /// Returns `true` if the error is worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, SlackpackError::Api { .. })
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, SlackpackError::Io(_))
    }

    /// Returns `true` if this is a Slack API error.
    pub fn is_api(&self) -> bool {
        matches!(self, SlackpackError::Api { .. })
    }

    /// Returns `true` if the credential is missing.
    pub fn is_missing_token(&self) -> bool {
        matches!(self, SlackpackError::MissingToken { .. })
    }

    /// Returns `true` if this is an invalid timestamp error.
    pub fn is_invalid_timestamp(&self) -> bool {
        matches!(self, SlackpackError::InvalidTimestamp { .. })
    }
}
