//! Configuration types for both pipelines.
//!
//! These are plain builder structs without CLI framework dependencies; the
//! binaries translate their flags into them.
//!
//! - [`ExportConfig`] - credential, output file, retry and pagination settings
//! - [`StatsConfig`] - input/output files and aggregate thresholds
//!
//! # Example
//!
//! ```rust
//! use slackpack::config::{ExportConfig, StatsConfig};
//!
//! let export = ExportConfig::new()
//!     .with_token("xoxb-123")
//!     .with_max_retries(3)
//!     .with_threads(false);
//!
//! let stats = StatsConfig::new().with_top_keywords(10);
//! assert_eq!(stats.min_user_messages, 5);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::models::OutputConfig;
use crate::error::{Result, SlackpackError};
use crate::retry::{DEFAULT_MAX_RETRIES, RetryPolicy};

/// Environment variable read by [`ExportConfig::from_env`].
pub const TOKEN_ENV_VAR: &str = "SLACK_API_TOKEN";

/// Default export table name, shared by both pipelines.
pub const DEFAULT_EXPORT_FILE: &str = "all_channel_conversations.csv";

/// Default chart document name.
pub const DEFAULT_CHARTS_FILE: &str = "slack_stats_charts.html";

/// Configuration for the export pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Slack bearer token (never serialized)
    #[serde(skip)]
    pub token: Option<String>,

    /// Path of the CSV table to write
    pub output: PathBuf,

    /// Retries per API call (default: 5)
    pub max_retries: u32,

    /// Items per page for paginated calls (default: 200)
    pub page_limit: u32,

    /// Join public channels before reading them (default: true)
    pub join_channels: bool,

    /// Fetch thread replies (default: true)
    pub include_threads: bool,

    /// Write the `location` column (default: true)
    pub include_location: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            token: None,
            output: PathBuf::from(DEFAULT_EXPORT_FILE),
            max_retries: DEFAULT_MAX_RETRIES,
            page_limit: 200,
            join_channels: true,
            include_threads: true,
            include_location: true,
        }
    }
}

impl ExportConfig {
    /// Creates a new configuration with default values and no token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration with the token taken from [`TOKEN_ENV_VAR`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates a configuration with the token taken from `lookup`.
    ///
    /// A missing or blank token is an error.
    ///
    /// ```rust
    /// use slackpack::config::ExportConfig;
    ///
    /// let config = ExportConfig::from_lookup(|_| Some("xoxb-1".to_string()))?;
    /// assert_eq!(config.token.as_deref(), Some("xoxb-1"));
    ///
    /// assert!(ExportConfig::from_lookup(|_| None).is_err());
    /// # Ok::<(), slackpack::SlackpackError>(())
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV_VAR)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| SlackpackError::missing_token(TOKEN_ENV_VAR))?;
        Ok(Self::new().with_token(token))
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit;
        self
    }

    #[must_use]
    pub fn with_join_channels(mut self, enabled: bool) -> Self {
        self.join_channels = enabled;
        self
    }

    #[must_use]
    pub fn with_threads(mut self, enabled: bool) -> Self {
        self.include_threads = enabled;
        self
    }

    #[must_use]
    pub fn with_location(mut self, enabled: bool) -> Self {
        self.include_location = enabled;
        self
    }

    /// Retry policy derived from [`max_retries`](Self::max_retries).
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries)
    }

    /// Table layout derived from [`include_location`](Self::include_location).
    pub fn output_config(&self) -> OutputConfig {
        if self.include_location {
            OutputConfig::new()
        } else {
            OutputConfig::new().without_location()
        }
    }
}

/// Configuration for the stats pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Export table to read
    pub input: PathBuf,

    /// Chart document to write
    pub output: PathBuf,

    /// Users below this many messages are left out (default: 5)
    pub min_user_messages: usize,

    /// Channels below this many messages are left out of the activity and
    /// sentiment charts (default: 10)
    pub min_channel_messages: usize,

    /// Number of keywords to chart (default: 20)
    pub top_keywords: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_EXPORT_FILE),
            output: PathBuf::from(DEFAULT_CHARTS_FILE),
            min_user_messages: 5,
            min_channel_messages: 10,
            top_keywords: 20,
        }
    }
}

impl StatsConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    #[must_use]
    pub fn with_min_user_messages(mut self, min: usize) -> Self {
        self.min_user_messages = min;
        self
    }

    #[must_use]
    pub fn with_min_channel_messages(mut self, min: usize) -> Self {
        self.min_channel_messages = min;
        self
    }

    #[must_use]
    pub fn with_top_keywords(mut self, count: usize) -> Self {
        self.top_keywords = count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_defaults() {
        let config = ExportConfig::default();
        assert!(config.token.is_none());
        assert_eq!(config.output, PathBuf::from("all_channel_conversations.csv"));
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.page_limit, 200);
        assert!(config.join_channels);
        assert!(config.include_threads);
        assert!(config.include_location);
    }

    #[test]
    fn test_output_config_follows_location_flag() {
        assert!(ExportConfig::new().output_config().include_location);
        assert!(!ExportConfig::new().with_location(false).output_config().include_location);
    }

    #[test]
    fn test_export_from_lookup() {
        let config = ExportConfig::from_lookup(|key| {
            assert_eq!(key, "SLACK_API_TOKEN");
            Some("xoxb-abc".to_string())
        })
        .unwrap();
        assert_eq!(config.token.as_deref(), Some("xoxb-abc"));
    }

    #[test]
    fn test_export_from_lookup_blank_token() {
        let err = ExportConfig::from_lookup(|_| Some("  ".to_string())).unwrap_err();
        assert!(err.is_missing_token());
    }

    #[test]
    fn test_export_builder() {
        let config = ExportConfig::new()
            .with_output("out.csv")
            .with_max_retries(2)
            .with_page_limit(50)
            .with_join_channels(false)
            .with_threads(false)
            .with_location(false);

        assert_eq!(config.output, PathBuf::from("out.csv"));
        assert_eq!(config.retry_policy(), RetryPolicy::new(2));
        assert_eq!(config.page_limit, 50);
        assert!(!config.join_channels);
        assert!(!config.include_threads);
        assert!(!config.include_location);
    }

    #[test]
    fn test_token_is_not_serialized() {
        let config = ExportConfig::new().with_token("xoxb-secret");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("xoxb-secret"));
    }

    #[test]
    fn test_stats_defaults() {
        let config = StatsConfig::default();
        assert_eq!(config.input, PathBuf::from("all_channel_conversations.csv"));
        assert_eq!(config.output, PathBuf::from("slack_stats_charts.html"));
        assert_eq!(config.min_user_messages, 5);
        assert_eq!(config.min_channel_messages, 10);
        assert_eq!(config.top_keywords, 20);
    }
}
