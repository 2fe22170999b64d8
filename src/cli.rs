//! Command-line interface definitions using clap.
//!
//! - [`ExportArgs`] - arguments of `slack-export`
//! - [`StatsArgs`] - arguments of `slack-stats`
//!
//! Both convert into the library configuration types, so the binaries stay
//! thin:
//!
//! ```rust
//! use clap::Parser;
//! use slackpack::cli::StatsArgs;
//!
//! let args = StatsArgs::parse_from(["slack-stats", "export.csv", "--top-keywords", "10"]);
//! let config = args.to_config();
//! assert_eq!(config.top_keywords, 10);
//! assert_eq!(config.min_user_messages, 5);
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::config::{DEFAULT_CHARTS_FILE, DEFAULT_EXPORT_FILE, ExportConfig, StatsConfig};
use crate::retry::DEFAULT_MAX_RETRIES;

/// Export every public Slack channel (threads included) into one CSV table.
///
/// The bot token is read from the `SLACK_API_TOKEN` environment variable.
#[derive(Parser, Debug, Clone)]
#[command(name = "slack-export")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    SLACK_API_TOKEN=xoxb-... slack-export
    slack-export -o workspace.csv --no-join
    slack-export --max-retries 8 --page-limit 500")]
pub struct ExportArgs {
    /// Path to output CSV file
    #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
    pub output: PathBuf,

    /// Don't join public channels the bot isn't a member of
    #[arg(long)]
    pub no_join: bool,

    /// Don't fetch thread replies
    #[arg(long)]
    pub no_threads: bool,

    /// Retries per API call on transient failures
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Items per page for paginated calls (1-1000)
    #[arg(long, value_name = "N", default_value_t = 200)]
    pub page_limit: u32,

    /// Omit the location column
    #[arg(long)]
    pub no_location: bool,

    /// Log every API call
    #[arg(short, long)]
    pub verbose: bool,
}

impl ExportArgs {
    /// Builds an [`ExportConfig`] without a token; the caller supplies it.
    pub fn to_config(&self) -> ExportConfig {
        ExportConfig::new()
            .with_output(self.output.clone())
            .with_max_retries(self.max_retries)
            .with_page_limit(self.page_limit)
            .with_join_channels(!self.no_join)
            .with_threads(!self.no_threads)
            .with_location(!self.no_location)
    }
}

/// Chart activity, sentiment and keywords of an exported Slack table.
#[derive(Parser, Debug, Clone)]
#[command(name = "slack-stats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    slack-stats
    slack-stats workspace.csv -o charts.html
    slack-stats --min-user-messages 20 --top-keywords 30")]
pub struct StatsArgs {
    /// Path to the exported CSV table
    #[arg(default_value = DEFAULT_EXPORT_FILE)]
    pub input: PathBuf,

    /// Path to output chart document
    #[arg(short, long, default_value = DEFAULT_CHARTS_FILE)]
    pub output: PathBuf,

    /// Leave out users with fewer messages
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub min_user_messages: usize,

    /// Leave out channels with fewer messages
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub min_channel_messages: usize,

    /// Number of keywords to chart
    #[arg(long, value_name = "N", default_value_t = 20)]
    pub top_keywords: usize,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl StatsArgs {
    pub fn to_config(&self) -> StatsConfig {
        StatsConfig::new()
            .with_input(self.input.clone())
            .with_output(self.output.clone())
            .with_min_user_messages(self.min_user_messages)
            .with_min_channel_messages(self.min_channel_messages)
            .with_top_keywords(self.top_keywords)
    }
}
