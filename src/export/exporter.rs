//! The export pipeline.
//!
//! [`Exporter`] wires the [`SlackApi`] calls together: list channels, join
//! the public ones we aren't in, drain every channel's history and threads,
//! resolve authors and flatten everything into [`ExportRow`]s.
//!
//! Every remote call goes through the exporter's [`RetryPolicy`]. Failures
//! that survive the retries are handled per call site:
//!
//! | Call | On failure |
//! |------|-----------|
//! | `conversations.list` | export fails |
//! | `conversations.join` | logged, next channel |
//! | `conversations.history` / `replies` | logged, partial pages kept |
//! | `users.info` | author becomes [`UNKNOWN_USER`] |

use std::time::Instant;

use crate::api::SlackApi;
use crate::config::ExportConfig;
use crate::core::models::ExportRow;
use crate::core::output::write_csv;
use crate::error::Result;
use crate::export::pagination::drain;
use crate::export::threads::{sort_newest_first, splice_replies};
use crate::message::{Channel, Message};
use crate::progress::{Progress, ProgressCallback};
use crate::retry::RetryPolicy;

/// Username used when `users.info` can't resolve an author.
pub const UNKNOWN_USER: &str = "unknown";

/// Counters collected during an export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Channels in the workspace listing
    pub channels: usize,
    /// Channels joined during this run
    pub joined: usize,
    /// Messages fetched, replies included
    pub fetched: usize,
    /// Messages skipped: no author (bots, system events) or unreadable `ts`
    pub skipped: usize,
    /// Rows produced
    pub rows: usize,
}

/// Result of [`Exporter::export`].
#[derive(Debug, Clone)]
pub struct Export {
    pub rows: Vec<ExportRow>,
    pub stats: ExportStats,
}

impl Export {
    /// Writes the rows to the table named in `config`, in its layout.
    pub fn write(&self, config: &ExportConfig) -> Result<()> {
        write_csv(&self.rows, &config.output, &config.output_config())
    }
}

/// Resolves an author identifier to a display name.
///
/// One retried `users.info` lookup per call, no caching. Any failure, and an
/// empty name, yield [`UNKNOWN_USER`].
pub fn resolve_username<A: SlackApi + ?Sized>(api: &A, retry: &RetryPolicy, user_id: &str) -> String {
    match retry.run("users.info", || api.user_name(user_id)) {
        Ok(name) if !name.is_empty() => name,
        Ok(_) => UNKNOWN_USER.to_string(),
        Err(err) => {
            tracing::warn!(user = user_id, error = %err, "could not resolve username");
            UNKNOWN_USER.to_string()
        }
    }
}

/// Runs the export pipeline against a [`SlackApi`].
pub struct Exporter<A> {
    api: A,
    retry: RetryPolicy,
    join_channels: bool,
    include_threads: bool,
    progress: Option<ProgressCallback>,
}

impl<A: SlackApi> Exporter<A> {
    /// Creates an exporter with the default retry policy.
    pub fn new(api: A) -> Self {
        Self {
            api,
            retry: RetryPolicy::default(),
            join_channels: true,
            include_threads: true,
            progress: None,
        }
    }

    /// Creates an exporter configured from an [`ExportConfig`].
    pub fn from_config(api: A, config: &ExportConfig) -> Self {
        Self::new(api)
            .with_retry(config.retry_policy())
            .with_join_channels(config.join_channels)
            .with_threads(config.include_threads)
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
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
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Returns the underlying API client.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Lists every public channel. Any failure aborts.
    pub fn list_channels(&self) -> Result<Vec<Channel>> {
        drain(|cursor| {
            self.retry
                .run("conversations.list", || self.api.list_channels(cursor))
        })
        .into_result()
    }

    /// Joins every public channel we aren't a member of yet.
    ///
    /// Returns how many joins succeeded. Failures are logged and skipped.
    pub fn join_public_channels(&self, channels: &[Channel]) -> usize {
        let mut joined = 0;
        for channel in channels.iter().filter(|c| c.needs_join()) {
            tracing::info!(channel = %channel.name, id = %channel.id, "joining channel");
            match self
                .retry
                .run("conversations.join", || self.api.join_channel(&channel.id))
            {
                Ok(()) => joined += 1,
                Err(err) => tracing::warn!(
                    channel = %channel.name,
                    id = %channel.id,
                    error = %err,
                    "failed to join channel"
                ),
            }
        }
        joined
    }

    /// Drains a thread's replies, keeping partial results on failure.
    pub fn thread_replies(&self, channel_id: &str, thread_ts: &str) -> Vec<Message> {
        drain(|cursor| {
            self.retry.run("conversations.replies", || {
                self.api.replies(channel_id, thread_ts, cursor)
            })
        })
        .into_partial("conversations.replies")
    }

    /// Drains a channel's history with threads spliced in, newest first.
    pub fn channel_messages(&self, channel: &Channel) -> Vec<Message> {
        let history = drain(|cursor| {
            self.retry
                .run("conversations.history", || self.api.history(&channel.id, cursor))
        })
        .into_partial("conversations.history");

        let mut messages = if self.include_threads {
            splice_replies(history, |parent| self.thread_replies(&channel.id, &parent.ts))
        } else {
            history
        };

        sort_newest_first(&mut messages);
        messages
    }

    /// Resolves an author with this exporter's retry policy.
    pub fn resolve_username(&self, user_id: &str) -> String {
        resolve_username(&self.api, &self.retry, user_id)
    }

    /// Flattens messages into rows.
    ///
    /// Messages without an author are dropped; ones with an unreadable `ts`
    /// are dropped with a warning. Returns the rows and the number dropped.
    pub fn flatten(&self, channel: &Channel, messages: &[Message]) -> (Vec<ExportRow>, usize) {
        let mut rows = Vec::with_capacity(messages.len());
        let mut skipped = 0;

        for msg in messages {
            let Some(user_id) = msg.user.as_deref() else {
                skipped += 1;
                continue;
            };
            let mut row = match ExportRow::from_message(msg, &channel.name, UNKNOWN_USER) {
                Ok(row) => row,
                Err(err) => {
                    tracing::warn!(
                        channel = %channel.name,
                        ts = %msg.ts,
                        error = %err,
                        "skipping message with unreadable timestamp"
                    );
                    skipped += 1;
                    continue;
                }
            };
            row.username = self.resolve_username(user_id);
            rows.push(row);
        }

        (rows, skipped)
    }

    /// Runs the whole pipeline and returns the rows in channel listing order.
    pub fn export(&self) -> Result<Export> {
        let mut stats = ExportStats::default();

        tracing::info!("fetching channel list");
        let channels = self.list_channels()?;
        stats.channels = channels.len();
        tracing::info!(total = channels.len(), "channels listed");

        if self.join_channels {
            stats.joined = self.join_public_channels(&channels);
        }

        let mut rows = Vec::new();
        for (index, channel) in channels.iter().enumerate() {
            self.report(Progress::new(index, channels.len(), &channel.name).with_messages(rows.len()));
            tracing::info!(
                channel = %channel.name,
                id = %channel.id,
                position = index + 1,
                total = channels.len(),
                "fetching messages"
            );

            let messages = self.channel_messages(channel);
            stats.fetched += messages.len();

            let (channel_rows, skipped) = self.flatten(channel, &messages);
            stats.skipped += skipped;
            rows.extend(channel_rows);
        }

        if let Some(last) = channels.last() {
            self.report(Progress::new(channels.len(), channels.len(), &last.name).with_messages(rows.len()));
        }

        stats.rows = rows.len();
        Ok(Export { rows, stats })
    }

    fn report(&self, progress: Progress) {
        if let Some(callback) = &self.progress {
            callback(progress);
        }
    }
}

/// Exports the workspace and writes the CSV table named in `config`.
pub fn run_export<A: SlackApi>(api: A, config: &ExportConfig) -> Result<ExportStats> {
    let start = Instant::now();
    let export = Exporter::from_config(api, config).export()?;

    export.write(config)?;

    tracing::info!(
        rows = export.stats.rows,
        output = %config.output.display(),
        elapsed_secs = start.elapsed().as_secs_f64(),
        "export written"
    );
    Ok(export.stats)
}
