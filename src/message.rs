//! Slack conversation types as returned by the Web API.
//!
//! This module provides [`Channel`] and [`Message`], the two records the
//! export pipeline pulls from Slack. Both deserialize straight from the JSON
//! payloads of `conversations.list`, `conversations.history` and
//! `conversations.replies`; unknown fields are ignored.
//!
//! # Threads
//!
//! Slack models threads with two optional fields:
//!
//! | Field | Present on | Meaning |
//! |-------|-----------|---------|
//! | `reply_count` | thread parents | number of replies in the thread |
//! | `thread_ts` | parents and replies | `ts` of the parent message |
//!
//! A message is a reply when `thread_ts` is set and differs from its own `ts`.
//!
//! # Examples
//!
//! ```
//! use slackpack::Message;
//!
//! let parent = Message::new("1700000000.000100", "Hello").with_reply_count(2);
//! let reply = Message::new("1700000060.000200", "Hi!")
//!     .with_thread_ts("1700000000.000100");
//!
//! assert!(parent.is_thread_parent());
//! assert!(reply.is_reply());
//! assert!(!parent.is_reply());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlackpackError};

/// A Slack conversation as listed by `conversations.list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel identifier, e.g. `C024BE91L`.
    pub id: String,

    /// Display name without the leading `#`.
    #[serde(default)]
    pub name: String,

    /// Whether the authenticated user already belongs to the channel.
    #[serde(default)]
    pub is_member: bool,

    #[serde(default)]
    pub is_private: bool,

    #[serde(default)]
    pub is_archived: bool,
}

impl Channel {
    /// Creates a public, unarchived channel the caller is not a member of.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            is_member: false,
            is_private: false,
            is_archived: false,
        }
    }

    /// Builder method to set membership.
    #[must_use]
    pub fn with_member(mut self, is_member: bool) -> Self {
        self.is_member = is_member;
        self
    }

    /// Builder method to mark the channel private.
    #[must_use]
    pub fn with_private(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    /// Builder method to mark the channel archived.
    #[must_use]
    pub fn with_archived(mut self, is_archived: bool) -> Self {
        self.is_archived = is_archived;
        self
    }

    /// Returns `true` for public, unarchived channels we haven't joined yet.
    ///
    /// Private and archived channels can't be joined with `conversations.join`.
    pub fn needs_join(&self) -> bool {
        !self.is_member && !self.is_private && !self.is_archived
    }
}

/// A single Slack message, either top-level or inside a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Slack timestamp (`"<epoch seconds>.<micros>"`), unique per channel.
    pub ts: String,

    /// Author identifier. Absent for bot and system messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Message body in Slack markup.
    #[serde(default)]
    pub text: String,

    /// Number of replies. Only present on thread parents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_count: Option<u32>,

    /// Parent timestamp. Present on thread parents and replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
}

impl Message {
    /// Creates a top-level message without an author.
    pub fn new(ts: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            ts: ts.into(),
            user: None,
            text: text.into(),
            reply_count: None,
            thread_ts: None,
        }
    }

    /// Builder method to set the author.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Builder method to set the reply count.
    ///
    /// Slack also sets `thread_ts` on parents, so this does the same.
    #[must_use]
    pub fn with_reply_count(mut self, count: u32) -> Self {
        self.reply_count = Some(count);
        if self.thread_ts.is_none() {
            self.thread_ts = Some(self.ts.clone());
        }
        self
    }

    /// Builder method to set the parent thread timestamp.
    #[must_use]
    pub fn with_thread_ts(mut self, thread_ts: impl Into<String>) -> Self {
        self.thread_ts = Some(thread_ts.into());
        self
    }

    /// Returns `true` if the message started a thread with at least one reply.
    pub fn is_thread_parent(&self) -> bool {
        self.reply_count.is_some_and(|count| count > 0)
    }

    /// Returns `true` if the message is a reply inside a thread.
    pub fn is_reply(&self) -> bool {
        self.thread_ts
            .as_deref()
            .is_some_and(|parent| parent != self.ts)
    }

    /// Parses [`ts`](Self::ts) into a UTC datetime.
    pub fn timestamp(&self) -> Result<DateTime<Utc>> {
        parse_slack_ts(&self.ts)
    }
}

/// Parses a Slack timestamp such as `"1700000000.000100"`.
///
/// The fractional part is optional and may have up to nine digits.
///
/// ```
/// use slackpack::message::parse_slack_ts;
///
/// let dt = parse_slack_ts("1700000000.500000")?;
/// assert_eq!(dt.timestamp(), 1_700_000_000);
/// assert_eq!(dt.timestamp_subsec_micros(), 500_000);
/// # Ok::<(), slackpack::SlackpackError>(())
/// ```
pub fn parse_slack_ts(ts: &str) -> Result<DateTime<Utc>> {
    let invalid = || SlackpackError::invalid_timestamp(ts, None);

    let (secs, frac) = ts.split_once('.').unwrap_or((ts, ""));
    let secs: i64 = secs.parse().map_err(|_| invalid())?;

    if frac.len() > 9 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    let nanos = if frac.is_empty() {
        0
    } else {
        // Right-pad to nanoseconds: "0001" -> 000100000
        format!("{:0<9}", frac).parse::<u32>().map_err(|_| invalid())?
    };

    DateTime::from_timestamp(secs, nanos).ok_or_else(invalid)
}
