//! Slack Web API access.
//!
//! The export pipeline only talks to Slack through the [`SlackApi`] trait,
//! one method per Web API call it needs. [`WebClient`] implements it over
//! HTTPS; tests substitute scripted fakes.
//!
//! Every method performs exactly one request. Pagination and retries are
//! layered on top by [`export`](crate::export) and
//! [`RetryPolicy`](crate::retry::RetryPolicy).
//!
//! # Example
//!
//! ```rust,no_run
//! use slackpack::api::{SlackApi, WebClient};
//!
//! let client = WebClient::from_env()?;
//! let page = client.list_channels(None)?;
//! for channel in &page.items {
//!     println!("#{} ({})", channel.name, channel.id);
//! }
//! # Ok::<(), slackpack::SlackpackError>(())
//! ```

mod web;

pub use web::{DEFAULT_BASE_URL, DEFAULT_PAGE_LIMIT, WebClient};

use crate::error::Result;
use crate::message::{Channel, Message};

/// One page of a cursor-paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Cursor for the next page; `None` on the last page.
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    /// A page with more results behind `cursor`.
    pub fn new(items: Vec<T>, next_cursor: Option<String>) -> Self {
        // Slack signals the end with an empty string rather than omitting it.
        let next_cursor = next_cursor.filter(|c| !c.is_empty());
        Self { items, next_cursor }
    }

    /// The final page of a listing.
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }

    /// Returns `true` if no further pages follow.
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}

/// The Slack Web API calls used by the exporter.
pub trait SlackApi {
    /// `conversations.list`
    fn list_channels(&self, cursor: Option<&str>) -> Result<Page<Channel>>;

    /// `conversations.join`
    fn join_channel(&self, channel_id: &str) -> Result<()>;

    /// `conversations.history`
    fn history(&self, channel_id: &str, cursor: Option<&str>) -> Result<Page<Message>>;

    /// `conversations.replies`
    ///
    /// Slack includes the parent message as the first item of the first page.
    fn replies(&self, channel_id: &str, thread_ts: &str, cursor: Option<&str>)
    -> Result<Page<Message>>;

    /// `users.info`, returning the user's name.
    fn user_name(&self, user_id: &str) -> Result<String>;
}

impl<A: SlackApi + ?Sized> SlackApi for &A {
    fn list_channels(&self, cursor: Option<&str>) -> Result<Page<Channel>> {
        (**self).list_channels(cursor)
    }

    fn join_channel(&self, channel_id: &str) -> Result<()> {
        (**self).join_channel(channel_id)
    }

    fn history(&self, channel_id: &str, cursor: Option<&str>) -> Result<Page<Message>> {
        (**self).history(channel_id, cursor)
    }

    fn replies(
        &self,
        channel_id: &str,
        thread_ts: &str,
        cursor: Option<&str>,
    ) -> Result<Page<Message>> {
        (**self).replies(channel_id, thread_ts, cursor)
    }

    fn user_name(&self, user_id: &str) -> Result<String> {
        (**self).user_name(user_id)
    }
}
