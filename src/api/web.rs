//! Blocking HTTPS client for the Slack Web API.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{Page, SlackApi};
use crate::config::{ExportConfig, TOKEN_ENV_VAR};
use crate::error::{Result, SlackpackError};
use crate::message::{Channel, Message};

/// Base URL of the Web API.
pub const DEFAULT_BASE_URL: &str = "https://slack.com/api";

/// Items requested per page for paginated listings.
pub const DEFAULT_PAGE_LIMIT: u32 = 200;

#[derive(Debug, Default, Deserialize)]
struct ResponseMetadata {
    #[serde(default)]
    next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChannelsResponse {
    #[serde(default)]
    channels: Vec<Channel>,
    #[serde(default)]
    response_metadata: ResponseMetadata,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    messages: Vec<Message>,
    #[serde(default)]
    response_metadata: ResponseMetadata,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    user: User,
}

#[derive(Debug, Deserialize)]
struct User {
    #[serde(default)]
    name: String,
}

/// Slack Web API client authenticated with a bearer token.
///
/// The token is checked when the client is built, so a missing credential
/// fails before any request goes out.
#[derive(Debug, Clone)]
pub struct WebClient {
    http: Client,
    token: String,
    base_url: String,
    page_limit: u32,
}

impl WebClient {
    /// Creates a client for the given token.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SlackpackError::missing_token(TOKEN_ENV_VAR));
        }

        let http = Client::builder()
            .user_agent(concat!("slackpack/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            token,
            base_url: DEFAULT_BASE_URL.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
        })
    }

    /// Creates a client from [`TOKEN_ENV_VAR`].
    pub fn from_env() -> Result<Self> {
        Self::from_config(&ExportConfig::from_env()?)
    }

    /// Creates a client from an export configuration.
    pub fn from_config(config: &ExportConfig) -> Result<Self> {
        let token = config
            .token
            .clone()
            .ok_or_else(|| SlackpackError::missing_token(TOKEN_ENV_VAR))?;
        Ok(Self::new(token)?.with_page_limit(config.page_limit))
    }

    /// Points the client at another API root (proxies, test servers).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the page size for paginated calls. Slack caps it at 1000.
    #[must_use]
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.page_limit = limit.clamp(1, 1000);
        self
    }

    /// Returns the configured page size.
    pub fn page_limit(&self) -> u32 {
        self.page_limit
    }

    fn call<T: DeserializeOwned>(&self, method: &'static str, params: &[(&str, String)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), method);
        tracing::debug!(method, "slack api request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .form(params)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(SlackpackError::api(method, format!("HTTP {}", status)));
        }

        decode(method, response.json()?)
    }

    fn paged_params<'a>(&self, cursor: Option<&str>, extra: &[(&'a str, &str)]) -> Vec<(&'a str, String)> {
        let mut params: Vec<(&str, String)> = extra
            .iter()
            .map(|(k, v)| (*k, (*v).to_string()))
            .collect();
        params.push(("limit", self.page_limit.to_string()));
        if let Some(cursor) = cursor {
            params.push(("cursor", cursor.to_string()));
        }
        params
    }
}

/// Checks the `ok` flag of a Web API response and decodes the payload.
fn decode<T: DeserializeOwned>(method: &'static str, body: Value) -> Result<T> {
    if !body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
        let error = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown_error");
        return Err(SlackpackError::api(method, error));
    }
    Ok(serde_json::from_value(body)?)
}

impl SlackApi for WebClient {
    fn list_channels(&self, cursor: Option<&str>) -> Result<Page<Channel>> {
        let params = self.paged_params(cursor, &[("types", "public_channel")]);
        let response: ChannelsResponse = self.call("conversations.list", &params)?;
        Ok(Page::new(
            response.channels,
            response.response_metadata.next_cursor,
        ))
    }

    fn join_channel(&self, channel_id: &str) -> Result<()> {
        let _: Value = self.call("conversations.join", &[("channel", channel_id.to_string())])?;
        Ok(())
    }

    fn history(&self, channel_id: &str, cursor: Option<&str>) -> Result<Page<Message>> {
        let params = self.paged_params(cursor, &[("channel", channel_id)]);
        let response: MessagesResponse = self.call("conversations.history", &params)?;
        Ok(Page::new(
            response.messages,
            response.response_metadata.next_cursor,
        ))
    }

    fn replies(
        &self,
        channel_id: &str,
        thread_ts: &str,
        cursor: Option<&str>,
    ) -> Result<Page<Message>> {
        let params = self.paged_params(cursor, &[("channel", channel_id), ("ts", thread_ts)]);
        let response: MessagesResponse = self.call("conversations.replies", &params)?;
        Ok(Page::new(
            response.messages,
            response.response_metadata.next_cursor,
        ))
    }

    fn user_name(&self, user_id: &str) -> Result<String> {
        let response: UserResponse = self.call("users.info", &[("user", user_id.to_string())])?;
        Ok(response.user.name)
    }
}
