//! HTTP client for the Intercom REST API.
//!
//! Covers the two endpoints a run needs: `POST /contacts/search` for
//! fetching recently-seen contacts and `POST /tags` for tagging them.

mod search;
mod tags;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::error::IntercomError;
use crate::rate_limit::{retry_after_secs, retry_rate_limited};
use crate::types::SearchResponse;

const DEFAULT_BASE_URL: &str = "https://api.intercom.io/";

/// API version pinned on every request.
pub(crate) const INTERCOM_VERSION: &str = "2.14";

/// Maximum number of search pages to fetch before returning an error.
/// Prevents infinite loops on cycling cursors.
pub(super) const MAX_PAGES: usize = 10_000;

/// Client for the Intercom REST API.
///
/// Use [`IntercomClient::new`] for production or
/// [`IntercomClient::with_base_url`] to point at a mock server in tests.
pub struct IntercomClient {
    client: Client,
    token: String,
    base_url: Url,
    /// Consecutive 429 responses tolerated per request before giving up.
    max_rate_limit_retries: u32,
}

impl IntercomClient {
    /// Creates a client pointed at the production Intercom API.
    ///
    /// # Errors
    ///
    /// Returns [`IntercomError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        token: &str,
        timeout_secs: u64,
        max_rate_limit_retries: u32,
    ) -> Result<Self, IntercomError> {
        Self::with_base_url(token, timeout_secs, max_rate_limit_retries, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`IntercomError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`IntercomError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        token: &str,
        timeout_secs: u64,
        max_rate_limit_retries: u32,
        base_url: &str,
    ) -> Result<Self, IntercomError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("rollcall/0.1 (activity-report)")
            .build()?;

        Ok(Self {
            client,
            token: token.to_owned(),
            base_url: normalise_base_url(base_url)?,
            max_rate_limit_retries,
        })
    }

    /// Fetches one page of `POST /contacts/search`, retrying on 429.
    ///
    /// `query_start` is the exclusive `last_seen_at` lower bound sent to the
    /// API; `starting_after` is the cursor from the previous page.
    ///
    /// # Errors
    ///
    /// - [`IntercomError::RateLimited`] after `max_rate_limit_retries` consecutive 429s.
    /// - [`IntercomError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`IntercomError::ApiError`] if the body carries an `errors` key.
    /// - [`IntercomError::Deserialize`] if the body is not a search response.
    /// - [`IntercomError::Http`] on network failure.
    pub async fn search_page(
        &self,
        query_start: i64,
        per_page: u32,
        starting_after: Option<&str>,
    ) -> Result<SearchResponse, IntercomError> {
        let url = self.endpoint("contacts/search")?;
        let body = search_body(query_start, per_page, starting_after);

        retry_rate_limited(self.max_rate_limit_retries, || {
            self.post_json::<SearchResponse>(url.clone(), &body, "contacts search page")
        })
        .await
    }

    /// Sends one authenticated JSON `POST` and decodes the response.
    ///
    /// A single attempt: 429 surfaces as [`IntercomError::RateLimited`] so
    /// callers decide whether to retry.
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &serde_json::Value,
        context: &str,
    ) -> Result<T, IntercomError> {
        let url_str = url.to_string();
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .header("Intercom-Version", INTERCOM_VERSION)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(IntercomError::RateLimited {
                retry_after_secs: retry_after_secs(response.headers()),
            });
        }
        if !status.is_success() {
            return Err(IntercomError::UnexpectedStatus {
                status: status.as_u16(),
                url: url_str,
            });
        }

        let text = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| IntercomError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;

        check_api_error(&value)?;

        serde_json::from_value(value).map_err(|e| IntercomError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, IntercomError> {
        self.base_url
            .join(path)
            .map_err(|e| IntercomError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Ensures the base URL ends with exactly one slash so `Url::join` appends
/// to its path rather than replacing the last segment.
fn normalise_base_url(base_url: &str) -> Result<Url, IntercomError> {
    let normalised = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| IntercomError::InvalidBaseUrl {
        base_url: base_url.to_owned(),
        reason: e.to_string(),
    })
}

/// Builds the search request body: users with an email and external id,
/// seen after `query_start`.
pub(crate) fn search_body(
    query_start: i64,
    per_page: u32,
    starting_after: Option<&str>,
) -> serde_json::Value {
    let mut pagination = serde_json::json!({ "per_page": per_page });
    if let Some(cursor) = starting_after {
        pagination["starting_after"] = serde_json::Value::String(cursor.to_owned());
    }

    serde_json::json!({
        "query": {
            "operator": "AND",
            "value": [
                { "field": "role", "operator": "=", "value": "user" },
                { "field": "email", "operator": "!=", "value": null },
                { "field": "external_id", "operator": "!=", "value": null },
                { "field": "last_seen_at", "operator": ">", "value": query_start }
            ]
        },
        "pagination": pagination
    })
}

/// Surfaces an `errors` array in a 2xx body as [`IntercomError::ApiError`].
fn check_api_error(value: &serde_json::Value) -> Result<(), IntercomError> {
    let Some(errors) = value.get("errors") else {
        return Ok(());
    };

    let messages: Vec<String> = errors
        .as_array()
        .map(|list| {
            list.iter()
                .map(|e| {
                    e.get("message")
                        .and_then(serde_json::Value::as_str)
                        .map_or_else(|| e.to_string(), str::to_owned)
                })
                .collect()
        })
        .unwrap_or_default();

    let message = if messages.is_empty() {
        errors.to_string()
    } else {
        messages.join("; ")
    };
    Err(IntercomError::ApiError(message))
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
