//! Blocking feed-API client.
//!
//! Issues bearer-authenticated GET requests against the provider's paginated
//! post listing. The provider contract is minimal: given an optional cursor,
//! return the next page of posts and the cursor for the page after it (absent
//! when exhausted). Any HTTP or decode failure is fatal to the run — there
//! are no retries.
//!
//! Rate limiting is a fixed sleep after each successful request, configured
//! via `api.request_interval_ms`.

use anyhow::{bail, Context, Result};
use std::time::Duration;

use crate::config::ApiConfig;
use crate::models::Page;

/// Environment variable holding the bearer token.
pub const AUTH_TOKEN_ENV: &str = "FEED_AUTH_TOKEN";

pub struct FeedClient {
    http: reqwest::blocking::Client,
    base_url: String,
    group_id: String,
    post_type: String,
    token: String,
    interval: Duration,
}

impl FeedClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `FEED_AUTH_TOKEN` is not in the environment or the
    /// HTTP client cannot be constructed.
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let token = std::env::var(AUTH_TOKEN_ENV)
            .map_err(|_| anyhow::anyhow!("{} environment variable not set", AUTH_TOKEN_ENV))?;

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: api.base_url.clone(),
            group_id: api.group_id.clone(),
            post_type: api.post_type.clone(),
            token,
            interval: Duration::from_millis(api.request_interval_ms),
        })
    }

    /// Fetch one page of posts, optionally continuing from a cursor.
    pub fn fetch_page(&self, cursor: Option<&str>) -> Result<Page> {
        let mut query: Vec<(&str, &str)> = vec![
            ("group_id", self.group_id.as_str()),
            ("type", self.post_type.as_str()),
        ];
        if let Some(c) = cursor {
            query.push(("cursor", c));
        }

        let resp = self
            .http
            .get(&self.base_url)
            .header("authorization", format!("bearer {}", self.token))
            .header("accept", "*/*")
            .query(&query)
            .send()
            .with_context(|| format!("Request to {} failed", self.base_url))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            bail!("Feed API error {}: {}", status, body);
        }

        let page: Page = resp
            .json()
            .with_context(|| "Failed to decode feed API response")?;

        if !self.interval.is_zero() {
            std::thread::sleep(self.interval);
        }

        Ok(page)
    }
}
