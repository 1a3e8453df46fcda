//! Registry listing client
//!
//! Endpoint: `GET <registry_url>[?cursor=<token>]`
//! Returns: `{ "servers": [...], "metadata": { "next_cursor": "..." } }`
//!
//! A missing (or empty) `next_cursor` marks the last page.

use super::backoff::ExponentialBackoff;
use super::classifier::ServerEntry;
use crate::config::TrendsConfig;
use crate::error::{Result, TrendsError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageMetadata {
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// One page of the server listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryPage {
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
    #[serde(default)]
    pub metadata: PageMetadata,
}

impl RegistryPage {
    /// Cursor for the following page, `None` on the last page
    pub fn next_cursor(&self) -> Option<&str> {
        self.metadata
            .next_cursor
            .as_deref()
            .filter(|cursor| !cursor.is_empty())
    }
}

/// Source of paginated server listings
#[async_trait]
pub trait RegistrySource: Send + Sync {
    /// Fetch the page at `cursor` (first page when `None`)
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<RegistryPage>;
}

struct AttemptError {
    retryable: bool,
    error: TrendsError,
}

/// HTTP client for the registry listing with bounded retries
pub struct HttpRegistryClient {
    client: reqwest::Client,
    url: String,
    max_retries: u32,
    retry_initial_delay: Duration,
    retry_max_delay: Duration,
}

impl HttpRegistryClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
            max_retries: 3,
            retry_initial_delay: Duration::from_millis(500),
            retry_max_delay: Duration::from_secs(10),
        })
    }

    pub fn from_config(config: &TrendsConfig) -> Result<Self> {
        Ok(Self::new(config.registry_url.clone(), config.request_timeout)?
            .with_retries(config.max_retries, config.retry_initial_delay, config.retry_max_delay))
    }

    pub fn with_retries(mut self, max_retries: u32, initial_delay: Duration, max_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_initial_delay = initial_delay;
        self.retry_max_delay = max_delay;
        self
    }

    async fn fetch_once(&self, cursor: Option<&str>) -> std::result::Result<RegistryPage, AttemptError> {
        let mut request = self.client.get(&self.url);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }

        let response = request.send().await.map_err(|e| AttemptError {
            retryable: true,
            error: e.into(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError {
                retryable: status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS,
                error: TrendsError::Fetch(format!("Registry API error: {}", status)),
            });
        }

        response.json::<RegistryPage>().await.map_err(|e| AttemptError {
            retryable: false,
            error: TrendsError::Fetch(format!("Invalid registry response: {}", e)),
        })
    }
}

#[async_trait]
impl RegistrySource for HttpRegistryClient {
    async fn fetch_page(&self, cursor: Option<&str>) -> Result<RegistryPage> {
        let mut backoff =
            ExponentialBackoff::new(self.retry_initial_delay, self.retry_max_delay, self.max_retries);

        loop {
            match self.fetch_once(cursor).await {
                Ok(page) => return Ok(page),
                Err(attempt) if attempt.retryable => {
                    log::warn!("⚠️  Page request failed: {}", attempt.error);
                    if backoff.sleep().await.is_err() {
                        return Err(attempt.error);
                    }
                }
                Err(attempt) => return Err(attempt.error),
            }
        }
    }
}
