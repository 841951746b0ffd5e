//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests for sitemap documents
//! - Error classification (timeout, transport, status, parse)
//! - Selecting text values from the fetched XML

use crate::config::UserAgentConfig;
use crate::crawler::parser::select_text;
use crate::crawler::SelectionPattern;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Resolves one URL into the text values matching a selection pattern
///
/// Implementations must be shareable across tasks: the crawler hands one
/// fetcher to every child task it spawns.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and returns the text of every element matching `pattern`
    async fn fetch(
        &self,
        url: &str,
        pattern: &SelectionPattern,
    ) -> Result<Vec<String>, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Total request timeout
///
/// # Example
///
/// ```no_run
/// use sitemap_batcher::config::UserAgentConfig;
/// use sitemap_batcher::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from the user agent settings and request timeout
    pub fn from_config(
        config: &UserAgentConfig,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config, timeout)?))
    }

    async fn get_body(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status = response.status();
        tracing::debug!("Visited {} ({})", url, status.as_u16());

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| classify_error(url, e))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(
        &self,
        url: &str,
        pattern: &SelectionPattern,
    ) -> Result<Vec<String>, FetchError> {
        tracing::debug!("Visiting {}", url);

        let body = self.get_body(url).await?;
        let values = select_text(&body, pattern).map_err(|message| FetchError::Parse {
            url: url.to_string(),
            message,
        })?;

        tracing::debug!("Finished {}: {} values for {}", url, values.len(), pattern);
        Ok(values)
    }
}

/// Maps a transport error onto the fetch error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
