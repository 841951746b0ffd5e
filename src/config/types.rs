use crate::output::DEFAULT_BATCH_SIZE;
use serde::Deserialize;

/// Main configuration structure for Sitemap-Batcher
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub batching: BatchingConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    pub storage: StorageConfig,
}

/// Sitemap discovery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    /// URL of the root sitemap index
    #[serde(rename = "root-url")]
    pub root_url: String,

    /// Substring a child sitemap URL must contain to be crawled
    #[serde(default = "default_keyword")]
    pub keyword: String,

    /// Selection pattern for child sitemap locations in the root index
    #[serde(rename = "index-pattern", default = "default_index_pattern")]
    pub index_pattern: String,

    /// Selection pattern for page locations in a child sitemap
    #[serde(rename = "leaf-pattern", default = "default_leaf_pattern")]
    pub leaf_pattern: String,

    /// Per-request timeout for sitemap fetches (seconds)
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

/// Batch partitioning configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BatchingConfig {
    /// Maximum number of URLs per batch
    #[serde(rename = "batch-size", default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for BatchingConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url", default)]
    pub contact_url: Option<String>,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email", default)]
    pub contact_email: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: env!("CARGO_PKG_NAME").to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
            contact_email: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value
    ///
    /// Format: `CrawlerName/Version (+ContactURL; ContactEmail)`, with the
    /// parenthesised part omitted when no contact details are configured.
    pub fn header_value(&self) -> String {
        let contact: Vec<String> = [
            self.contact_url.as_ref().map(|u| format!("+{}", u)),
            self.contact_email.clone(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if contact.is_empty() {
            format!("{}/{}", self.crawler_name, self.crawler_version)
        } else {
            format!(
                "{}/{} ({})",
                self.crawler_name,
                self.crawler_version,
                contact.join("; ")
            )
        }
    }
}

/// Object store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Directory,
    Sqlite,
    Http,
}

/// Export destination configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Which object store implementation to write to
    pub backend: StorageBackend,

    /// Logical bucket the artifact is written into
    pub bucket: String,

    /// Root directory (directory backend) or database file (sqlite backend)
    #[serde(default)]
    pub path: Option<String>,

    /// Base URL of the object gateway (http backend)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Name of the environment variable holding the gateway bearer token
    #[serde(rename = "token-env", default = "default_token_env")]
    pub token_env: String,
}

fn default_keyword() -> String {
    "product".to_string()
}

fn default_index_pattern() -> String {
    "//sitemap/loc".to_string()
}

fn default_leaf_pattern() -> String {
    "//url/loc".to_string()
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE.get()
}

fn default_token_env() -> String {
    "STORAGE_TOKEN".to_string()
}
