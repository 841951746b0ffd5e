//! Sitemap-Batcher: product URL discovery from sitemap indexes
//!
//! This crate fetches a root sitemap index, fans out over the child sitemaps
//! relevant to a keyword, partitions the discovered page URLs into fixed-size
//! batches and writes them to an object store as a single JSON artifact.

pub mod config;
pub mod crawler;
pub mod output;
pub mod pipeline;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for Sitemap-Batcher operations
#[derive(Debug, Error)]
pub enum BatcherError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch root sitemap index {url}: {source}")]
    DiscoveryRoot { url: String, source: FetchError },

    #[error("Failed to encode batches: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid pipeline transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::PipelineStage,
        to: state::PipelineStage,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selection pattern: {0}")]
    InvalidPattern(#[from] PatternError),
}

/// Errors raised while fetching and parsing a single sitemap document
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("XML parse error for {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Fetch task for {url} did not complete: {message}")]
    Task { url: String, message: String },
}

/// Errors raised while parsing a selection pattern
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("pattern '{0}' contains an empty path segment")]
    EmptySegment(String),
}

/// Result type alias for Sitemap-Batcher operations
pub type Result<T> = std::result::Result<T, BatcherError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{filter_by_keyword, ChildOutcome, Crawler, DiscoveredSet, Fetcher, HttpFetcher};
pub use output::{partition, Batch, ExportArtifact, Exporter, PipelineReport};
pub use pipeline::{run_pipeline, Pipeline};
pub use state::PipelineStage;
pub use storage::ObjectStore;
