//! Storage traits and error types
//!
//! This module defines the trait interface for object store backends and
//! associated error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid object name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Missing credentials: environment variable {0} is not set")]
    MissingCredentials(String),

    #[error("Object gateway returned HTTP {status} for {key}")]
    Status { key: String, status: u16 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for object store implementations
///
/// An object store holds opaque blobs addressed by a bucket and a key.
/// Implementations must be shareable across tasks.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes `body` under `bucket`/`key`, replacing any existing object
    async fn put(&self, bucket: &str, key: &str, body: &[u8]) -> StorageResult<()>;

    /// Reads the object stored under `bucket`/`key`
    ///
    /// # Returns
    ///
    /// * `Ok(Some(bytes))` - The stored object
    /// * `Ok(None)` - No such object
    async fn get(&self, bucket: &str, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Short human-readable description of where objects go
    fn describe(&self) -> String;
}

/// Validates a bucket name or object key
///
/// Names must be non-empty and must not contain path separators or `..`,
/// so every backend can map them onto paths and URL segments safely.
pub fn validate_object_name(name: &str) -> StorageResult<()> {
    let reason = if name.is_empty() {
        Some("name cannot be empty")
    } else if name.contains('/') || name.contains('\\') {
        Some("name cannot contain path separators")
    } else if name.contains("..") {
        Some("name cannot contain '..'")
    } else if name.chars().any(char::is_control) {
        Some("name cannot contain control characters")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(StorageError::InvalidName {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
