//! Storage module for persisting exported batches
//!
//! This module handles writing export artifacts to a durable object store:
//! - The `ObjectStore` trait consumed by the exporter
//! - A filesystem backend (bucket = directory)
//! - A SQLite backend (one blob row per object)
//! - An HTTP gateway backend with environment-sourced credentials

mod directory;
mod http;
mod schema;
mod sqlite;
mod traits;

pub use directory::DirectoryStore;
pub use http::HttpStore;
pub use sqlite::SqliteStore;
pub use traits::{validate_object_name, ObjectStore, StorageError, StorageResult};

use crate::config::{StorageBackend, StorageConfig};
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;

/// Opens the object store selected by the storage configuration
///
/// # Arguments
///
/// * `config` - The storage configuration (already validated)
/// * `client` - HTTP client reused by the http backend
///
/// # Returns
///
/// * `Ok(Arc<dyn ObjectStore>)` - The opened store
/// * `Err(StorageError)` - The database could not be opened or credentials are missing
pub fn open_store(config: &StorageConfig, client: &Client) -> StorageResult<Arc<dyn ObjectStore>> {
    let path = config.path.as_deref().unwrap_or_default();

    let store: Arc<dyn ObjectStore> = match config.backend {
        StorageBackend::Directory => Arc::new(DirectoryStore::new(path)),
        StorageBackend::Sqlite => Arc::new(SqliteStore::new(Path::new(path))?),
        StorageBackend::Http => {
            let endpoint = config.endpoint.as_deref().unwrap_or_default();
            let store = HttpStore::from_env(client.clone(), endpoint, &config.token_env)?;
            Arc::new(store)
        }
    };

    tracing::debug!("Opened object store: {}", store.describe());
    Ok(store)
}
