//! Export of batch artifacts to an object store
//!
//! The artifact is written once per run under a key derived from the UTC
//! wall-clock time at export, with second resolution.

use crate::output::Batch;
use crate::storage::ObjectStore;
use crate::BatcherError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layout embedded in object keys
const KEY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Wire shape of an exported artifact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportArtifact {
    pub batches: Vec<Batch>,
}

impl ExportArtifact {
    /// Encodes the artifact as JSON
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decodes an artifact previously written by [`ExportArtifact::to_json`]
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// Returns the object key for an export taken at `at`
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use sitemap_batcher::output::object_key_for;
///
/// let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
/// assert_eq!(object_key_for(at), "batches_2024-03-09_07-05-01.json");
/// ```
pub fn object_key_for(at: DateTime<Utc>) -> String {
    format!("batches_{}.json", at.format(KEY_TIMESTAMP_FORMAT))
}

/// Serializes batches and writes them to a fixed bucket
pub struct Exporter<'a> {
    store: &'a dyn ObjectStore,
    bucket: &'a str,
}

impl<'a> Exporter<'a> {
    /// Creates an exporter writing into `bucket` of `store`
    pub fn new(store: &'a dyn ObjectStore, bucket: &'a str) -> Self {
        Self { store, bucket }
    }

    /// Returns the destination bucket
    pub fn bucket(&self) -> &str {
        self.bucket
    }

    /// Exports `artifact` under a key derived from the current time
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The object key written
    /// * `Err(BatcherError::Serialization)` - Encoding failed
    /// * `Err(BatcherError::Storage)` - The store rejected the write
    pub async fn export(&self, artifact: &ExportArtifact) -> Result<String, BatcherError> {
        self.export_at(artifact, Utc::now()).await
    }

    /// Exports `artifact` under the key for `at`
    pub async fn export_at(
        &self,
        artifact: &ExportArtifact,
        at: DateTime<Utc>,
    ) -> Result<String, BatcherError> {
        let body = artifact.to_json().map_err(|e| {
            tracing::error!("Failed to encode {} batches: {}", artifact.batches.len(), e);
            e
        })?;

        let key = object_key_for(at);
        self.store
            .put(self.bucket, &key, &body)
            .await
            .map_err(|e| {
                tracing::error!("Failed to store {}/{}: {}", self.bucket, key, e);
                e
            })?;

        tracing::info!(
            "Exported {} batches ({} bytes) to {}/{} via {}",
            artifact.batches.len(),
            body.len(),
            self.bucket,
            key,
            self.store.describe()
        );
        Ok(key)
    }
}
