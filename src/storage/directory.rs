//! Filesystem object store
//!
//! Buckets are directories under a root; objects are files named by key.

use crate::storage::traits::{validate_object_name, ObjectStore, StorageResult};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Object store writing to `<root>/<bucket>/<key>`
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Creates a store rooted at `root`; directories are created on write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn object_path(&self, bucket: &str, key: &str) -> StorageResult<PathBuf> {
        validate_object_name(bucket)?;
        validate_object_name(key)?;
        Ok(self.root.join(bucket).join(key))
    }
}

#[async_trait]
impl ObjectStore for DirectoryStore {
    async fn put(&self, bucket: &str, key: &str, body: &[u8]) -> StorageResult<()> {
        let path = self.object_path(bucket, key)?;
        let bucket_dir = self.root.join(bucket);
        tokio::fs::create_dir_all(&bucket_dir).await?;

        // Write beside the target and rename so readers never see a partial object
        let partial = bucket_dir.join(format!(".{}.partial", key));
        tokio::fs::write(&partial, body).await?;
        tokio::fs::rename(&partial, &path).await?;

        tracing::debug!("Wrote {} bytes to {}", body.len(), path.display());
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let path = self.object_path(bucket, key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = TempDir::new().unwrap();
        let store = DirectoryStore::new(dir.path());

        store.put("bucket", "a.json", b"{}").await.unwrap();

        assert_eq!(
            store.get("bucket", "a.json").await.unwrap(),
            Some(b"{}".to_vec())
        );
        assert!(dir.path().join("bucket").join("a.json").is_file());
        assert!(!dir.path().join("bucket").join(".a.json.partial").exists());
    }

    #[tokio::test]
    async fn test_missing_object() {
        let dir = TempDir::new().unwrap();
        let store = DirectoryStore::new(dir.path());
        assert_eq!(store.get("bucket", "nope.json").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = DirectoryStore::new(dir.path());

        store.put("bucket", "a.json", b"one").await.unwrap();
        store.put("bucket", "a.json", b"two").await.unwrap();

        assert_eq!(
            store.get("bucket", "a.json").await.unwrap(),
            Some(b"two".to_vec())
        );
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let store = DirectoryStore::new(dir.path());

        let result = store.put("..", "a.json", b"{}").await;
        assert!(matches!(result, Err(StorageError::InvalidName { .. })));
        let result = store.put("bucket", "../a.json", b"{}").await;
        assert!(matches!(result, Err(StorageError::InvalidName { .. })));
    }

    #[tokio::test]
    async fn test_unwritable_root_is_io_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();

        let store = DirectoryStore::new(&file);
        let result = store.put("bucket", "a.json", b"{}").await;
        assert!(matches!(result, Err(StorageError::Io(_))));
    }
}
