//! SQLite object store
//!
//! Stores exported objects as blobs in a single `objects` table.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{validate_object_name, ObjectStore, StorageError, StorageResult};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// SQLite-backed object store
pub struct SqliteStore {
    conn: Mutex<Connection>,
    location: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens or creates the database at `path`
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStore)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            location: Some(path.to_path_buf()),
        })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            location: None,
        })
    }

    /// Lists the keys stored in `bucket`, oldest first
    pub fn list_keys(&self, bucket: &str) -> StorageResult<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT key FROM objects WHERE bucket = ?1 ORDER BY stored_at, key")?;
        let keys = stmt
            .query_map(params![bucket], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

#[async_trait]
impl ObjectStore for SqliteStore {
    async fn put(&self, bucket: &str, key: &str, body: &[u8]) -> StorageResult<()> {
        validate_object_name(bucket)?;
        validate_object_name(key)?;

        let stored_at = Utc::now().to_rfc3339();
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO objects (bucket, key, body, size, stored_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(bucket, key) DO UPDATE SET
                body = excluded.body,
                size = excluded.size,
                stored_at = excluded.stored_at",
            params![bucket, key, body, body.len() as i64, stored_at],
        )?;

        tracing::debug!("Stored {} bytes as {}/{}", body.len(), bucket, key);
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> StorageResult<Option<Vec<u8>>> {
        validate_object_name(bucket)?;
        validate_object_name(key)?;

        let conn = self.lock()?;
        let body = conn
            .query_row(
                "SELECT body FROM objects WHERE bucket = ?1 AND key = ?2",
                params![bucket, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(body)
    }

    fn describe(&self) -> String {
        match &self.location {
            Some(path) => format!("sqlite {}", path.display()),
            None => "sqlite (in-memory)".to_string(),
        }
    }
}
