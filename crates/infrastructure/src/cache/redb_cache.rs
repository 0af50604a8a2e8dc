//! Redb embedded cache implementation
//!
//! Persistent key-value store backing the call-site cache, so forecasts and
//! reports survive between CLI invocations. Each entry carries its own
//! expiry time.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use application::{error::ApplicationError, ports::CachePort};
use async_trait::async_trait;
use bincode::{Decode, Encode};
use redb::{Database, DatabaseError, ReadableDatabase, ReadableTable, TableDefinition};
use tracing::{debug, instrument, warn};

/// Table definition for cache entries
const CACHE_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("cache");

/// Entry wrapper that includes expiration time
#[derive(Debug, Encode, Decode)]
struct CacheEntry {
    /// Serialized value as bytes
    data: Vec<u8>,
    /// Expiration timestamp (Unix epoch seconds)
    expires_at: u64,
}

impl CacheEntry {
    fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at
    }
}

/// Redb-based persistent cache
///
/// # Auto-Recovery
///
/// If the database file is corrupted or incompatible, it is deleted and
/// recreated. A file held open by another process is reported as an error
/// and left alone.
pub struct RedbCache {
    db: Arc<Database>,
    path: PathBuf,
}

impl std::fmt::Debug for RedbCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbCache")
            .field("db", &"<Database>")
            .field("path", &self.path)
            .finish()
    }
}

impl RedbCache {
    /// Open (or create) the cache database at `path`
    ///
    /// Expired entries are pruned on open.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is locked by another process or
    /// cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ApplicationError> {
        let path_buf = path.as_ref().to_path_buf();

        if let Some(parent) = path_buf.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                ApplicationError::Internal(format!(
                    "Failed to create cache directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let db = match Database::create(&path_buf) {
            Ok(db) => db,
            Err(DatabaseError::DatabaseAlreadyOpen) => {
                return Err(ApplicationError::Internal(format!(
                    "Cache database {} is in use",
                    path_buf.display()
                )));
            },
            Err(e) => {
                warn!(
                    path = %path_buf.display(),
                    error = %e,
                    "Cache database corrupted or incompatible, recreating"
                );
                if path_buf.exists() {
                    fs::remove_file(&path_buf).map_err(|e| {
                        ApplicationError::Internal(format!(
                            "Failed to remove corrupted cache database: {e}"
                        ))
                    })?;
                }
                Database::create(&path_buf).map_err(|e| {
                    ApplicationError::Internal(format!("Failed to create Redb database: {e}"))
                })?
            },
        };

        let cache = Self {
            db: Arc::new(db),
            path: path_buf,
        };
        cache.prune_expired()?;
        Ok(cache)
    }

    /// Location of the database file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn now_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs())
    }

    /// Remove expired and undecodable entries, creating the table if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the write transaction fails.
    pub fn prune_expired(&self) -> Result<u64, ApplicationError> {
        let now = Self::now_timestamp();

        let write_txn = self.db.begin_write().map_err(|e| {
            ApplicationError::Internal(format!("Failed to begin write transaction: {e}"))
        })?;

        let removed = {
            let mut table = write_txn.open_table(CACHE_TABLE).map_err(|e| {
                ApplicationError::Internal(format!("Failed to open cache table: {e}"))
            })?;

            let stale: Vec<Vec<u8>> = table
                .iter()
                .map_err(|e| ApplicationError::Internal(format!("Redb iteration error: {e}")))?
                .filter_map(Result::ok)
                .filter(|(_, value)| {
                    let decoded = bincode::decode_from_slice::<CacheEntry, _>(
                        value.value(),
                        bincode::config::standard(),
                    );
                    !matches!(decoded, Ok((entry, _)) if !entry.is_expired(now))
                })
                .map(|(key, _)| key.value().to_vec())
                .collect();

            for key in &stale {
                table
                    .remove(key.as_slice())
                    .map_err(|e| ApplicationError::Internal(format!("Redb remove error: {e}")))?;
            }
            stale.len() as u64
        };

        write_txn.commit().map_err(|e| {
            ApplicationError::Internal(format!("Failed to commit cleanup transaction: {e}"))
        })?;

        if removed > 0 {
            debug!(removed, "Pruned expired cache entries");
        }
        Ok(removed)
    }

    async fn remove(&self, key: &str) -> Result<(), ApplicationError> {
        let db = self.db.clone();
        let key_bytes = key.as_bytes().to_vec();

        tokio::task::spawn_blocking(move || {
            let write_txn = db.begin_write()?;
            {
                let mut table = write_txn.open_table(CACHE_TABLE)?;
                table.remove(key_bytes.as_slice())?;
            }
            write_txn.commit()?;
            Ok::<_, redb::Error>(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(format!("Task join error: {e}")))?
        .map_err(|e| ApplicationError::Internal(format!("Redb remove error: {e}")))
    }
}

#[async_trait]
impl CachePort for RedbCache {
    #[instrument(skip(self), level = "debug")]
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, ApplicationError> {
        let db = self.db.clone();
        let key_bytes = key.as_bytes().to_vec();

        // Redb operations are blocking
        let result = tokio::task::spawn_blocking(move || {
            let read_txn = db.begin_read()?;
            let table = read_txn.open_table(CACHE_TABLE)?;
            Ok::<_, redb::Error>(table.get(key_bytes.as_slice())?.map(|v| v.value().to_vec()))
        })
        .await
        .map_err(|e| ApplicationError::Internal(format!("Task join error: {e}")))?
        .map_err(|e| ApplicationError::Internal(format!("Redb get error: {e}")))?;

        let Some(bytes) = result else {
            debug!(key = %key, "Cache miss (Redb)");
            return Ok(None);
        };

        let (entry, _): (CacheEntry, _) =
            bincode::decode_from_slice(&bytes, bincode::config::standard()).map_err(|e| {
                ApplicationError::Internal(format!("Cache entry deserialize error: {e}"))
            })?;

        if entry.is_expired(Self::now_timestamp()) {
            // Lazy deletion
            self.remove(key).await?;
            debug!(key = %key, "Cache entry expired");
            return Ok(None);
        }

        debug!(key = %key, "Cache hit (Redb)");
        Ok(Some(entry.data))
    }

    #[instrument(skip(self, value), level = "debug")]
    async fn set_bytes(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), ApplicationError> {
        let entry = CacheEntry {
            data: value,
            expires_at: Self::now_timestamp().saturating_add(ttl.as_secs()),
        };
        let entry_bytes = bincode::encode_to_vec(&entry, bincode::config::standard())
            .map_err(|e| ApplicationError::Internal(format!("Entry serialize error: {e}")))?;

        let db = self.db.clone();
        let key_bytes = key.as_bytes().to_vec();

        tokio::task::spawn_blocking(move || {
            let write_txn = db.begin_write()?;
            {
                let mut table = write_txn.open_table(CACHE_TABLE)?;
                table.insert(key_bytes.as_slice(), entry_bytes.as_slice())?;
            }
            write_txn.commit()?;
            Ok::<_, redb::Error>(())
        })
        .await
        .map_err(|e| ApplicationError::Internal(format!("Task join error: {e}")))?
        .map_err(|e| ApplicationError::Internal(format!("Redb insert error: {e}")))?;

        debug!(key = %key, ttl_secs = ttl.as_secs(), "Cache set (Redb)");
        Ok(())
    }
}
