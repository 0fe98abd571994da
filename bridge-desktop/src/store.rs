//! Response Store Implementations
//!
//! Two backends for the `ResponseStore` trait: a SQLite-backed store for
//! persistent on-device caching and a HashMap-backed store for hosts
//! without persistence (and for tests).

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    store::ResponseStore,
};
use bytes::Bytes;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, error};

/// SQLite implementation of `ResponseStore`.
///
/// A single `response_cache` table keyed by cache key; saves are upserts,
/// so concurrent writers resolve last-write-wins per key.
pub struct SqliteResponseStore {
    pool: SqlitePool,
}

impl SqliteResponseStore {
    /// Open (or create) a store backed by the given database file.
    pub async fn open(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| BridgeError::StoreFailed(format!("failed to open {:?}: {}", path, e)))?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Open a store backed by an in-memory database.
    ///
    /// Pinned to a single connection: each SQLite in-memory connection is
    /// its own database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new().filename(":memory:");

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| BridgeError::StoreFailed(format!("failed to open memory db: {}", e)))?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Default on-disk location for the response cache database.
    pub fn default_path(app_name: &str) -> Option<PathBuf> {
        dirs::data_local_dir().map(|dir| dir.join(app_name).join("response_cache.sqlite"))
    }

    async fn initialize(&self) -> Result<()> {
        debug!("Initializing response cache store");

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS response_cache (
                cache_key TEXT PRIMARY KEY NOT NULL,
                payload BLOB NOT NULL,
                stored_at INTEGER NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to create response_cache table: {}", e);
            BridgeError::StoreFailed(format!("failed to initialize store: {}", e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl ResponseStore for SqliteResponseStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let row = sqlx::query("SELECT payload FROM response_cache WHERE cache_key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| BridgeError::StoreFailed(format!("failed to query entry: {}", e)))?;

        match row {
            Some(row) => {
                let payload: Vec<u8> = row
                    .try_get("payload")
                    .map_err(|e| BridgeError::StoreFailed(format!("invalid payload column: {}", e)))?;
                Ok(Some(Bytes::from(payload)))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, key: &str, payload: Bytes) -> Result<()> {
        sqlx::query(
            "INSERT INTO response_cache (cache_key, payload, stored_at) VALUES (?, ?, ?)
             ON CONFLICT(cache_key) DO UPDATE SET
                payload = excluded.payload,
                stored_at = excluded.stored_at",
        )
        .bind(key)
        .bind(payload.to_vec())
        .bind(chrono::Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| BridgeError::StoreFailed(format!("failed to save entry: {}", e)))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM response_cache WHERE cache_key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| BridgeError::StoreFailed(format!("failed to delete entry: {}", e)))?;

        Ok(())
    }
}

/// In-memory implementation of `ResponseStore`.
#[derive(Default)]
pub struct InMemoryResponseStore {
    entries: RwLock<HashMap<String, Bytes>>,
}

impl InMemoryResponseStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResponseStore for InMemoryResponseStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, payload: Bytes) -> Result<()> {
        self.entries.write().await.insert(key.to_string(), payload);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
