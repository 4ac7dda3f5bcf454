//! SQLite history backend.
//!
//! A single `dns_history` table acts as the key-value store. The schema is
//! created at open time; there is nothing to migrate beyond that.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

use super::HistoryStore;
use crate::error_handling::HistoryStoreError;

/// A `HistoryStore` backed by a SQLite database file.
pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    /// Opens (creating if missing) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns `HistoryStoreError` when the file cannot be created or the
    /// schema statement fails.
    pub async fn open(path: &Path) -> Result<Self, HistoryStoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    /// Opens a store from a SQLite URL (used by tests with `sqlite::memory:`).
    pub async fn connect(url: &str) -> Result<Self, HistoryStoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| HistoryStoreError::OpenError(e.to_string()))?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> Result<Self, HistoryStoreError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS dns_history (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL,
                updated_at_ms INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, HistoryStoreError> {
        let row = sqlx::query("SELECT value FROM dns_history WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get::<Vec<u8>, _>(0)))
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), HistoryStoreError> {
        sqlx::query(
            "INSERT INTO dns_history (key, value, updated_at_ms) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at_ms = excluded.updated_at_ms",
        )
        .bind(key)
        .bind(value)
        .bind(chrono::Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
