//! In-memory history backend.
//!
//! Used by tests and by `--ephemeral` runs where persistence between cycles
//! is not wanted.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::HistoryStore;
use crate::error_handling::HistoryStoreError;

/// A `HistoryStore` backed by a process-local map.
#[derive(Default)]
pub struct InMemoryHistoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryHistoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when no key has been written yet.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, HistoryStoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), HistoryStoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
