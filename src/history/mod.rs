//! Record history persistence.
//!
//! The rest of the engine sees history as a minimal key-value capability:
//! `get`/`put` over bytes, keyed by `dns:{domain}:{record_type}`. That keeps
//! the change detector testable against an in-memory fake and portable
//! across storage backends. The value payload is a JSON-serialized
//! [`HistoryRecord`].

mod memory;
mod sqlite;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error_handling::HistoryStoreError;
use crate::models::RecordType;

pub use memory::InMemoryHistoryStore;
pub use sqlite::SqliteHistoryStore;

/// The last-known record set for one `(domain, record_type)` key.
///
/// Owned exclusively by the change detector: created on the first successful
/// check and overwritten on every subsequent successful check, whether or
/// not a change was detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Domain this record belongs to
    pub domain: String,
    /// Record type this record belongs to
    pub record_type: RecordType,
    /// The value set observed by the last successful check
    pub values: Vec<String>,
    /// Timestamp of the last successful check (epoch milliseconds)
    pub observed_at_ms: i64,
}

impl HistoryRecord {
    /// Serializes the record for storage.
    pub fn to_bytes(&self) -> Result<Vec<u8>, HistoryStoreError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Deserializes a stored record.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HistoryStoreError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Builds the store key for a `(domain, record_type)` pair.
///
/// Both parts are required: the same domain may be tracked under several
/// record types at once, each with an independent history.
pub fn history_key(domain: &str, record_type: RecordType) -> String {
    format!("dns:{}:{}", domain, record_type)
}

/// Minimal key-value capability the engine requires from a history backend.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Reads the stored value for `key`, or `None` if the key is unseen.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, HistoryStoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &[u8]) -> Result<(), HistoryStoreError>;
}
