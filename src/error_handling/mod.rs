//! Error types and failure statistics.
//!
//! Typed errors for initialization and the history store, plus the
//! contained-failure taxonomy counted across a check cycle.

mod stats;
mod types;

pub use stats::ProcessingStats;
pub use types::{ErrorType, HistoryStoreError, InitializationError};
