//! Change detection against stored history.
//!
//! A two-state machine per `(domain, record_type)` key: **unseen** (no
//! history record) and **tracked** (a record exists). The first successful
//! check moves a key to tracked and can never itself count as a change: a
//! domain cannot change relative to a baseline that does not exist yet,
//! which is what suppresses false alerts on first deployment.

use crate::error_handling::HistoryStoreError;
use crate::history::{history_key, HistoryRecord, HistoryStore};
use crate::models::RecordType;

/// What the detector concluded for one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeOutcome {
    /// True when no history record existed for this key before the check
    pub is_first_check: bool,
    /// True when the current value set differs from the stored baseline
    pub has_changed: bool,
    /// The stored value set (empty when the key was unseen)
    pub previous_values: Vec<String>,
}

/// Compares the consensus result against history and writes the new state.
///
/// Write-back policy: the stored record is unconditionally replaced with the
/// current observation (history reflects the latest observation, not just
/// changes) with one exception: an empty `current_values` never writes.
/// An empty observation must not destroy a good baseline, and must not
/// create an empty one.
///
/// # Errors
///
/// Store read/write failures (and undecodable stored records) propagate as
/// `HistoryStoreError`; callers treat them as a hard failure for this domain
/// only.
pub async fn detect_and_record(
    store: &dyn HistoryStore,
    domain: &str,
    record_type: RecordType,
    current_values: &[String],
    observed_at_ms: i64,
) -> Result<ChangeOutcome, HistoryStoreError> {
    let key = history_key(domain, record_type);

    let previous = match store.get(&key).await? {
        Some(bytes) => Some(HistoryRecord::from_bytes(&bytes)?),
        None => None,
    };

    let outcome = match previous {
        None => ChangeOutcome {
            is_first_check: true,
            has_changed: false,
            previous_values: Vec::new(),
        },
        Some(record) => ChangeOutcome {
            is_first_check: false,
            has_changed: !values_equal(current_values, &record.values),
            previous_values: record.values,
        },
    };

    if current_values.is_empty() {
        log::debug!("Skipping history write for {key}: empty observation");
        return Ok(outcome);
    }

    let record = HistoryRecord {
        domain: domain.to_string(),
        record_type,
        values: current_values.to_vec(),
        observed_at_ms,
    };
    store.put(&key, &record.to_bytes()?).await?;

    Ok(outcome)
}

/// Order-independent, duplicate-sensitive value set comparison.
///
/// Two value lists are equal iff their sorted copies are identical: same
/// cardinality, same multiset of members.
pub fn values_equal(a: &[String], b: &[String]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a_sorted = a.to_vec();
    let mut b_sorted = b.to_vec();
    a_sorted.sort();
    b_sorted.sort();
    a_sorted == b_sorted
}
