//! Progress logging utilities.

use log::info;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Logs progress information about the running check cycle.
pub fn log_progress(
    start_time: std::time::Instant,
    completed: &Arc<AtomicUsize>,
    failed: &Arc<AtomicUsize>,
    total: usize,
) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let done = completed.load(Ordering::SeqCst);
    let failures = failed.load(Ordering::SeqCst);
    let rate = if elapsed_secs > 0.0 {
        (done + failures) as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Checked {}/{} domains ({} failed) in {:.2} seconds (~{:.2} checks/sec)",
        done + failures,
        total,
        failures,
        elapsed_secs,
        rate
    );
}
