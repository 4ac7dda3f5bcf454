//! End-of-cycle statistics output.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, ProcessingStats};

/// Prints a breakdown of contained failures seen during the cycle.
///
/// Only non-zero counters are listed; a clean cycle prints a single line.
pub fn print_error_statistics(stats: &ProcessingStats) {
    let total = stats.total_errors();
    if total == 0 {
        info!("No contained failures during this cycle");
        return;
    }

    info!("Contained failures this cycle ({total} total):");
    for error_type in ErrorType::iter() {
        let count = stats.get_error_count(error_type);
        if count > 0 {
            info!("  {}: {}", error_type.as_str(), count);
        }
    }
}
