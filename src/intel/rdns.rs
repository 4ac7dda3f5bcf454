//! Reverse DNS (PTR) lookup.

use std::net::IpAddr;

use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::{ErrorType, ProcessingStats};

/// Performs a PTR lookup for an IP address.
///
/// Returns the first PTR name with its trailing dot trimmed. An address
/// without a PTR record is a normal `None` (and a scoring signal
/// downstream); only actual resolution failures are logged and counted.
pub async fn reverse_dns_lookup(
    resolver: &TokioAsyncResolver,
    ip: IpAddr,
    stats: &ProcessingStats,
) -> Option<String> {
    match resolver.reverse_lookup(ip).await {
        Ok(response) => response
            .iter()
            .next()
            .map(|name| name.to_utf8().trim_end_matches('.').to_string()),
        Err(e) => {
            // no PTR published is the common case, not a failure
            if matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) {
                return None;
            }
            log::warn!("Reverse DNS lookup failed for {ip}: {e}");
            stats.increment_error(ErrorType::ReverseDnsLookupError);
            None
        }
    }
}
