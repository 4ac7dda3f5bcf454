//! PTR resolver initialization.
//!
//! This module provides the classic DNS resolver used for reverse (PTR)
//! lookups during IP intelligence analysis. Forward resolution goes through
//! the DoH resolver client instead.

use std::sync::Arc;
use std::time::Duration;

use crate::error_handling::InitializationError;
use hickory_resolver::TokioAsyncResolver;

/// Initializes the DNS resolver for reverse (PTR) lookups.
///
/// Uses the default resolver configuration with aggressive timeouts: a
/// missing PTR record is itself a signal the risk scorer consumes, so slow
/// reverse lookups should fail fast rather than stall a whole analysis
/// batch.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if construction fails
/// (which the default configuration should not).
pub fn init_resolver() -> Result<Arc<TokioAsyncResolver>, InitializationError> {
    use hickory_resolver::config::{ResolverConfig, ResolverOpts};

    let mut opts = ResolverOpts::default();
    opts.timeout = Duration::from_secs(crate::config::DNS_TIMEOUT_SECS);
    opts.attempts = 2;
    // ndots = 0 prevents search-domain appending on bare names
    opts.ndots = 0;

    Ok(Arc::new(TokioAsyncResolver::tokio(
        ResolverConfig::default(),
        opts,
    )))
}
