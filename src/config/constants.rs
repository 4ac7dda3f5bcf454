//! Configuration constants.
//!
//! This module defines all configuration constants used throughout the
//! application, including timeouts, default resolver endpoints, and other
//! operational parameters.

use std::time::Duration;

/// Maximum concurrent domain checks (semaphore limit).
///
/// Checks are network-bound and cheap; 10 keeps a full cycle fast without
/// hammering the public resolvers from one source address.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Per-request HTTP timeout in seconds (DoH and intelligence traffic).
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Per-domain check timeout in seconds.
///
/// Formula: resolver fan-out (10s, bounded by the HTTP timeout) + history
/// round-trip (<1s) + IP analysis for both value sets (2 x 10s worst case) +
/// buffer = ~45s. A check that exceeds this is reported failed without
/// touching sibling checks.
pub const CHECK_TIMEOUT: Duration = Duration::from_secs(45);

/// PTR lookup timeout in seconds.
///
/// Most reverse lookups complete in well under a second; failing fast here
/// matters because a missing PTR is itself a scoring signal.
pub const DNS_TIMEOUT_SECS: u64 = 3;

/// Progress logging interval in seconds.
pub const LOGGING_INTERVAL_SECS: u64 = 5;

/// Default SQLite history database path.
pub const DEFAULT_DB_PATH: &str = "./dns_sentry.db";

/// Default JSON DoH resolver endpoints, queried in this order.
///
/// The order is load-bearing: consensus tie-breaks go to the first group
/// encountered in this order, so it must be stable run-to-run.
pub const DEFAULT_RESOLVERS: &[(&str, &str)] = &[
    ("cloudflare", "https://cloudflare-dns.com/dns-query"),
    ("google", "https://dns.google/resolve"),
    ("quad9", "https://dns.quad9.net:5053/dns-query"),
];

/// Environment variable holding the optional AbuseIPDB API key.
///
/// When unset, reputation lookups skip the remote source and fall back to
/// the built-in known-bad prefix table.
pub const ABUSEIPDB_API_KEY_ENV: &str = "ABUSEIPDB_API_KEY";
