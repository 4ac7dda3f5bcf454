//! HTTP client initialization.
//!
//! This module provides functions to initialize the HTTP clients used for
//! DoH queries and for intelligence provider traffic.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;

fn user_agent() -> String {
    format!("dns_sentry/{}", env!("CARGO_PKG_VERSION"))
}

/// Initializes the HTTP client used for DoH resolver queries.
///
/// Redirects are disabled: a resolver endpoint that redirects is not
/// answering the query, and following it would blur which resolver actually
/// produced an answer.
///
/// # Errors
///
/// Returns a wrapped `reqwest::Error` if client creation fails.
pub fn init_doh_client(
    config: &Config,
) -> Result<Arc<reqwest::Client>, crate::error_handling::InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(user_agent())
        .build()?;
    Ok(Arc::new(client))
}

/// Initializes the HTTP client used for intelligence lookups
/// (geolocation/ASN and reputation providers).
///
/// # Errors
///
/// Returns a wrapped `reqwest::Error` if client creation fails.
pub fn init_intel_client(
    config: &Config,
) -> Result<Arc<reqwest::Client>, crate::error_handling::InitializationError> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(user_agent())
        .build()?;
    Ok(Arc::new(client))
}
