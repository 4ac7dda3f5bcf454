//! Error type definitions.
//!
//! This module defines the typed errors and the contained-failure taxonomy
//! used throughout the watcher.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing an HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error initializing the PTR resolver.
    #[error("DNS resolver initialization error: {0}")]
    #[allow(dead_code)] // Reserved for future use if fallback fails
    DnsResolverError(String),

    /// A resolver endpoint override that could not be parsed.
    #[error("Invalid resolver endpoint: {0}")]
    ResolverEndpointError(String),
}

/// Error types for the history store.
///
/// Store failures are hard failures for the domain being checked, and only
/// for that domain; they surface through `CheckResult.error`.
#[derive(Error, Debug)]
pub enum HistoryStoreError {
    /// Failed to open or create the backing database.
    #[error("History store open error: {0}")]
    OpenError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// A stored record that could not be encoded or decoded.
    #[error("History record encoding error: {0}")]
    EncodingError(#[from] serde_json::Error),
}

/// Types of contained failures that can occur during a check cycle.
///
/// These categorize failures that are absorbed (empty vote, missing
/// enrichment field, failed sibling) rather than propagated; totals are
/// printed at the end of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Resolver errors
    ResolverQueryError,
    AllResolversFailed,
    // History store errors
    HistoryStoreFailure,
    // Intelligence sub-lookup errors
    GeoLookupError,
    ReputationLookupError,
    ReverseDnsLookupError,
    // Pipeline errors
    CheckTimeout,
    InvalidDomainSpec,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::ResolverQueryError => "Resolver query error",
            ErrorType::AllResolversFailed => "All resolvers failed",
            ErrorType::HistoryStoreFailure => "History store failure",
            ErrorType::GeoLookupError => "Geolocation lookup error",
            ErrorType::ReputationLookupError => "Reputation lookup error",
            ErrorType::ReverseDnsLookupError => "Reverse DNS lookup error",
            ErrorType::CheckTimeout => "Domain check timeout",
            ErrorType::InvalidDomainSpec => "Invalid domain list entry",
        }
    }
}
