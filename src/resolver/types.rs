//! Resolver wire types.
//!
//! Serde structs for the JSON DoH response shape and the per-resolver
//! answer/endpoint types the consensus engine works over.

use serde::{Deserialize, Serialize};

use crate::error_handling::InitializationError;

/// A JSON DoH response body.
///
/// Only the fields the watcher consumes are modeled: the protocol status and
/// the answer section. Everything else the providers send is ignored.
#[derive(Debug, Deserialize)]
pub struct DohResponse {
    /// DNS response code; 0 is NOERROR
    #[serde(rename = "Status")]
    pub status: i32,
    /// Answer entries; absent when the name has no records of this type
    #[serde(rename = "Answer")]
    pub answer: Option<Vec<DohAnswer>>,
}

/// One entry of a JSON DoH answer section.
#[derive(Debug, Deserialize)]
pub struct DohAnswer {
    /// Numeric record-type code (A=1, NS=2, CNAME=5, AAAA=28)
    #[serde(rename = "type")]
    pub record_type: u16,
    /// Record data: an IP address, or a hostname for CNAME/NS
    pub data: String,
}

/// A configured DoH resolver endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverEndpoint {
    /// Short identifier used in logs and per-resolver output
    pub name: String,
    /// Base URL of the JSON DoH endpoint
    pub url: String,
}

impl ResolverEndpoint {
    /// Creates an endpoint from a name and URL.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Parses a CLI `name=url` override.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::ResolverEndpointError` when the entry
    /// has no `=`, an empty name, or a URL without an http(s) scheme.
    pub fn parse(entry: &str) -> Result<Self, InitializationError> {
        let (name, url) = entry
            .split_once('=')
            .ok_or_else(|| InitializationError::ResolverEndpointError(entry.to_string()))?;
        let name = name.trim();
        let url = url.trim();
        if name.is_empty() || !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(InitializationError::ResolverEndpointError(entry.to_string()));
        }
        Ok(Self::new(name, url))
    }
}

/// One resolver's answer for a single query.
///
/// `values` is empty both when the resolver answered "no records" and when
/// it failed; the consensus engine treats both as a non-vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverAnswer {
    /// Resolver identifier (endpoint name)
    pub resolver: String,
    /// Record values in the order the resolver returned them
    pub values: Vec<String>,
}

/// The outcome of querying all configured resolvers for one domain.
#[derive(Debug, Clone)]
pub struct ConsensusResult {
    /// The value set selected as ground truth, in its original answer order
    pub values: Vec<String>,
    /// True when two or more resolvers returned differing non-empty answers
    pub discrepancy: bool,
    /// Every resolver's answer, in resolver configuration order
    pub per_resolver: Vec<ResolverAnswer>,
    /// Number of resolvers that hard-failed (transport, protocol, or parse)
    pub failures: usize,
}

impl ConsensusResult {
    /// True when every configured resolver hard-failed.
    pub fn all_failed(&self) -> bool {
        !self.per_resolver.is_empty() && self.failures == self.per_resolver.len()
    }
}
