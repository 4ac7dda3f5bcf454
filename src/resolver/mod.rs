//! Resolver querying and consensus.
//!
//! This module owns the outbound DNS side of a check:
//! - a cache-defeating JSON DoH client (`client`)
//! - the multi-resolver fan-out with discrepancy detection and majority
//!   selection (`consensus`)
//!
//! A single resolver failing is never fatal here; it becomes an empty vote.

mod client;
mod consensus;
mod types;

pub use client::query_resolver;
pub use consensus::{detect_discrepancy, resolve_with_consensus, select_consensus};
pub use types::{ConsensusResult, DohAnswer, DohResponse, ResolverAnswer, ResolverEndpoint};

#[cfg(test)]
mod tests;
