//! Core data model for domain checks.
//!
//! Defines the record types the watcher understands, the per-domain
//! configuration entry, and the structured result each check produces.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::intel::IpAnalysis;
use crate::resolver::ResolverAnswer;
use crate::risk::RiskAssessment;

/// DNS record types the watcher can monitor.
///
/// The numeric codes match the record-type field of JSON DoH answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    /// IPv4 address records
    A,
    /// IPv6 address records
    Aaaa,
    /// Alias records
    Cname,
    /// Nameserver records
    Ns,
}

impl RecordType {
    /// Returns the canonical upper-case name used in queries and keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Cname => "CNAME",
            RecordType::Ns => "NS",
        }
    }

    /// Returns the numeric record-type code used by JSON DoH responses.
    pub fn wire_code(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::Ns => 2,
            RecordType::Cname => 5,
            RecordType::Aaaa => 28,
        }
    }

    /// True for record types whose values are IP addresses (A/AAAA).
    ///
    /// Only these are eligible for IP intelligence analysis; CNAME and NS
    /// values are hostnames and never go through the analyzer.
    pub fn is_address(&self) -> bool {
        matches!(self, RecordType::A | RecordType::Aaaa)
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "AAAA" => Ok(RecordType::Aaaa),
            "CNAME" => Ok(RecordType::Cname),
            "NS" => Ok(RecordType::Ns),
            other => Err(format!("unsupported record type: {other}")),
        }
    }
}

/// One monitored domain entry, as supplied by the domain list file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSpec {
    /// Domain name to monitor
    pub domain: String,
    /// Record type to query for this domain
    pub record_type: RecordType,
    /// Optional human-friendly name for reports
    pub display_name: Option<String>,
    /// Optional grouping category (e.g. "production", "payments")
    pub category: Option<String>,
}

impl DomainSpec {
    /// Creates a spec with just a domain and record type.
    pub fn new(domain: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
            display_name: None,
            category: None,
        }
    }
}

/// The structured outcome of one domain check.
///
/// This is the engine's output contract: one of these is produced per
/// monitored domain per cycle and serialized as a JSON line for downstream
/// consumers. Consumers are expected to filter on
/// `has_changed && !is_first_check`, or on `discrepancy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Domain that was checked
    pub domain: String,
    /// Record type that was queried
    pub record_type: RecordType,
    /// Display name carried over from the domain spec
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Category carried over from the domain spec
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Check timestamp (epoch milliseconds)
    pub observed_at_ms: i64,
    /// True when no history existed for this domain/record-type key
    pub is_first_check: bool,
    /// True when the consensus value set differs from the stored baseline
    pub has_changed: bool,
    /// Value set recorded by the previous check (empty on first check)
    pub previous_values: Vec<String>,
    /// Consensus value set observed by this check
    pub current_values: Vec<String>,
    /// True when two or more resolvers returned differing non-empty answers
    pub discrepancy: bool,
    /// Raw per-resolver answers, in resolver configuration order
    pub per_resolver: Vec<ResolverAnswer>,
    /// Set when the check failed (all resolvers down, store failure, timeout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Intelligence analysis of the previous IP set (change checks only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_analysis: Option<Vec<IpAnalysis>>,
    /// Intelligence analysis of the current IP set (change checks only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_analysis: Option<Vec<IpAnalysis>>,
    /// Risk assessment derived from the two analyses (change checks only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk: Option<RiskAssessment>,
    /// Wall-clock duration of this check in milliseconds
    pub elapsed_ms: u64,
}
