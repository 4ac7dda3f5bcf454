//! IP reputation lookup.
//!
//! The primary source is AbuseIPDB, active only when an API key is
//! configured. On failure (or with no key) a static table of known-bad
//! address prefixes is consulted. No match anywhere defaults to a clean
//! verdict: absence of evidence is not evidence of maliciousness.

use anyhow::Result;
use serde::Deserialize;

use super::types::Reputation;
use super::IntelConfig;
use crate::error_handling::{ErrorType, ProcessingStats};

/// Confidence score at or above which an address counts as malicious.
const MALICIOUS_CONFIDENCE_THRESHOLD: u8 = 50;

/// Address prefixes with standing bad reputation, used when the remote
/// source is unavailable. Matching is plain string-prefix over the textual
/// address.
const KNOWN_BAD_PREFIXES: &[(&str, &str)] = &[
    ("185.220.101.", "tor-exit"),
    ("185.220.102.", "tor-exit"),
    ("5.188.206.", "botnet"),
    ("194.165.16.", "brute-force"),
    ("91.240.118.", "malware-distribution"),
    ("45.155.205.", "ransomware"),
];

#[derive(Debug, Deserialize)]
struct AbuseIpDbResponse {
    data: AbuseIpDbData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AbuseIpDbData {
    abuse_confidence_score: u8,
    total_reports: Option<u32>,
    usage_type: Option<String>,
}

/// Looks up the reputation of a public address.
///
/// Never fails: remote errors fall back to the static table, and the static
/// table falls back to the clean default.
pub async fn lookup_reputation(
    client: &reqwest::Client,
    config: &IntelConfig,
    ip: &str,
    stats: &ProcessingStats,
) -> Reputation {
    if let Some(api_key) = config.abuse_api_key.as_deref() {
        match abuseipdb_lookup(client, &config.reputation_url, api_key, ip).await {
            Ok(reputation) => return reputation,
            Err(e) => {
                log::warn!("Reputation lookup failed for {ip}: {e:#}");
                stats.increment_error(ErrorType::ReputationLookupError);
            }
        }
    }

    static_table_lookup(ip).unwrap_or_else(Reputation::clean_default)
}

async fn abuseipdb_lookup(
    client: &reqwest::Client,
    endpoint: &str,
    api_key: &str,
    ip: &str,
) -> Result<Reputation> {
    let body: AbuseIpDbResponse = client
        .get(endpoint)
        .query(&[("ipAddress", ip), ("maxAgeInDays", "90")])
        .header("Key", api_key)
        .header("Accept", "application/json")
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let score = body.data.abuse_confidence_score;
    let malicious = score >= MALICIOUS_CONFIDENCE_THRESHOLD;
    let mut categories = Vec::new();
    if let Some(usage) = body.data.usage_type {
        categories.push(usage);
    }
    if body.data.total_reports.unwrap_or(0) > 0 {
        categories.push("abuse-reports".to_string());
    }

    Ok(Reputation {
        is_clean: !malicious,
        is_malicious: Some(malicious),
        threat_score: Some(score),
        categories,
        source: "abuseipdb".to_string(),
    })
}

fn static_table_lookup(ip: &str) -> Option<Reputation> {
    KNOWN_BAD_PREFIXES
        .iter()
        .find(|(prefix, _)| ip.starts_with(prefix))
        .map(|(_, category)| Reputation {
            is_clean: false,
            is_malicious: Some(true),
            threat_score: Some(100),
            categories: vec![category.to_string()],
            source: "static-list".to_string(),
        })
}
