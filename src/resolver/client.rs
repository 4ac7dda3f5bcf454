//! DoH resolver client.
//!
//! Issues a single cache-defeating JSON DoH query against one resolver
//! endpoint and normalizes the answer into a plain list of record values.

use anyhow::{anyhow, Result};
use reqwest::header::{ACCEPT, CACHE_CONTROL, PRAGMA};

use super::types::{DohResponse, ResolverEndpoint};
use crate::models::RecordType;

/// Queries one resolver endpoint for one domain/record-type pair.
///
/// The request carries a random `_cb` token and no-cache headers so every
/// call reaches the resolver instead of an intermediate cache. Answer
/// entries whose record-type code does not match the requested type are
/// discarded; CNAME/NS hostnames have their trailing dot trimmed.
///
/// # Errors
///
/// Returns an error on a non-2xx transport status, a non-zero DNS status in
/// the body, or a body that fails to parse. Callers treat any of these as a
/// failure of *this resolver only* and convert it to an empty vote.
pub async fn query_resolver(
    client: &reqwest::Client,
    endpoint: &ResolverEndpoint,
    domain: &str,
    record_type: RecordType,
) -> Result<Vec<String>> {
    let cache_buster = format!("{:016x}", rand::random::<u64>());

    let response = client
        .get(&endpoint.url)
        .query(&[
            ("name", domain),
            ("type", record_type.as_str()),
            ("_cb", cache_buster.as_str()),
        ])
        .header(ACCEPT, "application/dns-json")
        .header(CACHE_CONTROL, "no-cache")
        .header(PRAGMA, "no-cache")
        .send()
        .await?
        .error_for_status()?;

    let body: DohResponse = response.json().await?;

    if body.status != 0 {
        return Err(anyhow!(
            "resolver {} returned DNS status {} for {} {}",
            endpoint.name,
            body.status,
            domain,
            record_type
        ));
    }

    let values = body
        .answer
        .unwrap_or_default()
        .into_iter()
        .filter(|entry| entry.record_type == record_type.wire_code())
        .map(|entry| normalize_value(&entry.data, record_type))
        .collect();

    Ok(values)
}

/// Strips the trailing dot from hostname-valued records.
///
/// Resolvers disagree on whether CNAME/NS targets end with the root dot;
/// normalizing here keeps set comparisons from flagging a cosmetic change.
fn normalize_value(data: &str, record_type: RecordType) -> String {
    match record_type {
        RecordType::Cname | RecordType::Ns => data.trim_end_matches('.').to_string(),
        RecordType::A | RecordType::Aaaa => data.to_string(),
    }
}
