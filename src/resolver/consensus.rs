//! Consensus over independent resolvers.
//!
//! Queries every configured resolver concurrently and derives two signals:
//! whether the resolvers disagree (the hijack indicator) and which answer
//! set to treat as ground truth for the rest of the check.

use futures::future::join_all;

use super::client::query_resolver;
use super::types::{ConsensusResult, ResolverAnswer, ResolverEndpoint};
use crate::models::RecordType;

/// Queries all endpoints for one domain and computes the consensus.
///
/// Resolver failures are contained here: a failed endpoint contributes an
/// empty vote and bumps `failures`, and never aborts the sibling queries.
/// Answers are kept in endpoint configuration order, which makes the
/// majority tie-break deterministic.
pub async fn resolve_with_consensus(
    client: &reqwest::Client,
    endpoints: &[ResolverEndpoint],
    domain: &str,
    record_type: RecordType,
) -> ConsensusResult {
    let queries = endpoints.iter().map(|endpoint| async move {
        match query_resolver(client, endpoint, domain, record_type).await {
            Ok(values) => (
                ResolverAnswer {
                    resolver: endpoint.name.clone(),
                    values,
                },
                false,
            ),
            Err(e) => {
                log::warn!(
                    "Resolver {} failed for {} {}: {:#}",
                    endpoint.name,
                    domain,
                    record_type,
                    e
                );
                (
                    ResolverAnswer {
                        resolver: endpoint.name.clone(),
                        values: Vec::new(),
                    },
                    true,
                )
            }
        }
    });

    // join_all preserves input order, so per_resolver stays in config order
    let outcomes = join_all(queries).await;
    let failures = outcomes.iter().filter(|(_, failed)| *failed).count();
    let per_resolver: Vec<ResolverAnswer> =
        outcomes.into_iter().map(|(answer, _)| answer).collect();

    let discrepancy = detect_discrepancy(&per_resolver);
    let values = select_consensus(&per_resolver);

    ConsensusResult {
        values,
        discrepancy,
        per_resolver,
        failures,
    }
}

/// True when two or more non-empty answers differ as sets.
///
/// Comparison is order-independent: each answer is sorted before comparing,
/// so `{a, b}` and `{b, a}` never count as a disagreement. Fewer than two
/// non-empty answers can't disagree.
pub fn detect_discrepancy(answers: &[ResolverAnswer]) -> bool {
    let normalized: Vec<Vec<String>> = answers
        .iter()
        .filter(|a| !a.values.is_empty())
        .map(|a| sorted(&a.values))
        .collect();

    if normalized.len() < 2 {
        return false;
    }

    normalized.windows(2).any(|pair| pair[0] != pair[1])
}

/// Selects the most common non-empty answer as ground truth.
///
/// Non-empty answers are grouped by their sorted-and-joined representation;
/// the largest group wins and its first member's values are returned in
/// their original order. Ties go to the group encountered first in resolver
/// configuration order. Returns an empty vec when every answer is empty.
pub fn select_consensus(answers: &[ResolverAnswer]) -> Vec<String> {
    // (group key, vote count, index of first answer in the group)
    let mut groups: Vec<(String, usize, usize)> = Vec::new();

    for (index, answer) in answers.iter().enumerate() {
        if answer.values.is_empty() {
            continue;
        }
        let key = sorted(&answer.values).join("\n");
        match groups.iter_mut().find(|(k, _, _)| *k == key) {
            Some((_, count, _)) => *count += 1,
            None => groups.push((key, 1, index)),
        }
    }

    let mut winner: Option<(usize, usize)> = None;
    for &(_, count, index) in &groups {
        // strictly-greater keeps the first-encountered group on ties
        if winner.map_or(true, |(best, _)| count > best) {
            winner = Some((count, index));
        }
    }

    match winner {
        Some((_, index)) => answers[index].values.clone(),
        None => Vec::new(),
    }
}

fn sorted(values: &[String]) -> Vec<String> {
    let mut copy = values.to_vec();
    copy.sort();
    copy
}
