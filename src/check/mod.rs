//! Per-domain check pipeline.
//!
//! `check_domain` is the unit of work of a watch cycle: resolver consensus,
//! change detection against history, and (when an address set actually
//! changed) IP intelligence analysis and risk scoring. Every failure mode
//! is contained to the produced `CheckResult`; nothing here aborts sibling
//! checks.

pub mod detector;

use std::sync::Arc;

use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::{ErrorType, ProcessingStats};
use crate::history::HistoryStore;
use crate::intel::{self, IntelConfig};
use crate::models::{CheckResult, DomainSpec};
use crate::resolver::{resolve_with_consensus, ResolverEndpoint};
use crate::risk;

/// Shared resources for check tasks.
///
/// Groups the clients, store, and configuration every check needs, so task
/// spawning clones one `Arc` instead of threading a parameter list around.
pub struct CheckContext {
    /// HTTP client for DoH queries
    pub doh_client: Arc<reqwest::Client>,
    /// HTTP client for intelligence providers
    pub intel_client: Arc<reqwest::Client>,
    /// Resolver for PTR lookups
    pub resolver: Arc<TokioAsyncResolver>,
    /// DoH endpoints, in consensus tie-break order
    pub endpoints: Vec<ResolverEndpoint>,
    /// History backend
    pub store: Arc<dyn HistoryStore>,
    /// Contained-failure counters for the cycle
    pub error_stats: Arc<ProcessingStats>,
    /// Intelligence provider configuration
    pub intel: IntelConfig,
    /// When false, the analysis/scoring stage is skipped entirely
    pub enable_analysis: bool,
}

/// Runs one full check for one domain spec.
///
/// Always returns a `CheckResult`; failures surface through its `error`
/// field. The analysis stage runs only for address-type records whose value
/// set changed against an existing baseline.
pub async fn check_domain(ctx: &CheckContext, spec: &DomainSpec) -> CheckResult {
    let started = std::time::Instant::now();
    let observed_at_ms = chrono::Utc::now().timestamp_millis();

    let consensus = resolve_with_consensus(
        &ctx.doh_client,
        &ctx.endpoints,
        &spec.domain,
        spec.record_type,
    )
    .await;

    for _ in 0..consensus.failures {
        ctx.error_stats.increment_error(ErrorType::ResolverQueryError);
    }

    let mut result = CheckResult {
        domain: spec.domain.clone(),
        record_type: spec.record_type,
        display_name: spec.display_name.clone(),
        category: spec.category.clone(),
        observed_at_ms,
        is_first_check: false,
        has_changed: false,
        previous_values: Vec::new(),
        current_values: consensus.values.clone(),
        discrepancy: consensus.discrepancy,
        per_resolver: consensus.per_resolver.clone(),
        error: None,
        previous_analysis: None,
        current_analysis: None,
        risk: None,
        elapsed_ms: 0,
    };

    if consensus.all_failed() {
        log::warn!(
            "All {} resolvers failed for {} {}",
            consensus.per_resolver.len(),
            spec.domain,
            spec.record_type
        );
        ctx.error_stats.increment_error(ErrorType::AllResolversFailed);
        result.error = Some("all resolvers failed".to_string());
    }

    match detector::detect_and_record(
        ctx.store.as_ref(),
        &spec.domain,
        spec.record_type,
        &consensus.values,
        observed_at_ms,
    )
    .await
    {
        Ok(outcome) => {
            result.is_first_check = outcome.is_first_check;
            result.has_changed = outcome.has_changed;
            result.previous_values = outcome.previous_values;
        }
        Err(e) => {
            log::warn!(
                "History store failure for {} {}: {}",
                spec.domain,
                spec.record_type,
                e
            );
            ctx.error_stats.increment_error(ErrorType::HistoryStoreFailure);
            result.error = Some(format!("history store failure: {e}"));
            result.elapsed_ms = started.elapsed().as_millis() as u64;
            return result;
        }
    }

    // absence of data is worth flagging, not silently skipping
    if result.error.is_some() {
        result.has_changed = true;
        result.elapsed_ms = started.elapsed().as_millis() as u64;
        return result;
    }

    if ctx.enable_analysis
        && spec.record_type.is_address()
        && result.has_changed
        && !result.is_first_check
    {
        log::info!(
            "Record change for {} {}: analyzing {} previous / {} current address(es)",
            spec.domain,
            spec.record_type,
            result.previous_values.len(),
            result.current_values.len()
        );
        let (previous_analysis, current_analysis) = tokio::join!(
            intel::analyze_addresses(
                &ctx.intel_client,
                &ctx.resolver,
                &ctx.intel,
                &result.previous_values,
                &ctx.error_stats,
            ),
            intel::analyze_addresses(
                &ctx.intel_client,
                &ctx.resolver,
                &ctx.intel,
                &result.current_values,
                &ctx.error_stats,
            ),
        );

        result.risk = Some(risk::assess_risk(&previous_analysis, &current_analysis));
        result.previous_analysis = Some(previous_analysis);
        result.current_analysis = Some(current_analysis);
    }

    result.elapsed_ms = started.elapsed().as_millis() as u64;
    result
}
