//! dns_sentry library: DNS hijack watching functionality
//!
//! This library watches a set of domains for DNS record changes. Each check
//! queries several independent DoH resolvers, derives a consensus and
//! discrepancy verdict, compares the result against per-domain history, and
//! and, when an address set changed, enriches both the old and new addresses
//! with geolocation, hosting, reputation, and reverse-DNS intelligence
//! before scoring the risk of the change.
//!
//! # Example
//!
//! ```no_run
//! use dns_sentry::{run_watch, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: std::path::PathBuf::from("domains.txt"),
//!     max_concurrency: 5,
//!     ..Default::default()
//! };
//!
//! let report = run_watch(config).await?;
//! println!("Checked {} domains: {} changed, {} discrepancies",
//!          report.total_domains, report.changed, report.discrepancies);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod app;
pub mod check;
pub mod config;
pub mod domains;
pub mod error_handling;
pub mod export;
pub mod history;
pub mod initialization;
pub mod intel;
mod models;
pub mod resolver;
pub mod risk;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use models::{CheckResult, DomainSpec, RecordType};
pub use run::{run_watch, WatchReport};

// Internal run module (contains the main watch-cycle logic)
mod run {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use anyhow::{Context, Result};
    use futures::stream::FuturesUnordered;
    use futures::StreamExt;
    use log::{info, warn};
    use tokio::sync::Semaphore;

    use crate::app::{log_progress, print_error_statistics};
    use crate::check::{check_domain, CheckContext};
    use crate::config::{
        Config, ABUSEIPDB_API_KEY_ENV, CHECK_TIMEOUT, DEFAULT_RESOLVERS, LOGGING_INTERVAL_SECS,
    };
    use crate::domains::load_domain_specs;
    use crate::error_handling::{ErrorType, ProcessingStats};
    use crate::export::{open_output, write_results_jsonl};
    use crate::history::{HistoryStore, InMemoryHistoryStore, SqliteHistoryStore};
    use crate::initialization::{init_doh_client, init_intel_client, init_resolver};
    use crate::intel::IntelConfig;
    use crate::models::{CheckResult, DomainSpec};
    use crate::resolver::ResolverEndpoint;

    /// Results of one watch cycle.
    ///
    /// Contains summary statistics about the completed cycle.
    #[derive(Debug, Clone)]
    pub struct WatchReport {
        /// Number of domains checked this cycle (after any `--max-domains` trim)
        pub total_domains: usize,
        /// Number of checks reporting a changed value set (excluding first checks)
        pub changed: usize,
        /// Number of checks where resolvers disagreed
        pub discrepancies: usize,
        /// Number of checks that failed (error set or task panicked)
        pub failed: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Runs one watch cycle with the provided configuration.
    ///
    /// This is the main entry point for the library. It reads the domain
    /// list, checks every domain concurrently (bounded by
    /// `max_concurrency`), writes JSONL results to the configured output,
    /// and returns a summary report.
    ///
    /// Per-domain failures never fail the cycle; they surface through each
    /// result's `error` field and the report's `failed` count.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The domain list cannot be read
    /// - A resolver endpoint override cannot be parsed
    /// - The history database cannot be opened
    /// - Network resources cannot be initialized
    /// - The output sink cannot be created or written
    pub async fn run_watch(config: Config) -> Result<WatchReport> {
        let endpoints = resolver_endpoints(&config)?;
        info!(
            "Using {} resolvers: {}",
            endpoints.len(),
            endpoints
                .iter()
                .map(|e| e.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let error_stats = Arc::new(ProcessingStats::new());

        let mut specs = load_domain_specs(&config.file, config.record_type, &error_stats)
            .await
            .context("Failed to read domain list")?;
        if let Some(max) = config.max_domains {
            if specs.len() > max {
                warn!(
                    "Domain list has {} entries; trimming to {} for this cycle",
                    specs.len(),
                    max
                );
                specs.truncate(max);
            }
        }
        let total_domains = specs.len();
        info!("Watching {} domain(s)", total_domains);

        let store: Arc<dyn HistoryStore> = if config.ephemeral {
            info!("Running ephemeral: history is kept in memory only");
            Arc::new(InMemoryHistoryStore::new())
        } else {
            Arc::new(
                SqliteHistoryStore::open(&config.db_path)
                    .await
                    .context("Failed to open history database")?,
            )
        };

        let doh_client = init_doh_client(&config).context("Failed to initialize DoH client")?;
        let intel_client =
            init_intel_client(&config).context("Failed to initialize intelligence client")?;
        let resolver = init_resolver().context("Failed to initialize PTR resolver")?;

        let abuse_api_key = std::env::var(ABUSEIPDB_API_KEY_ENV).ok();
        if abuse_api_key.is_some() {
            info!("AbuseIPDB reputation lookups enabled");
        }
        if config.no_analysis {
            info!("IP intelligence analysis disabled for this cycle");
        }

        let ctx = Arc::new(CheckContext {
            doh_client,
            intel_client,
            resolver,
            endpoints,
            store,
            error_stats: Arc::clone(&error_stats),
            intel: IntelConfig {
                abuse_api_key,
                ..IntelConfig::default()
            },
            enable_analysis: !config.no_analysis,
        });

        let start_time = std::time::Instant::now();
        let semaphore = Arc::new(Semaphore::new(config.max_concurrency.max(1)));
        let completed = Arc::new(AtomicUsize::new(0));
        let failed = Arc::new(AtomicUsize::new(0));

        let logging_task = {
            let completed = Arc::clone(&completed);
            let failed = Arc::clone(&failed);
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(std::time::Duration::from_secs(
                    LOGGING_INTERVAL_SECS,
                ));
                interval.tick().await; // first tick fires immediately; skip it
                loop {
                    interval.tick().await;
                    log_progress(start_time, &completed, &failed, total_domains);
                }
            })
        };

        let mut tasks = FuturesUnordered::new();
        for spec in specs {
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    warn!("Semaphore closed, skipping domain: {}", spec.domain);
                    continue;
                }
            };

            let ctx = Arc::clone(&ctx);
            tasks.push(tokio::spawn(async move {
                let _permit = permit;
                match tokio::time::timeout(CHECK_TIMEOUT, check_domain(&ctx, &spec)).await {
                    Ok(result) => result,
                    Err(_) => {
                        warn!(
                            "Check timed out for {} {} after {} seconds",
                            spec.domain,
                            spec.record_type,
                            CHECK_TIMEOUT.as_secs()
                        );
                        ctx.error_stats.increment_error(ErrorType::CheckTimeout);
                        timed_out_result(&spec)
                    }
                }
            }));
        }

        let mut results: Vec<CheckResult> = Vec::with_capacity(total_domains);
        while let Some(joined) = tasks.next().await {
            match joined {
                Ok(result) => {
                    if result.error.is_some() {
                        failed.fetch_add(1, Ordering::SeqCst);
                    } else {
                        completed.fetch_add(1, Ordering::SeqCst);
                    }
                    results.push(result);
                }
                Err(join_error) => {
                    failed.fetch_add(1, Ordering::SeqCst);
                    warn!("Check task panicked: {:?}", join_error);
                }
            }
        }

        logging_task.abort();
        log_progress(start_time, &completed, &failed, total_domains);

        // stable output order regardless of completion order
        results.sort_by(|a, b| {
            (a.domain.as_str(), a.record_type.as_str())
                .cmp(&(b.domain.as_str(), b.record_type.as_str()))
        });

        let mut writer = open_output(config.output.as_deref())?;
        let written =
            write_results_jsonl(&mut writer, &results).context("Failed to write results")?;
        log::debug!("Wrote {written} result line(s)");

        print_error_statistics(&error_stats);

        let changed = results
            .iter()
            .filter(|r| r.has_changed && !r.is_first_check && r.error.is_none())
            .count();
        let discrepancies = results.iter().filter(|r| r.discrepancy).count();

        Ok(WatchReport {
            total_domains,
            changed,
            discrepancies,
            failed: failed.load(Ordering::SeqCst),
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
        })
    }

    fn resolver_endpoints(config: &Config) -> Result<Vec<ResolverEndpoint>> {
        if config.resolvers.is_empty() {
            return Ok(DEFAULT_RESOLVERS
                .iter()
                .map(|(name, url)| ResolverEndpoint::new(*name, *url))
                .collect());
        }
        config
            .resolvers
            .iter()
            .map(|entry| {
                ResolverEndpoint::parse(entry)
                    .with_context(|| format!("Invalid --resolver value: {entry}"))
            })
            .collect()
    }

    fn timed_out_result(spec: &DomainSpec) -> CheckResult {
        CheckResult {
            domain: spec.domain.clone(),
            record_type: spec.record_type,
            display_name: spec.display_name.clone(),
            category: spec.category.clone(),
            observed_at_ms: chrono::Utc::now().timestamp_millis(),
            is_first_check: false,
            // absence of data is worth flagging, not silently skipping
            has_changed: true,
            previous_values: Vec::new(),
            current_values: Vec::new(),
            discrepancy: false,
            per_resolver: Vec::new(),
            error: Some(format!(
                "check timed out after {} seconds",
                CHECK_TIMEOUT.as_secs()
            )),
            previous_analysis: None,
            current_analysis: None,
            risk: None,
            elapsed_ms: CHECK_TIMEOUT.as_millis() as u64,
        }
    }
}
