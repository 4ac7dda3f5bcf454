//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `dns_sentry` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use dns_sentry::initialization::init_logger_with;
use dns_sentry::{run_watch, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env (if present) so ABUSEIPDB_API_KEY
    // can live there instead of being exported manually
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    match run_watch(config).await {
        Ok(report) => {
            eprintln!(
                "Checked {} domain{} in {:.1}s: {} changed, {} discrepanc{}, {} failed",
                report.total_domains,
                if report.total_domains == 1 { "" } else { "s" },
                report.elapsed_seconds,
                report.changed,
                report.discrepancies,
                if report.discrepancies == 1 { "y" } else { "ies" },
                report.failed
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("dns_sentry error: {:#}", e);
            process::exit(1);
        }
    }
}
