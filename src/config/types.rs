//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_DB_PATH, DEFAULT_MAX_CONCURRENCY, DEFAULT_TIMEOUT_SECS};
use crate::models::RecordType;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Watcher configuration.
///
/// Doubles as the CLI definition (clap derive) and the library configuration
/// struct; library callers construct it via `Default` and field updates.
///
/// # Examples
///
/// ```no_run
/// use dns_sentry::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("domains.txt"),
///     max_concurrency: 5,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dns_sentry",
    version,
    about = "Watches domains for DNS record changes across independent resolvers and scores the hijacking risk of observed changes."
)]
pub struct Config {
    /// File with domains to watch, one per line:
    /// `domain[,record_type[,display_name[,category]]]`. Use "-" for stdin.
    pub file: PathBuf,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// History database path (SQLite file)
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// Keep history in memory only; nothing is persisted between runs
    #[arg(long)]
    pub ephemeral: bool,

    /// Maximum concurrent domain checks
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Per-request HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// DoH resolver endpoint as `name=url`; repeat to override the default
    /// Cloudflare/Google/Quad9 set
    #[arg(long = "resolver", value_name = "NAME=URL")]
    pub resolvers: Vec<String>,

    /// Default record type for domain list lines that do not specify one
    #[arg(long, value_enum, default_value = "a")]
    pub record_type: RecordType,

    /// Check at most N domains this cycle (for capped environments)
    #[arg(long, value_name = "N")]
    pub max_domains: Option<usize>,

    /// Skip the IP intelligence and risk scoring stage
    #[arg(long)]
    pub no_analysis: bool,

    /// Write JSONL results to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("domains.txt"),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            ephemeral: false,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            resolvers: Vec::new(),
            record_type: RecordType::A,
            max_domains: None,
            no_analysis: false,
            output: None,
        }
    }
}
