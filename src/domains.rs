//! Domain list input.
//!
//! The watcher consumes a line-oriented file (or stdin), one monitored
//! domain per line:
//!
//! ```text
//! example.com
//! example.org,NS
//! shop.example.com,A,Storefront,production
//! # comments and blank lines are skipped
//! ```
//!
//! Invalid lines are logged and skipped; they never abort the cycle.

use std::path::Path;

use anyhow::{Context, Result};

use crate::error_handling::{ErrorType, ProcessingStats};
use crate::models::{DomainSpec, RecordType};

/// Parses one line of the domain list.
///
/// Fields are comma-separated: `domain[,record_type[,display_name[,category]]]`.
/// Returns `None` for comments, blank lines, and invalid entries.
pub fn parse_domain_line(line: &str, default_type: RecordType) -> Option<DomainSpec> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let mut fields = trimmed.split(',').map(str::trim);
    let domain = fields.next()?.to_ascii_lowercase();
    if !is_valid_domain(&domain) {
        log::warn!("Skipping invalid domain list entry: {trimmed}");
        return None;
    }

    let record_type = match fields.next() {
        Some("") | None => default_type,
        Some(raw) => match raw.parse() {
            Ok(rt) => rt,
            Err(e) => {
                log::warn!("Skipping domain list entry for {domain}: {e}");
                return None;
            }
        },
    };

    let display_name = fields.next().filter(|s| !s.is_empty()).map(str::to_string);
    let category = fields.next().filter(|s| !s.is_empty()).map(str::to_string);

    Some(DomainSpec {
        domain,
        record_type,
        display_name,
        category,
    })
}

/// Loads domain specs from `path`, or from stdin when `path` is `-`.
///
/// # Errors
///
/// Fails only when the input itself cannot be read; individual bad lines are
/// counted and skipped.
pub async fn load_domain_specs(
    path: &Path,
    default_type: RecordType,
    stats: &ProcessingStats,
) -> Result<Vec<DomainSpec>> {
    let content = if path.as_os_str() == "-" {
        use tokio::io::AsyncReadExt;
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .context("Failed to read domain list from stdin")?;
        buffer
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read domain list: {}", path.display()))?
    };

    let mut specs = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match parse_domain_line(trimmed, default_type) {
            Some(spec) => specs.push(spec),
            None => stats.increment_error(ErrorType::InvalidDomainSpec),
        }
    }
    Ok(specs)
}

/// Syntactic domain validation.
///
/// Accepts dotted names of alphanumeric/hyphen labels; rejects empty labels,
/// hyphen-edged labels, and over-long names. Deliberately permissive beyond
/// that; the resolvers are the real arbiters of what exists.
pub fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > 253 || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}
