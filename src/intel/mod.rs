//! IP intelligence analysis.
//!
//! Enriches IPv4/IPv6 record values with geolocation, ASN/hosting,
//! reputation, and reverse-DNS data. Only address-type records ever reach
//! this module; CNAME/NS values are hostnames and are not analyzed.
//!
//! Failure isolation is the rule everywhere here: a sub-lookup failure
//! leaves its field unset, and one address's failure never affects another
//! address in the same batch.

mod geo;
mod rdns;
mod reputation;
mod types;

use futures::future::join_all;
use hickory_resolver::TokioAsyncResolver;

use crate::error_handling::ProcessingStats;

pub use types::{is_private_address, AsnInfo, Geolocation, IpAnalysis, Reputation};

/// Default base URL of the primary geolocation/ASN provider.
pub const DEFAULT_GEO_PRIMARY_URL: &str = "http://ip-api.com/json";
/// Default base URL of the fallback geolocation/ASN provider.
pub const DEFAULT_GEO_FALLBACK_URL: &str = "https://ipwho.is";
/// Default endpoint of the reputation source.
pub const DEFAULT_REPUTATION_URL: &str = "https://api.abuseipdb.com/api/v2/check";

/// Intelligence provider configuration.
///
/// Endpoints are injectable so tests can point the analyzer at mock
/// servers; production code uses `Default`.
#[derive(Debug, Clone)]
pub struct IntelConfig {
    /// Base URL of the primary geolocation/ASN provider
    pub geo_primary_url: String,
    /// Base URL of the fallback geolocation/ASN provider
    pub geo_fallback_url: String,
    /// Endpoint of the reputation source
    pub reputation_url: String,
    /// API key for the reputation source; `None` disables the remote lookup
    pub abuse_api_key: Option<String>,
}

impl Default for IntelConfig {
    fn default() -> Self {
        Self {
            geo_primary_url: DEFAULT_GEO_PRIMARY_URL.to_string(),
            geo_fallback_url: DEFAULT_GEO_FALLBACK_URL.to_string(),
            reputation_url: DEFAULT_REPUTATION_URL.to_string(),
            abuse_api_key: None,
        }
    }
}

/// Analyzes a batch of addresses concurrently.
///
/// Results come back in input order. Addresses are analyzed independently;
/// one address failing every sub-lookup still yields an entry (with unset
/// fields) and never disturbs its siblings.
pub async fn analyze_addresses(
    client: &reqwest::Client,
    resolver: &TokioAsyncResolver,
    config: &IntelConfig,
    addresses: &[String],
    stats: &ProcessingStats,
) -> Vec<IpAnalysis> {
    let analyses = addresses
        .iter()
        .map(|ip| analyze_address(client, resolver, config, ip, stats));
    join_all(analyses).await
}

/// Analyzes one address.
///
/// Private/reserved addresses short-circuit to the fixed local-network
/// analysis without any external lookup. Public addresses run their three
/// sub-lookups concurrently, each isolated from the others' failures.
pub async fn analyze_address(
    client: &reqwest::Client,
    resolver: &TokioAsyncResolver,
    config: &IntelConfig,
    ip: &str,
    stats: &ProcessingStats,
) -> IpAnalysis {
    let parsed: std::net::IpAddr = match ip.parse() {
        Ok(addr) => addr,
        Err(e) => {
            log::warn!("Skipping analysis of unparseable address {ip}: {e}");
            return IpAnalysis::bare(ip);
        }
    };

    if is_private_address(&parsed) {
        log::debug!("Address {ip} is private; skipping external lookups");
        return IpAnalysis::private(ip);
    }

    let (geo_asn, reputation, reverse_dns) = tokio::join!(
        geo::lookup_geo_asn(client, config, ip, stats),
        reputation::lookup_reputation(client, config, ip, stats),
        rdns::reverse_dns_lookup(resolver, parsed, stats),
    );
    let (geolocation, asn) = geo_asn;

    IpAnalysis {
        ip: ip.to_string(),
        geolocation,
        asn,
        reputation: Some(reputation),
        reverse_dns,
    }
}
