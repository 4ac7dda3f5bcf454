//! IP intelligence data structures.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Geolocation of an IP address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geolocation {
    /// Country name
    pub country: Option<String>,
    /// City name
    pub city: Option<String>,
    /// Region / subdivision name
    pub region: Option<String>,
    /// Latitude
    pub latitude: Option<f64>,
    /// Longitude
    pub longitude: Option<f64>,
}

impl Geolocation {
    /// True when at least one field is populated.
    pub fn has_data(&self) -> bool {
        self.country.is_some()
            || self.city.is_some()
            || self.region.is_some()
            || self.latitude.is_some()
            || self.longitude.is_some()
    }
}

/// Autonomous-system / hosting information for an IP address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AsnInfo {
    /// AS number
    pub number: Option<u32>,
    /// AS name (short identifier, e.g. "CLOUDFLARENET")
    pub name: Option<String>,
    /// Operating organization (e.g. "Cloudflare, Inc.")
    pub organization: Option<String>,
}

impl AsnInfo {
    /// True when at least one field is populated.
    pub fn has_data(&self) -> bool {
        self.number.is_some() || self.name.is_some() || self.organization.is_some()
    }

    /// The best available organization label: organization, falling back to
    /// the AS name.
    pub fn org_label(&self) -> Option<&str> {
        self.organization.as_deref().or(self.name.as_deref())
    }
}

/// Reputation verdict for an IP address.
///
/// Absence of evidence is not evidence of maliciousness: when no source has
/// anything on an address, the verdict is clean with `source = "default"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reputation {
    /// True when no source flagged the address
    pub is_clean: bool,
    /// Explicit malicious flag, when a source gave a verdict
    pub is_malicious: Option<bool>,
    /// Source-specific threat score (0-100)
    pub threat_score: Option<u8>,
    /// Threat categories reported by the source
    pub categories: Vec<String>,
    /// Which source produced this verdict
    pub source: String,
}

impl Reputation {
    /// A clean verdict with no source evidence.
    pub fn clean_default() -> Self {
        Reputation {
            is_clean: true,
            is_malicious: Some(false),
            threat_score: None,
            categories: Vec::new(),
            source: "default".to_string(),
        }
    }
}

/// Everything the analyzer learned about one IP address.
///
/// Every enrichment field is optional: sub-lookup failures leave their field
/// unset rather than failing the analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpAnalysis {
    /// The analyzed address
    pub ip: String,
    /// Geolocation, when a provider had data
    pub geolocation: Option<Geolocation>,
    /// ASN / hosting info, when a provider had data
    pub asn: Option<AsnInfo>,
    /// Reputation verdict
    pub reputation: Option<Reputation>,
    /// PTR hostname, when one exists
    pub reverse_dns: Option<String>,
}

impl IpAnalysis {
    /// An analysis with nothing but the address itself.
    pub fn bare(ip: impl Into<String>) -> Self {
        IpAnalysis {
            ip: ip.into(),
            geolocation: None,
            asn: None,
            reputation: None,
            reverse_dns: None,
        }
    }

    /// The fixed analysis for private/reserved addresses.
    ///
    /// Private addresses never go through external lookups; they resolve to
    /// this placeholder and a clean reputation.
    pub fn private(ip: impl Into<String>) -> Self {
        IpAnalysis {
            ip: ip.into(),
            geolocation: Some(Geolocation {
                country: Some("Private IP".to_string()),
                city: Some("Local Network".to_string()),
                ..Geolocation::default()
            }),
            asn: None,
            reputation: Some(Reputation {
                is_clean: true,
                is_malicious: Some(false),
                threat_score: None,
                categories: Vec::new(),
                source: "private-range".to_string(),
            }),
            reverse_dns: None,
        }
    }
}

/// True for addresses in private, loopback, link-local, or otherwise
/// non-routable ranges.
pub fn is_private_address(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_private() || v4.is_loopback() || v4.is_link_local() || v4.is_unspecified()
        }
        IpAddr::V6(v6) => {
            let segments = v6.segments();
            v6.is_loopback()
                || v6.is_unspecified()
                // fc00::/7 unique local
                || (segments[0] & 0xfe00) == 0xfc00
                // fe80::/10 link local
                || (segments[0] & 0xffc0) == 0xfe80
        }
    }
}
