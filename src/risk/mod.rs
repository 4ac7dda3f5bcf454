//! Risk scoring for observed IP changes.
//!
//! A pure, additive point model over the enriched previous/current address
//! sets. Deliberately simple: this is the auditable step of the pipeline and
//! must be reproducible from its two inputs alone. No I/O happens here.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::intel::IpAnalysis;

/// Points per current address flagged malicious.
const MALICIOUS_ADDRESS_POINTS: u32 = 50;
/// Points when the current set reaches a country the previous set never had.
const GEO_CHANGE_POINTS: u32 = 20;
/// Additional points when a newly-seen country is on the high-risk list.
const HIGH_RISK_COUNTRY_POINTS: u32 = 30;
/// Points when a new hosting organization appears.
const NEW_ORGANIZATION_POINTS: u32 = 15;
/// Points when no current address has a PTR record.
const MISSING_PTR_POINTS: u32 = 25;

/// Score thresholds for medium / high / critical.
const MEDIUM_THRESHOLD: u32 = 25;
const HIGH_THRESHOLD: u32 = 50;
const CRITICAL_THRESHOLD: u32 = 80;

/// Countries whose sudden appearance in a resolution set is weighted extra.
pub const HIGH_RISK_COUNTRIES: &[&str] = &[
    "North Korea",
    "Iran",
    "Syria",
    "Russia",
    "Belarus",
    "Venezuela",
];

/// Qualitative risk level of an observed change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Routine change
    Low,
    /// Worth a look
    Medium,
    /// Investigate promptly
    High,
    /// Likely hostile
    Critical,
}

impl RiskLevel {
    /// The fixed operator recommendation for this level.
    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskLevel::Low => {
                "No action needed: change is consistent with routine infrastructure maintenance."
            }
            RiskLevel::Medium => {
                "Review the change and confirm it with the domain or infrastructure owner."
            }
            RiskLevel::High => {
                "Investigate promptly: verify DNS records at the registrar and check for unauthorized changes."
            }
            RiskLevel::Critical => {
                "Immediate action required: consider blocking the domain, verifying registrar account security, and rotating exposed credentials."
            }
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        };
        f.write_str(name)
    }
}

/// The scorer's verdict on one observed change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Qualitative level derived from the total score
    pub level: RiskLevel,
    /// Human-readable lines naming each contributing factor, in firing order
    pub factors: Vec<String>,
    /// Fixed recommendation for the level
    pub recommendation: String,
}

/// Scores the change from `previous` to `current`.
///
/// Pure function of its two arguments. When nothing fires, the assessment is
/// low with a single neutral factor so consumers always have at least one
/// line to render.
pub fn assess_risk(previous: &[IpAnalysis], current: &[IpAnalysis]) -> RiskAssessment {
    let mut score: u32 = 0;
    let mut factors: Vec<String> = Vec::new();

    let malicious_count = current
        .iter()
        .filter(|analysis| {
            analysis
                .reputation
                .as_ref()
                .and_then(|r| r.is_malicious)
                .unwrap_or(false)
        })
        .count();
    if malicious_count > 0 {
        score += MALICIOUS_ADDRESS_POINTS * malicious_count as u32;
        factors.push(format!(
            "{malicious_count} current address(es) flagged malicious by reputation intelligence"
        ));
    }

    let previous_countries = country_set(previous);
    let current_countries = country_set(current);
    let new_countries: Vec<&str> = current_countries
        .difference(&previous_countries)
        .copied()
        .collect();
    if !new_countries.is_empty() {
        score += GEO_CHANGE_POINTS;
        factors.push(format!(
            "resolved addresses moved to new geographic location(s): {}",
            new_countries.join(", ")
        ));

        let high_risk: Vec<&str> = new_countries
            .iter()
            .copied()
            .filter(|country| HIGH_RISK_COUNTRIES.contains(country))
            .collect();
        if !high_risk.is_empty() {
            score += HIGH_RISK_COUNTRY_POINTS;
            factors.push(format!(
                "newly observed high-risk country: {}",
                high_risk.join(", ")
            ));
        }
    }

    let previous_orgs = organization_set(previous);
    let current_orgs = organization_set(current);
    let new_orgs: Vec<&str> = current_orgs.difference(&previous_orgs).copied().collect();
    if !new_orgs.is_empty() {
        score += NEW_ORGANIZATION_POINTS;
        factors.push(format!(
            "hosting organization changed: now served by {}",
            new_orgs.join(", ")
        ));
    }

    if !current.is_empty() && current.iter().all(|analysis| analysis.reverse_dns.is_none()) {
        score += MISSING_PTR_POINTS;
        factors.push("no current address has a reverse DNS entry".to_string());
    }

    if factors.is_empty() {
        factors.push("minor infrastructure change".to_string());
    }

    let level = level_for(score);
    RiskAssessment {
        level,
        factors,
        recommendation: level.recommendation().to_string(),
    }
}

fn level_for(score: u32) -> RiskLevel {
    if score >= CRITICAL_THRESHOLD {
        RiskLevel::Critical
    } else if score >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn country_set(analyses: &[IpAnalysis]) -> BTreeSet<&str> {
    analyses
        .iter()
        .filter_map(|a| a.geolocation.as_ref())
        .filter_map(|geo| geo.country.as_deref())
        .collect()
}

fn organization_set(analyses: &[IpAnalysis]) -> BTreeSet<&str> {
    analyses
        .iter()
        .filter_map(|a| a.asn.as_ref())
        .filter_map(|asn| asn.org_label())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intel::{AsnInfo, Geolocation, Reputation};

    fn analysis(ip: &str) -> IpAnalysis {
        IpAnalysis::bare(ip)
    }

    fn with_country(mut analysis: IpAnalysis, country: &str) -> IpAnalysis {
        analysis.geolocation = Some(Geolocation {
            country: Some(country.to_string()),
            ..Geolocation::default()
        });
        analysis
    }

    fn with_org(mut analysis: IpAnalysis, org: &str) -> IpAnalysis {
        analysis.asn = Some(AsnInfo {
            number: None,
            name: None,
            organization: Some(org.to_string()),
        });
        analysis
    }

    fn with_ptr(mut analysis: IpAnalysis, name: &str) -> IpAnalysis {
        analysis.reverse_dns = Some(name.to_string());
        analysis
    }

    fn with_clean_reputation(mut analysis: IpAnalysis) -> IpAnalysis {
        analysis.reputation = Some(Reputation::clean_default());
        analysis
    }

    fn with_malicious_reputation(mut analysis: IpAnalysis) -> IpAnalysis {
        analysis.reputation = Some(Reputation {
            is_clean: false,
            is_malicious: Some(true),
            threat_score: Some(100),
            categories: vec!["botnet".to_string()],
            source: "static-list".to_string(),
        });
        analysis
    }

    #[test]
    fn test_no_factors_yields_low_with_neutral_factor() {
        let previous = vec![with_ptr(
            with_clean_reputation(with_country(analysis("93.184.216.34"), "US")),
            "old.example.net",
        )];
        let current = vec![with_ptr(
            with_clean_reputation(with_country(analysis("93.184.216.35"), "US")),
            "new.example.net",
        )];
        let assessment = assess_risk(&previous, &current);
        assert_eq!(assessment.level, RiskLevel::Low);
        assert_eq!(assessment.factors, vec!["minor infrastructure change"]);
    }

    #[test]
    fn test_high_risk_country_move_scores_high() {
        let previous = vec![with_ptr(
            with_clean_reputation(with_country(analysis("93.184.216.34"), "US")),
            "a.example.net",
        )];
        let current = vec![with_ptr(
            with_clean_reputation(with_country(analysis("175.45.176.1"), "North Korea")),
            "b.example.net",
        )];
        let assessment = assess_risk(&previous, &current);
        // 20 (geo change) + 30 (high-risk country) = 50
        assert_eq!(assessment.level, RiskLevel::High);
        assert!(assessment
            .factors
            .iter()
            .any(|f| f.contains("new geographic location")));
        assert!(assessment
            .factors
            .iter()
            .any(|f| f.contains("high-risk country: North Korea")));
    }

    #[test]
    fn test_hijack_shaped_change_scores_critical() {
        let previous = vec![with_ptr(
            with_clean_reputation(with_org(analysis("93.184.216.34"), "EdgeCast Networks")),
            "origin.example.net",
        )];
        // malicious (+50), new org (+15), no PTR anywhere (+25) = 90
        let current = vec![with_malicious_reputation(with_org(
            analysis("5.188.206.14"),
            "Bulletproof Hosting Ltd",
        ))];
        let assessment = assess_risk(&previous, &current);
        assert_eq!(assessment.level, RiskLevel::Critical);
        assert!(assessment
            .recommendation
            .contains("Immediate action required"));
        let malicious_lines = assessment
            .factors
            .iter()
            .filter(|f| f.contains("flagged malicious"))
            .count();
        assert_eq!(malicious_lines, 1);
        assert!(assessment.factors[0].starts_with("1 current address"));
    }

    #[test]
    fn test_each_malicious_address_adds_points() {
        let current = vec![
            with_malicious_reputation(with_ptr(analysis("5.188.206.14"), "x")),
            with_malicious_reputation(with_ptr(analysis("5.188.206.15"), "y")),
        ];
        let assessment = assess_risk(&[], &current);
        // 2 x 50 = 100 before any other factor
        assert_eq!(assessment.level, RiskLevel::Critical);
        assert!(assessment.factors[0].starts_with("2 current address"));
    }

    #[test]
    fn test_new_org_alone_is_low() {
        let previous = vec![with_ptr(
            with_org(analysis("93.184.216.34"), "EdgeCast Networks"),
            "a",
        )];
        let current = vec![with_ptr(
            with_org(analysis("151.101.1.1"), "Fastly, Inc."),
            "b",
        )];
        let assessment = assess_risk(&previous, &current);
        // 15 points: below the medium threshold
        assert_eq!(assessment.level, RiskLevel::Low);
        assert!(assessment
            .factors
            .iter()
            .any(|f| f.contains("hosting organization changed")));
    }

    #[test]
    fn test_missing_ptr_requires_at_least_one_address() {
        let assessment = assess_risk(&[], &[]);
        assert_eq!(assessment.level, RiskLevel::Low);
        assert_eq!(assessment.factors, vec!["minor infrastructure change"]);
    }

    #[test]
    fn test_missing_ptr_fires_only_when_every_address_lacks_one() {
        let current_partial = vec![
            with_ptr(analysis("93.184.216.34"), "a.example.net"),
            analysis("93.184.216.35"),
        ];
        let partial = assess_risk(&[], &current_partial);
        assert!(!partial
            .factors
            .iter()
            .any(|f| f.contains("reverse DNS")));

        let current_none = vec![analysis("93.184.216.34"), analysis("93.184.216.35")];
        let none = assess_risk(&[], &current_none);
        assert!(none
            .factors
            .iter()
            .any(|f| f.contains("no current address has a reverse DNS entry")));
        assert_eq!(none.level, RiskLevel::Medium);
    }

    #[test]
    fn test_geo_and_high_risk_fire_together_with_org_change() {
        let previous = vec![with_ptr(
            with_clean_reputation(with_org(
                with_country(analysis("93.184.216.34"), "US"),
                "EdgeCast Networks",
            )),
            "a",
        )];
        let current = vec![with_ptr(
            with_clean_reputation(with_org(
                with_country(analysis("175.45.176.1"), "North Korea"),
                "Star JV",
            )),
            "b",
        )];
        let assessment = assess_risk(&previous, &current);
        // 20 + 30 + 15 = 65
        assert_eq!(assessment.level, RiskLevel::High);
        assert_eq!(assessment.factors.len(), 3);
    }

    #[test]
    fn test_levels_map_to_fixed_recommendations() {
        assert!(RiskLevel::Low.recommendation().contains("No action needed"));
        assert!(RiskLevel::Medium.recommendation().contains("Review"));
        assert!(RiskLevel::High.recommendation().contains("Investigate"));
        assert!(RiskLevel::Critical
            .recommendation()
            .contains("Immediate action required"));
    }
}
