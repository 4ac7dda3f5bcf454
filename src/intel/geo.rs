//! Geolocation and ASN lookup with provider fallback.
//!
//! Two public JSON providers are tried in order; the first one that returns
//! usable data wins. Both failing leaves the fields unset; geolocation is
//! an enrichment, never a requirement.

use anyhow::{anyhow, Result};
use serde::Deserialize;

use super::types::{AsnInfo, Geolocation};
use super::IntelConfig;
use crate::error_handling::{ErrorType, ProcessingStats};

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    country: Option<String>,
    #[serde(rename = "regionName")]
    region_name: Option<String>,
    city: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    /// e.g. "AS13335 Cloudflare, Inc."
    #[serde(rename = "as")]
    asn: Option<String>,
    #[serde(rename = "asname")]
    as_name: Option<String>,
    org: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IpWhoIsResponse {
    success: bool,
    country: Option<String>,
    region: Option<String>,
    city: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    connection: Option<IpWhoIsConnection>,
}

#[derive(Debug, Deserialize)]
struct IpWhoIsConnection {
    asn: Option<u32>,
    org: Option<String>,
    isp: Option<String>,
}

/// Looks up geolocation and ASN data for a public address.
///
/// Providers are consulted in configured order; a provider that fails or
/// answers without usable data yields to the next. Failures are logged and
/// counted here, never propagated.
pub async fn lookup_geo_asn(
    client: &reqwest::Client,
    config: &IntelConfig,
    ip: &str,
    stats: &ProcessingStats,
) -> (Option<Geolocation>, Option<AsnInfo>) {
    match ip_api_lookup(client, &config.geo_primary_url, ip).await {
        Ok((geo, asn)) if geo.is_some() || asn.is_some() => return (geo, asn),
        Ok(_) => log::debug!("Primary geo provider had no data for {ip}"),
        Err(e) => {
            log::warn!("Primary geo lookup failed for {ip}: {e:#}");
            stats.increment_error(ErrorType::GeoLookupError);
        }
    }

    match ipwhois_lookup(client, &config.geo_fallback_url, ip).await {
        Ok((geo, asn)) if geo.is_some() || asn.is_some() => (geo, asn),
        Ok(_) => {
            log::debug!("Fallback geo provider had no data for {ip}");
            (None, None)
        }
        Err(e) => {
            log::warn!("Fallback geo lookup failed for {ip}: {e:#}");
            stats.increment_error(ErrorType::GeoLookupError);
            (None, None)
        }
    }
}

async fn ip_api_lookup(
    client: &reqwest::Client,
    base_url: &str,
    ip: &str,
) -> Result<(Option<Geolocation>, Option<AsnInfo>)> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), ip);
    let body: IpApiResponse = client
        .get(&url)
        .query(&[(
            "fields",
            "status,message,country,regionName,city,lat,lon,as,asname,org",
        )])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    if body.status != "success" {
        return Err(anyhow!(
            "provider rejected lookup: {}",
            body.message.unwrap_or_else(|| "no message".to_string())
        ));
    }

    let geolocation = Geolocation {
        country: body.country,
        city: body.city,
        region: body.region_name,
        latitude: body.lat,
        longitude: body.lon,
    };

    // "AS13335 Cloudflare, Inc." carries the number; asname/org carry labels
    let number = body
        .asn
        .as_deref()
        .and_then(|s| s.split_whitespace().next())
        .and_then(|token| token.strip_prefix("AS"))
        .and_then(|digits| digits.parse().ok());
    let asn = AsnInfo {
        number,
        name: body.as_name,
        organization: body.org,
    };

    Ok((
        geolocation.has_data().then_some(geolocation),
        asn.has_data().then_some(asn),
    ))
}

async fn ipwhois_lookup(
    client: &reqwest::Client,
    base_url: &str,
    ip: &str,
) -> Result<(Option<Geolocation>, Option<AsnInfo>)> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), ip);
    let body: IpWhoIsResponse = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    if !body.success {
        return Err(anyhow!("provider reported an unsuccessful lookup"));
    }

    let geolocation = Geolocation {
        country: body.country,
        city: body.city,
        region: body.region,
        latitude: body.latitude,
        longitude: body.longitude,
    };

    let asn = match body.connection {
        Some(connection) => AsnInfo {
            number: connection.asn,
            name: connection.isp,
            organization: connection.org,
        },
        None => AsnInfo::default(),
    };

    Ok((
        geolocation.has_data().then_some(geolocation),
        asn.has_data().then_some(asn),
    ))
}
