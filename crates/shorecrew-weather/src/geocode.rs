//! Reverse geocoding: convert coordinates to a human-readable place name.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use crate::types::UserLocation;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "Shorecrew/0.1.0 (beach cleanup dashboard)";

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    address: Option<NominatimAddress>,
}

#[derive(Debug, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    suburb: Option<String>,
    county: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

/// Reverse geocode coordinates to a place name for the location summary
/// (e.g. "East Coast, Singapore").
/// Returns `None` on failure or timeout; the caller can fall back to
/// showing raw coordinates.
pub async fn reverse_geocode(location: &UserLocation) -> Option<String> {
    let client = match Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to create geocoding client: {}", e);
            return None;
        }
    };

    let url = format!(
        "{}?lat={}&lon={}&format=json&addressdetails=1&layer=address&zoom=12",
        NOMINATIM_URL, location.latitude, location.longitude
    );

    let response = match client.get(&url).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!("Reverse geocode request failed: {}", e);
            return None;
        }
    };

    if !response.status().is_success() {
        tracing::debug!("Reverse geocode returned status {}", response.status());
        return None;
    }

    let body: NominatimResponse = match response.json().await {
        Ok(b) => b,
        Err(e) => {
            tracing::debug!("Reverse geocode parse error: {}", e);
            return None;
        }
    };

    let addr = body.address?;

    let country = addr.country.clone();

    // Prefer the most local name available
    let place = addr
        .suburb
        .or(addr.city)
        .or(addr.town)
        .or(addr.village)
        .or(addr.county)
        .or(addr.state)
        .or(addr.country)?;

    let result = match country {
        Some(c) if !c.is_empty() && c != place => format!("{}, {}", place, c),
        _ => place,
    };

    tracing::info!("Reverse geocoded to: {}", result);
    Some(result)
}
