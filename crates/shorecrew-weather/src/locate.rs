//! One-shot location resolve.
//!
//! Stands in for a platform location service: the user grants a position by
//! exporting `SHORECREW_LAT`/`SHORECREW_LON` before launch. No grant means
//! `PermissionDenied`; the caller is expected to fall back to the
//! configured reference location.

use crate::types::{LocationError, UserLocation};

pub const LAT_ENV: &str = "SHORECREW_LAT";
pub const LON_ENV: &str = "SHORECREW_LON";
pub const ACCURACY_ENV: &str = "SHORECREW_ACCURACY_M";

/// Resolve the user's position once.
pub async fn current_location() -> Result<UserLocation, LocationError> {
    let (lat, lon) = match (std::env::var(LAT_ENV), std::env::var(LON_ENV)) {
        (Ok(lat), Ok(lon)) => (lat, lon),
        _ => return Err(LocationError::PermissionDenied),
    };

    let latitude: f64 = lat
        .trim()
        .parse()
        .map_err(|_| LocationError::Invalid(format!("{}={}", LAT_ENV, lat)))?;
    let longitude: f64 = lon
        .trim()
        .parse()
        .map_err(|_| LocationError::Invalid(format!("{}={}", LON_ENV, lon)))?;

    if !(-90.0..=90.0).contains(&latitude) {
        return Err(LocationError::Invalid(format!(
            "latitude {} out of range",
            latitude
        )));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(LocationError::Invalid(format!(
            "longitude {} out of range",
            longitude
        )));
    }

    let accuracy_meters = std::env::var(ACCURACY_ENV)
        .ok()
        .and_then(|v| v.trim().parse().ok());

    tracing::info!("location granted: {}, {}", latitude, longitude);
    Ok(UserLocation {
        latitude,
        longitude,
        accuracy_meters,
    })
}

/// Whether a grant is present at all (without validating it).
pub fn is_available() -> bool {
    std::env::var(LAT_ENV).is_ok() && std::env::var(LON_ENV).is_ok()
}
