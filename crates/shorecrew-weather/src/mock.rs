//! Deterministic fallback forecast.
//!
//! Served whenever the live pipeline fails, so the dashboard always has
//! renderable conditions. Same inputs, same output: a fixed rotation of
//! condition phrases with fixed bands, dated from today forward.

use chrono::{Duration, Local, Utc};

use crate::types::{Forecast, ForecastDay, ForecastSource, WeatherCondition};

/// Condition rotation for the fallback days
pub const MOCK_CONDITIONS: [&str; 4] = ["Partly Cloudy", "Thundery Showers", "Fair", "Windy"];

/// Default humidity band (%) when the source omits the field
pub const DEFAULT_HUMIDITY: (u8, u8) = (60, 85);

/// Default temperature band (°C) when the source omits the field
pub const DEFAULT_TEMPERATURE: (f64, f64) = (24.0, 31.0);

/// Default wind speed (km/h) when the source omits the field
pub const DEFAULT_WIND_KPH: f64 = 12.0;

/// Build the mock forecast for `days` days starting today.
pub fn forecast(days: usize) -> Forecast {
    let today = Local::now().date_naive();

    let days = (0..days)
        .map(|i| ForecastDay {
            date: today + Duration::days(i as i64),
            condition_text: MOCK_CONDITIONS[i % MOCK_CONDITIONS.len()].to_string(),
            condition: WeatherCondition::from_text(MOCK_CONDITIONS[i % MOCK_CONDITIONS.len()]),
            humidity_low: DEFAULT_HUMIDITY.0,
            humidity_high: DEFAULT_HUMIDITY.1,
            temp_low: DEFAULT_TEMPERATURE.0,
            temp_high: DEFAULT_TEMPERATURE.1,
            wind_kph: DEFAULT_WIND_KPH,
        })
        .collect();

    Forecast {
        days,
        source: ForecastSource::Mock,
        fetched_at: Utc::now(),
    }
}
