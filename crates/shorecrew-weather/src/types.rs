use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Weather condition categories mapped from the forecast's free text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Thunderstorm,
    Rain,
    PartlyCloudy,
    Cloudy,
    Clear,
    Windy,
    #[default]
    Unknown,
}

impl WeatherCondition {
    /// Classify a condition phrase by case-insensitive substring match.
    ///
    /// Priority order matters: "Windy with thundery showers" is a
    /// thunderstorm, and "Partly cloudy" must not land on the plain cloud
    /// branch.
    pub fn from_text(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("thunder") {
            Self::Thunderstorm
        } else if text.contains("rain") || text.contains("shower") || text.contains("drizzle") {
            Self::Rain
        } else if text.contains("partly cloudy") || text.contains("partly sunny") {
            Self::PartlyCloudy
        } else if text.contains("cloud") || text.contains("overcast") {
            Self::Cloudy
        } else if text.contains("clear") || text.contains("sun") || text.contains("fair") {
            Self::Clear
        } else if text.contains("wind") || text.contains("breez") {
            Self::Windy
        } else {
            Self::Unknown
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "Thunderstorm",
            Self::Rain => "Rain",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Clear => "Clear",
            Self::Windy => "Windy",
            Self::Unknown => "Mixed",
        }
    }

    /// Display glyph for forecast cards
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "⛈",
            Self::Rain => "🌧",
            Self::PartlyCloudy => "⛅",
            Self::Cloudy => "☁",
            Self::Clear => "☀",
            Self::Windy => "🌬",
            Self::Unknown => "🌊",
        }
    }
}

/// One-shot position from the locator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: Option<f64>,
}

/// A single normalized forecast day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    /// Raw condition phrase from the source (or a default)
    pub condition_text: String,
    pub condition: WeatherCondition,
    pub humidity_low: u8,
    pub humidity_high: u8,
    pub temp_low: f64,
    pub temp_high: f64,
    pub wind_kph: f64,
}

/// Which branch of the pipeline produced the forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastSource {
    Live,
    Mock,
}

/// A complete forecast bundle, replaced wholesale on every fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub days: Vec<ForecastDay>,
    pub source: ForecastSource,
    pub fetched_at: DateTime<Utc>,
}

impl Forecast {
    /// The best day for a cleanup: always the earliest, by convention.
    pub fn best_day(&self) -> Option<&ForecastDay> {
        self.days.first()
    }
}

/// Locator errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Location permission not granted")]
    PermissionDenied,
    #[error("Invalid location: {0}")]
    Invalid(String),
}

/// Forecast pipeline errors. These never escape `ForecastProvider::fetch`;
/// they decide which branch (live or mock) the caller gets.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Endpoint returned status {0}")]
    Status(u16),
    #[error("Invalid endpoint URL: {0}")]
    Endpoint(String),
    #[error("Parse error: {0}")]
    Parse(String),
}
