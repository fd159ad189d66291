use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Weather settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,

    /// Local state storage settings
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Endpoint returning current general conditions
    pub realtime_url: String,

    /// Endpoint returning the multi-day outlook
    pub forecast_url: String,

    /// Number of forecast days to display (including today)
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,

    /// Reference latitude used when no location grant is available
    #[serde(default = "default_reference_latitude")]
    pub reference_latitude: f64,

    /// Reference longitude used when no location grant is available
    #[serde(default = "default_reference_longitude")]
    pub reference_longitude: f64,
}

fn default_forecast_days() -> u32 {
    4
}

// East Coast Park, the community's home beach
fn default_reference_latitude() -> f64 {
    1.3008
}

fn default_reference_longitude() -> f64 {
    103.9122
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            realtime_url: "https://api.data.gov.sg/v1/environment/24-hour-weather-forecast"
                .to_string(),
            forecast_url: "https://api.data.gov.sg/v1/environment/4-day-weather-forecast"
                .to_string(),
            forecast_days: default_forecast_days(),
            reference_latitude: default_reference_latitude(),
            reference_longitude: default_reference_longitude(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Animate stat counters toward their target value
    #[serde(default = "default_animate_counters")]
    pub animate_counters: bool,

    /// Counter animation duration in milliseconds
    #[serde(default = "default_counter_duration_ms")]
    pub counter_duration_ms: u64,
}

fn default_animate_counters() -> bool {
    true
}

fn default_counter_duration_ms() -> u64 {
    900
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            animate_counters: default_animate_counters(),
            counter_duration_ms: default_counter_duration_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the persisted state document
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shorecrew");
        Self { data_dir }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shorecrew");

        Self {
            config_dir,
            weather: WeatherConfig::default(),
            ui: UiConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(
            &self.weather.realtime_url,
            "weather.realtime_url",
            &mut result,
        );
        self.validate_url(
            &self.weather.forecast_url,
            "weather.forecast_url",
            &mut result,
        );

        if self.weather.forecast_days == 0 {
            result.add_error("weather.forecast_days", "Must display at least one day");
        } else if self.weather.forecast_days > 7 {
            result.add_warning(
                "weather.forecast_days",
                "More than 7 days exceeds what the outlook endpoint provides",
            );
        }

        if !(-90.0..=90.0).contains(&self.weather.reference_latitude) {
            result.add_error(
                "weather.reference_latitude",
                "Latitude must be between -90 and 90",
            );
        }
        if !(-180.0..=180.0).contains(&self.weather.reference_longitude) {
            result.add_error(
                "weather.reference_longitude",
                "Longitude must be between -180 and 180",
            );
        }

        if self.ui.animate_counters && self.ui.counter_duration_ms == 0 {
            result.add_warning(
                "ui.counter_duration_ms",
                "Zero duration disables counter animation (counters will snap)",
            );
        } else if self.ui.counter_duration_ms > 10_000 {
            result.add_warning(
                "ui.counter_duration_ms",
                "Counter animation longer than 10 seconds",
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }

                if let Some(port) = url.port() {
                    if port == 0 {
                        result.add_error(field_name, "Port cannot be 0");
                    }
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("shorecrew");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(
            result.is_valid(),
            "Default config should be valid: {:?}",
            result.errors
        );
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.weather.realtime_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "weather.realtime_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.weather.forecast_url = "ftp://localhost:8080".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_forecast_days() {
        let mut config = Config::default();
        config.weather.forecast_days = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "weather.forecast_days"));
    }

    #[test]
    fn test_out_of_range_reference_location() {
        let mut config = Config::default();
        config.weather.reference_latitude = 120.0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result
            .errors
            .iter()
            .any(|e| e.field == "weather.reference_latitude"));
    }

    #[test]
    fn test_zero_counter_duration_is_warning() {
        let mut config = Config::default();
        config.ui.counter_duration_ms = 0;
        let result = config.validate();
        // Counters snapping is a supported render strategy, not an error
        assert!(result.is_valid());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.field == "ui.counter_duration_ms"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::default();
        let contents = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&contents).unwrap();
        assert_eq!(parsed.weather.realtime_url, config.weather.realtime_url);
        assert_eq!(parsed.weather.forecast_days, config.weather.forecast_days);
        assert_eq!(parsed.ui.animate_counters, config.ui.animate_counters);
    }
}
