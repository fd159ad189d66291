//! The forecast pipeline: fetch, normalize, or fall back.
//!
//! Two endpoints are fetched concurrently (current general conditions and
//! the multi-day outlook) and combined into one normalized day sequence.
//! Both calls must succeed before the combined result is built; a failure
//! in either (network error, non-success status, malformed body) serves
//! the full mock fallback, never a partial result. Missing fields inside a
//! successfully parsed body are defaulted per field instead.
//!
//! `fetch` never errors from the caller's perspective. The result carries
//! an explicit source tag and the branch taken is logged.

use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::mock;
use crate::types::{
    Forecast, ForecastDay, ForecastSource, UserLocation, WeatherCondition, WeatherError,
};

const USER_AGENT: &str = "Shorecrew/0.1.0 (beach cleanup dashboard)";

/// Condition phrase used when the source omits the field
const DEFAULT_CONDITION: &str = "Fair";

#[derive(Debug, Clone)]
pub struct ForecastProvider {
    client: Arc<Client>,
    realtime_url: String,
    forecast_url: String,
    days: usize,
}

impl ForecastProvider {
    /// Build a provider against the configured endpoints.
    ///
    /// No request timeout is configured: a stalled call delays the live
    /// render, it does not trigger the fallback.
    pub fn new(
        realtime_url: impl Into<String>,
        forecast_url: impl Into<String>,
        days: usize,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client: Arc::new(client),
            realtime_url: realtime_url.into(),
            forecast_url: forecast_url.into(),
            days: days.max(1),
        })
    }

    /// Fetch the forecast for the given location (or the endpoints'
    /// reference area when `None`). Always returns something renderable.
    pub async fn fetch(&self, location: Option<&UserLocation>) -> Forecast {
        match self.fetch_live(location).await {
            Ok(days) => {
                tracing::info!(days = days.len(), "serving live forecast");
                Forecast {
                    days,
                    source: ForecastSource::Live,
                    fetched_at: Utc::now(),
                }
            }
            Err(e) => {
                tracing::warn!("live forecast failed ({}), serving mock", e);
                mock::forecast(self.days)
            }
        }
    }

    async fn fetch_live(
        &self,
        location: Option<&UserLocation>,
    ) -> Result<Vec<ForecastDay>, WeatherError> {
        // Both calls complete (or fail) before the combined normalize step
        let (realtime, outlook) = tokio::try_join!(
            self.get_json::<RealtimeResponse>(&self.realtime_url, location),
            self.get_json::<OutlookResponse>(&self.forecast_url, location),
        )?;

        Ok(normalize(
            &realtime,
            &outlook,
            Local::now().date_naive(),
            self.days,
        ))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        base: &str,
        location: Option<&UserLocation>,
    ) -> Result<T, WeatherError> {
        let url = request_url(base, location)?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        // A non-success status goes to the fallback exactly like a network
        // failure, not as a parsed-but-empty result
        if !status.is_success() {
            return Err(WeatherError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| WeatherError::Parse(e.to_string()))
    }
}

/// Append the location as query parameters when one is granted.
fn request_url(base: &str, location: Option<&UserLocation>) -> Result<Url, WeatherError> {
    let mut url = Url::parse(base).map_err(|e| WeatherError::Endpoint(e.to_string()))?;
    if let Some(loc) = location {
        url.query_pairs_mut()
            .append_pair("lat", &format!("{:.4}", loc.latitude))
            .append_pair("lon", &format!("{:.4}", loc.longitude));
    }
    Ok(url)
}

// Raw response shapes. Every field is optional so a sparse body parses and
// gets per-field defaults in `normalize` instead of failing the call.

#[derive(Debug, Default, Deserialize)]
struct RealtimeResponse {
    #[serde(default)]
    items: Vec<RealtimeItem>,
}

#[derive(Debug, Default, Deserialize)]
struct RealtimeItem {
    general: Option<GeneralReading>,
}

#[derive(Debug, Default, Deserialize)]
struct GeneralReading {
    forecast: Option<String>,
    relative_humidity: Option<RawBand>,
    temperature: Option<RawBand>,
    wind: Option<RawWind>,
}

#[derive(Debug, Default, Deserialize)]
struct RawBand {
    low: Option<f64>,
    high: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawWind {
    speed: Option<RawBand>,
}

#[derive(Debug, Default, Deserialize)]
struct OutlookResponse {
    #[serde(default)]
    items: Vec<OutlookItem>,
}

#[derive(Debug, Default, Deserialize)]
struct OutlookItem {
    #[serde(default)]
    forecasts: Vec<RawDayForecast>,
}

#[derive(Debug, Default, Deserialize)]
struct RawDayForecast {
    date: Option<NaiveDate>,
    forecast: Option<String>,
    relative_humidity: Option<RawBand>,
    temperature: Option<RawBand>,
    wind: Option<RawWind>,
}

/// Combine the current reading and the outlook into one day sequence.
///
/// Index 0 is today, built from the current reading; following days come
/// from the outlook in date order. Index 0 is the "best day for cleanup"
/// by convention (earliest day, no other ranking).
fn normalize(
    realtime: &RealtimeResponse,
    outlook: &OutlookResponse,
    today: NaiveDate,
    max_days: usize,
) -> Vec<ForecastDay> {
    let mut days = Vec::with_capacity(max_days);

    let general = realtime.items.first().and_then(|item| item.general.as_ref());
    days.push(day_from_fields(
        today,
        general.and_then(|g| g.forecast.as_deref()),
        general.and_then(|g| g.relative_humidity.as_ref()),
        general.and_then(|g| g.temperature.as_ref()),
        general.and_then(|g| g.wind.as_ref()),
    ));

    let mut rest: Vec<(NaiveDate, &RawDayForecast)> = outlook
        .items
        .first()
        .map(|item| {
            item.forecasts
                .iter()
                .enumerate()
                .map(|(i, raw)| {
                    let fallback = today + Duration::days(i as i64 + 1);
                    (raw.date.unwrap_or(fallback), raw)
                })
                .collect()
        })
        .unwrap_or_default();
    rest.sort_by_key(|(date, _)| *date);

    for (date, raw) in rest {
        // The outlook usually repeats today; the current reading wins
        if date <= today {
            continue;
        }
        if days.len() >= max_days {
            break;
        }
        days.push(day_from_fields(
            date,
            raw.forecast.as_deref(),
            raw.relative_humidity.as_ref(),
            raw.temperature.as_ref(),
            raw.wind.as_ref(),
        ));
    }

    days
}

/// Build one normalized day, defaulting each absent field independently.
fn day_from_fields(
    date: NaiveDate,
    text: Option<&str>,
    humidity: Option<&RawBand>,
    temperature: Option<&RawBand>,
    wind: Option<&RawWind>,
) -> ForecastDay {
    let condition_text = text
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_CONDITION)
        .to_string();
    let (humidity_low, humidity_high) = band(
        humidity,
        (f64::from(mock::DEFAULT_HUMIDITY.0), f64::from(mock::DEFAULT_HUMIDITY.1)),
    );
    let (temp_low, temp_high) = band(temperature, mock::DEFAULT_TEMPERATURE);
    let wind_kph = wind
        .and_then(|w| w.speed.as_ref())
        .and_then(|s| s.high.or(s.low))
        .unwrap_or(mock::DEFAULT_WIND_KPH);

    ForecastDay {
        date,
        condition: WeatherCondition::from_text(&condition_text),
        condition_text,
        humidity_low: humidity_low.round() as u8,
        humidity_high: humidity_high.round() as u8,
        temp_low,
        temp_high,
        wind_kph,
    }
}

fn band(range: Option<&RawBand>, default: (f64, f64)) -> (f64, f64) {
    match range {
        Some(r) => (r.low.unwrap_or(default.0), r.high.unwrap_or(default.1)),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn sample_realtime(forecast: &str) -> RealtimeResponse {
        RealtimeResponse {
            items: vec![RealtimeItem {
                general: Some(GeneralReading {
                    forecast: Some(forecast.to_string()),
                    relative_humidity: Some(RawBand {
                        low: Some(55.0),
                        high: Some(95.0),
                    }),
                    temperature: Some(RawBand {
                        low: Some(25.0),
                        high: Some(33.0),
                    }),
                    wind: Some(RawWind {
                        speed: Some(RawBand {
                            low: Some(10.0),
                            high: Some(20.0),
                        }),
                    }),
                }),
            }],
        }
    }

    #[test]
    fn test_request_url_without_location() {
        let url = request_url("https://example.com/v1/forecast", None).unwrap();
        assert_eq!(url.as_str(), "https://example.com/v1/forecast");
    }

    #[test]
    fn test_request_url_appends_location() {
        let loc = UserLocation {
            latitude: 1.3008,
            longitude: 103.9122,
            accuracy_meters: Some(25.0),
        };
        let url = request_url("https://example.com/v1/forecast", Some(&loc)).unwrap();
        assert!(url.as_str().contains("lat=1.3008"));
        assert!(url.as_str().contains("lon=103.9122"));
    }

    #[test]
    fn test_request_url_rejects_garbage() {
        assert!(matches!(
            request_url("not a url", None),
            Err(WeatherError::Endpoint(_))
        ));
    }

    #[test]
    fn test_normalize_combines_reading_and_outlook() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let outlook = OutlookResponse {
            items: vec![OutlookItem {
                forecasts: vec![
                    RawDayForecast {
                        date: Some(today + Duration::days(1)),
                        forecast: Some("Thundery Showers".to_string()),
                        relative_humidity: Some(RawBand {
                            low: Some(65.0),
                            high: Some(95.0),
                        }),
                        temperature: Some(RawBand {
                            low: Some(24.0),
                            high: Some(32.0),
                        }),
                        wind: None,
                    },
                    // Outlook repeats today; the current reading must win
                    RawDayForecast {
                        date: Some(today),
                        forecast: Some("Cloudy".to_string()),
                        ..RawDayForecast::default()
                    },
                ],
            }],
        };

        let days = normalize(&sample_realtime("Partly Cloudy"), &outlook, today, 4);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, today);
        assert_eq!(days[0].condition, WeatherCondition::PartlyCloudy);
        assert_eq!(days[1].condition, WeatherCondition::Thunderstorm);
        assert_eq!(days[1].wind_kph, mock::DEFAULT_WIND_KPH);
    }

    #[test]
    fn test_normalize_defaults_missing_fields_per_field() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        // Humidity absent, temperature present: only humidity defaults
        let realtime = RealtimeResponse {
            items: vec![RealtimeItem {
                general: Some(GeneralReading {
                    forecast: Some("Sunny".to_string()),
                    relative_humidity: None,
                    temperature: Some(RawBand {
                        low: Some(26.0),
                        high: Some(34.0),
                    }),
                    wind: None,
                }),
            }],
        };

        let days = normalize(&realtime, &OutlookResponse::default(), today, 4);

        assert_eq!(days.len(), 1);
        assert_eq!(
            (days[0].humidity_low, days[0].humidity_high),
            mock::DEFAULT_HUMIDITY
        );
        assert_eq!((days[0].temp_low, days[0].temp_high), (26.0, 34.0));
    }

    #[test]
    fn test_normalize_empty_bodies_still_yield_today() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let days = normalize(
            &RealtimeResponse::default(),
            &OutlookResponse::default(),
            today,
            4,
        );

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].condition_text, DEFAULT_CONDITION);
        assert_eq!(
            (days[0].humidity_low, days[0].humidity_high),
            mock::DEFAULT_HUMIDITY
        );
    }

    #[test]
    fn test_normalize_caps_days_and_sorts_outlook() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let outlook = OutlookResponse {
            items: vec![OutlookItem {
                forecasts: (1..=5)
                    .rev()
                    .map(|i| RawDayForecast {
                        date: Some(today + Duration::days(i)),
                        forecast: Some(format!("Day {}", i)),
                        ..RawDayForecast::default()
                    })
                    .collect(),
            }],
        };

        let days = normalize(&sample_realtime("Fair"), &outlook, today, 4);

        assert_eq!(days.len(), 4);
        assert_eq!(days[1].date, today + Duration::days(1));
        assert_eq!(days[3].date, today + Duration::days(3));
    }

    #[test]
    fn test_normalize_undated_outlook_entries_get_sequential_dates() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        let outlook = OutlookResponse {
            items: vec![OutlookItem {
                forecasts: vec![
                    RawDayForecast {
                        forecast: Some("Showers".to_string()),
                        ..RawDayForecast::default()
                    },
                    RawDayForecast {
                        forecast: Some("Fair".to_string()),
                        ..RawDayForecast::default()
                    },
                ],
            }],
        };

        let days = normalize(&sample_realtime("Fair"), &outlook, today, 4);
        assert_eq!(days[1].date, today + Duration::days(1));
        assert_eq!(days[2].date, today + Duration::days(2));
    }
}
