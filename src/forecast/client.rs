//! OpenWeatherMap forecast client.
//!
//! Wraps the 5-day/3-hour forecast endpoint for a single location and
//! normalizes the first few intervals into `ForecastSample`s.

use std::time::Duration;

use chrono::DateTime;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use crate::config::ForecastConfig;
use crate::forecast::{Condition, ForecastSample};

/// Why a forecast could not be obtained for a location.
/// Transport covers network errors, timeouts, and undecodable bodies.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("forecast request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("forecast API returned {0}")]
    Status(reqwest::StatusCode),
}

pub struct ForecastClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    window: usize,
}

impl ForecastClient {
    pub fn new(config: &ForecastConfig, api_key: SecretString) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            window: config.window,
        }
    }

    /// Fetch the near-term forecast window for a location.
    #[instrument(skip(self))]
    pub async fn fetch(&self, location: &str) -> Result<Vec<ForecastSample>, FetchError> {
        let url = format!(
            "{}/data/2.5/forecast?q={}&units=metric&appid={}",
            self.base_url,
            urlencoding::encode(location),
            self.api_key.expose_secret(),
        );

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let forecast: ForecastResponse = response.json().await?;

        let samples = forecast
            .list
            .into_iter()
            .take(self.window)
            .map(|entry| {
                let (condition, description) = entry
                    .weather
                    .into_iter()
                    .next()
                    .map(|w| (w.main, w.description))
                    .unwrap_or((Condition::Other("Unknown".to_string()), String::new()));

                ForecastSample {
                    time: DateTime::from_timestamp(entry.dt, 0).unwrap_or_default(),
                    rain_3h_mm: entry.rain.and_then(|r| r.three_hour).unwrap_or(0.0),
                    wind_speed_ms: entry.wind.speed,
                    condition,
                    description,
                }
            })
            .collect();

        Ok(samples)
    }
}

// --- OpenWeatherMap API Response Types ---

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    wind: WindInfo,
    weather: Vec<WeatherInfo>,
    rain: Option<RainInfo>,
}

#[derive(Debug, Deserialize)]
struct WindInfo {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct WeatherInfo {
    main: Condition,
    description: String,
}

#[derive(Debug, Deserialize)]
struct RainInfo {
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}
