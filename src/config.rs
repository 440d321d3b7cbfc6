use std::path::Path;

use anyhow::{Context, Result};
use secrecy::SecretString;
use serde::Deserialize;

use crate::monitor::schedule::Cadence;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub monitor: MonitorConfig,
    pub forecast: ForecastConfig,
    pub email: EmailConfig,
    pub database: DatabaseConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CadenceMode {
    Hourly,
    Daily,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    pub mode: CadenceMode,
    pub daily_hour: u32,
    pub tick_interval_seconds: u64,
}

impl MonitorConfig {
    pub fn cadence(&self) -> Cadence {
        match self.mode {
            CadenceMode::Hourly => Cadence::Hourly,
            CadenceMode::Daily => Cadence::DailyAtHour(self.daily_hour),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastConfig {
    pub base_url: String,
    /// How many three-hour intervals of the forecast to evaluate.
    pub window: usize,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    pub base_url: String,
    pub sender_email: String,
    pub sender_name: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: String,
    pub health_enabled: bool,
}

/// Secrets loaded exclusively from environment variables.
/// Not serializable, not stored in config files.
pub struct Secrets {
    pub openweather_api_key: Option<SecretString>,
    pub brevo_api_key: Option<SecretString>,
}

impl Secrets {
    pub fn from_env() -> Self {
        Self {
            openweather_api_key: std::env::var("OPENWEATHER_API_KEY")
                .ok()
                .map(SecretString::from),
            brevo_api_key: std::env::var("BREVO_API_KEY").ok().map(SecretString::from),
        }
    }
}

impl AppConfig {
    /// Load configuration from config/default.toml, overlaying environment variables for secrets.
    pub fn load() -> Result<(Self, Secrets)> {
        dotenvy::dotenv().ok();

        let config_path = Path::new("config/default.toml");
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: AppConfig =
            toml::from_str(&contents).context("Failed to parse config/default.toml")?;

        let secrets = Secrets::from_env();

        Ok((config, secrets))
    }
}
