use anyhow::{Context, Result};
use chrono::Timelike;

use weather_alerts::config::AppConfig;
use weather_alerts::email::client::EmailClient;
use weather_alerts::forecast::client::ForecastClient;
use weather_alerts::monitor::cycle::Monitor;
use weather_alerts::monitor::schedule;
use weather_alerts::monitoring::{health, logger};
use weather_alerts::subscribers::store::SubscriberStore;

#[tokio::main]
async fn main() -> Result<()> {
    let (config, secrets) = AppConfig::load()?;

    logger::init_logging(&config.monitoring)?;

    tracing::info!(
        mode = ?config.monitor.mode,
        tick_interval_s = config.monitor.tick_interval_seconds,
        "Weather alert monitor starting"
    );

    let weather_key = secrets
        .openweather_api_key
        .context("OPENWEATHER_API_KEY not set")?;
    let email_key = secrets.brevo_api_key.context("BREVO_API_KEY not set")?;

    let store = SubscriberStore::new(&config.database.path).await?;
    let forecast = ForecastClient::new(&config.forecast, weather_key);
    let email = EmailClient::new(&config.email, email_key);
    let monitor = Monitor::new(store, forecast, Box::new(email));

    let health_state = health::HealthState::new();
    let _health_handle = if config.monitoring.health_enabled {
        Some(health::spawn_health_server(health_state.clone()))
    } else {
        None
    };

    let cadence = config.monitor.cadence();
    let interval = std::time::Duration::from_secs(config.monitor.tick_interval_seconds);
    let mut cycle_number: u64 = 0;

    loop {
        let now = chrono::Local::now();
        if schedule::should_run(cadence, now) {
            match monitor.run_cycle().await {
                Ok(summary) => {
                    health_state.record_cycle(cycle_number, &summary);
                    cycle_number += 1;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Cycle aborted");
                }
            }
        } else {
            tracing::info!(hour = now.hour(), "Outside check window — skipping cycle");
        }

        tokio::time::sleep(interval).await;
    }
}
