//! Emergency-condition thresholds.
//!
//! Pure evaluation of forecast samples against the alert policy.
//! No I/O; deterministic for a given input.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::forecast::{Condition, ForecastSample};

/// Rainfall over 3h considered significant, in mm.
pub const HEAVY_RAIN_MM: f64 = 15.0;
/// Rainfall over 3h with flooding potential, in mm.
pub const EXTREME_RAIN_MM: f64 = 25.0;
/// Sustained wind worth a warning, in m/s (~72 km/h).
pub const HIGH_WIND_MS: f64 = 20.0;
/// Sustained wind considered dangerous, in m/s (~90 km/h).
pub const EXTREME_WIND_MS: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertKind {
    Thunderstorm,
    FlashFlood,
    HeavyRain,
    DangerousWind,
    StrongWind,
    Tornado,
    Hurricane,
}

/// A single triggered emergency condition.
#[derive(Debug, Clone)]
pub struct AlertDescriptor {
    pub kind: AlertKind,
    pub message: String,
    pub sample_time: DateTime<Utc>,
}

/// Evaluate forecast samples against the emergency thresholds.
///
/// Each sample is judged independently and can yield several alerts.
/// The extreme rain and wind tiers suppress their lower tier for the
/// same sample; condition-code alerts fire regardless of rain or wind.
pub fn evaluate(samples: &[ForecastSample]) -> Vec<AlertDescriptor> {
    let mut alerts = Vec::new();

    for sample in samples {
        let time = sample.time.format("%H:%M").to_string();

        if sample.condition == Condition::Thunderstorm {
            alerts.push(descriptor(
                AlertKind::Thunderstorm,
                format!("⛈️ Thunderstorm warning at {time}"),
                sample,
            ));
        }

        if sample.rain_3h_mm >= EXTREME_RAIN_MM {
            alerts.push(descriptor(
                AlertKind::FlashFlood,
                format!(
                    "🌊 Flash flood risk: {}mm rainfall expected at {time}",
                    sample.rain_3h_mm
                ),
                sample,
            ));
        } else if sample.rain_3h_mm >= HEAVY_RAIN_MM {
            alerts.push(descriptor(
                AlertKind::HeavyRain,
                format!(
                    "🌧️ Heavy rainfall alert: {}mm expected at {time}",
                    sample.rain_3h_mm
                ),
                sample,
            ));
        }

        if sample.wind_speed_ms >= EXTREME_WIND_MS {
            alerts.push(descriptor(
                AlertKind::DangerousWind,
                format!(
                    "🌪️ Dangerous wind conditions: {}m/s at {time}",
                    sample.wind_speed_ms
                ),
                sample,
            ));
        } else if sample.wind_speed_ms >= HIGH_WIND_MS {
            alerts.push(descriptor(
                AlertKind::StrongWind,
                format!(
                    "💨 Strong wind warning: {}m/s at {time}",
                    sample.wind_speed_ms
                ),
                sample,
            ));
        }

        if sample.condition == Condition::Tornado {
            alerts.push(descriptor(
                AlertKind::Tornado,
                format!("🌪️ TORNADO WARNING at {time}"),
                sample,
            ));
        }

        if sample.condition == Condition::Hurricane {
            alerts.push(descriptor(
                AlertKind::Hurricane,
                format!("🌀 HURRICANE CONDITIONS at {time}"),
                sample,
            ));
        }
    }

    alerts
}

fn descriptor(kind: AlertKind, message: String, sample: &ForecastSample) -> AlertDescriptor {
    AlertDescriptor {
        kind,
        message,
        sample_time: sample.time,
    }
}
