pub mod client;
pub mod evaluate;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One three-hour forecast interval, normalized from the upstream payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSample {
    pub time: DateTime<Utc>,
    /// Rainfall accumulated over the three-hour window, in millimetres.
    /// Zero when the upstream payload omits the rain block.
    pub rain_3h_mm: f64,
    pub wind_speed_ms: f64,
    pub condition: Condition,
    pub description: String,
}

/// Upstream weather condition group (the `weather[0].main` field).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    Clear,
    Clouds,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    Tornado,
    Hurricane,
    #[serde(untagged)]
    Other(String),
}
