use chrono::{DateTime, Local, Timelike};

/// How often the monitor actually runs relative to the driver tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Run on every tick.
    Hourly,
    /// Run only on ticks that fall inside the given local hour.
    DailyAtHour(u32),
}

/// Whether a cycle should run at `now`.
/// Pure predicate; the driver supplies the clock.
pub fn should_run(cadence: Cadence, now: DateTime<Local>) -> bool {
    match cadence {
        Cadence::Hourly => true,
        Cadence::DailyAtHour(hour) => now.hour() == hour,
    }
}
