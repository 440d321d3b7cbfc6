//! The scheduled monitoring cycle.
//!
//! Loads verified subscribers, groups them by location, fetches and
//! evaluates each location's forecast, and dispatches alerts. Failures
//! inside one location never cross into a sibling; only a subscriber
//! store failure aborts the whole cycle.

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use crate::email::client::EmailSender;
use crate::forecast::client::ForecastClient;
use crate::forecast::evaluate;
use crate::monitor::dispatch;
use crate::subscribers::group::{group_by_location, LocationGroup};
use crate::subscribers::store::SubscriberStore;

/// Per-location result recorded at the end of each cycle.
#[derive(Debug, Clone)]
pub struct LocationOutcome {
    pub location: String,
    pub alert_count: usize,
    pub subscriber_count: usize,
    pub sent: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct CycleSummary {
    pub locations: Vec<LocationOutcome>,
}

impl CycleSummary {
    pub fn total_sent(&self) -> usize {
        self.locations.iter().map(|l| l.sent).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.locations.iter().map(|l| l.failed).sum()
    }
}

pub struct Monitor {
    store: SubscriberStore,
    forecast: ForecastClient,
    email: Box<dyn EmailSender>,
}

impl Monitor {
    pub fn new(store: SubscriberStore, forecast: ForecastClient, email: Box<dyn EmailSender>) -> Self {
        Self {
            store,
            forecast,
            email,
        }
    }

    /// Run one monitoring cycle over every distinct subscriber location.
    ///
    /// Returns `Err` only when the subscriber store cannot be read, in
    /// which case nothing has been dispatched.
    #[instrument(skip(self))]
    pub async fn run_cycle(&self) -> Result<CycleSummary> {
        let start = Instant::now();

        let subscribers = self
            .store
            .find_verified()
            .await
            .context("Failed to load subscribers")?;
        let groups = group_by_location(subscribers);
        info!(locations = groups.len(), "Starting weather check");

        let mut summary = CycleSummary::default();
        for group in &groups {
            let outcome = self.check_location(group).await;
            info!(
                location = %outcome.location,
                alerts = outcome.alert_count,
                subscribers = outcome.subscriber_count,
                sent = outcome.sent,
                failed = outcome.failed,
                "Location processed"
            );
            summary.locations.push(outcome);
        }

        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            locations = summary.locations.len(),
            sent = summary.total_sent(),
            failed = summary.total_failed(),
            "Cycle complete"
        );

        Ok(summary)
    }

    /// Fetch, evaluate, and (when warranted) dispatch for one location.
    /// A fetch failure degrades to "no data, no alerts" for this location.
    async fn check_location(&self, group: &LocationGroup) -> LocationOutcome {
        let samples = match self.forecast.fetch(&group.location).await {
            Ok(samples) => samples,
            Err(e) => {
                warn!(location = %group.location, error = %e, "Forecast fetch failed");
                Vec::new()
            }
        };

        let alerts = evaluate::evaluate(&samples);
        if alerts.is_empty() {
            info!(location = %group.location, "No emergency conditions detected");
            return LocationOutcome {
                location: group.location.clone(),
                alert_count: 0,
                subscriber_count: group.subscribers.len(),
                sent: 0,
                failed: 0,
            };
        }

        info!(
            location = %group.location,
            alerts = alerts.len(),
            kinds = ?alerts.iter().map(|a| a.kind).collect::<Vec<_>>(),
            subscribers = group.subscribers.len(),
            "Emergency conditions detected — dispatching alerts"
        );

        let outcome = dispatch::dispatch(
            self.email.as_ref(),
            &group.location,
            &alerts,
            &group.subscribers,
        )
        .await;

        LocationOutcome {
            location: group.location.clone(),
            alert_count: alerts.len(),
            subscriber_count: group.subscribers.len(),
            sent: outcome.sent.len(),
            failed: outcome.failed.len(),
        }
    }
}
