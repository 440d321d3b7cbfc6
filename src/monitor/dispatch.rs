//! Alert rendering and per-subscriber delivery.
//!
//! One payload is rendered per location and sent individually to every
//! subscriber in the group, so a single delivery failure never blocks
//! the remainder.

use tracing::{info, warn};

use crate::email::client::EmailSender;
use crate::forecast::evaluate::AlertDescriptor;
use crate::subscribers::Subscriber;

/// Delivery results for one location group.
#[derive(Debug, Clone, Default)]
pub struct DispatchOutcome {
    pub sent: Vec<String>,
    pub failed: Vec<String>,
}

pub fn subject(location: &str) -> String {
    format!("⚠️ Weather Alert: {location}")
}

/// Render the shared notification body for a location.
/// Alert content is per-location, not personalized per subscriber.
pub fn render_alert_html(location: &str, alerts: &[AlertDescriptor]) -> String {
    let items: String = alerts
        .iter()
        .map(|alert| format!("<li>{}</li>", alert.message))
        .collect();

    format!(
        "<div style=\"font-family: Arial, sans-serif; padding: 20px;\">\
           <h2>Weather Alert for {location}</h2>\
           <div style=\"background-color: #fff3f3; padding: 15px; margin: 10px 0;\">\
             <ul>{items}</ul>\
           </div>\
           <p>Please take necessary precautions.</p>\
         </div>"
    )
}

/// Send a location's alerts to every subscriber in its group.
///
/// Each send failure is logged with the subscriber identity and recorded;
/// it does not abort the loop.
pub async fn dispatch(
    sender: &dyn EmailSender,
    location: &str,
    alerts: &[AlertDescriptor],
    group: &[Subscriber],
) -> DispatchOutcome {
    let subject = subject(location);
    let body = render_alert_html(location, alerts);
    let mut outcome = DispatchOutcome::default();

    for subscriber in group {
        match sender.send(&subscriber.email, &subject, &body).await {
            Ok(()) => {
                info!(email = %subscriber.email, location, "Alert sent");
                outcome.sent.push(subscriber.email.clone());
            }
            Err(e) => {
                warn!(
                    email = %subscriber.email,
                    location,
                    error = %e,
                    "Alert delivery failed"
                );
                outcome.failed.push(subscriber.email.clone());
            }
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::client::SendError;
    use crate::forecast::evaluate::AlertKind;
    use async_trait::async_trait;
    use chrono::DateTime;
    use std::sync::Mutex;

    /// Records every send and fails for addresses on its reject list.
    struct FakeSender {
        reject: Vec<String>,
        sent: Mutex<Vec<String>>,
    }

    impl FakeSender {
        fn new(reject: &[&str]) -> Self {
            Self {
                reject: reject.iter().map(|s| s.to_string()).collect(),
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl EmailSender for FakeSender {
        async fn send(&self, to: &str, _subject: &str, _html: &str) -> Result<(), SendError> {
            if self.reject.iter().any(|r| r == to) {
                return Err(SendError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
            }
            self.sent.lock().unwrap().push(to.to_string());
            Ok(())
        }
    }

    fn alert(message: &str) -> AlertDescriptor {
        AlertDescriptor {
            kind: AlertKind::Thunderstorm,
            message: message.to_string(),
            sample_time: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    fn subscriber(email: &str) -> Subscriber {
        Subscriber {
            email: email.to_string(),
            location: "Chennai".to_string(),
            verified: true,
        }
    }

    #[tokio::test]
    async fn test_all_subscribers_receive_alert() {
        let sender = FakeSender::new(&[]);
        let group = vec![subscriber("a@example.com"), subscriber("b@example.com")];

        let outcome = dispatch(&sender, "Chennai", &[alert("storm")], &group).await;

        assert_eq!(outcome.sent, vec!["a@example.com", "b@example.com"]);
        assert!(outcome.failed.is_empty());
        assert_eq!(sender.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_middle_failure_does_not_block_siblings() {
        let sender = FakeSender::new(&["b@example.com"]);
        let group = vec![
            subscriber("a@example.com"),
            subscriber("b@example.com"),
            subscriber("c@example.com"),
        ];

        let outcome = dispatch(&sender, "Chennai", &[alert("storm")], &group).await;

        assert_eq!(outcome.sent, vec!["a@example.com", "c@example.com"]);
        assert_eq!(outcome.failed, vec!["b@example.com"]);
    }

    #[test]
    fn test_rendered_body_lists_every_alert() {
        let alerts = vec![alert("⛈️ Thunderstorm warning at 09:00"), alert("💨 wind")];
        let html = render_alert_html("Chennai", &alerts);

        assert!(html.contains("Weather Alert for Chennai"));
        assert!(html.contains("<li>⛈️ Thunderstorm warning at 09:00</li>"));
        assert!(html.contains("<li>💨 wind</li>"));
    }

    #[test]
    fn test_subject_names_location() {
        assert_eq!(subject("Chennai"), "⚠️ Weather Alert: Chennai");
    }
}
