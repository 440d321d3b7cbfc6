//! Brevo transactional email client.
//!
//! Sends one HTML email per call through the v3 SMTP API. Delivery is
//! fire-and-forget per message; retries belong to the provider.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use thiserror::Error;

use crate::config::EmailConfig;

/// Why a single email could not be handed to the provider.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("email request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("email API returned {0}")]
    Status(reqwest::StatusCode),
}

/// Outbound email capability. Dyn-dispatchable so the dispatcher can be
/// exercised against in-process fakes.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), SendError>;
}

pub struct EmailClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    sender_email: String,
    sender_name: String,
}

impl EmailClient {
    pub fn new(config: &EmailConfig, api_key: SecretString) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            sender_email: config.sender_email.clone(),
            sender_name: config.sender_name.clone(),
        }
    }
}

#[async_trait]
impl EmailSender for EmailClient {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<(), SendError> {
        let payload = SendEmailRequest {
            sender: Party {
                name: Some(&self.sender_name),
                email: &self.sender_email,
            },
            to: vec![Party {
                name: None,
                email: to,
            }],
            subject,
            html_content: html_body,
        };

        let response = self
            .http
            .post(format!("{}/v3/smtp/email", self.base_url))
            .header("api-key", self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SendError::Status(response.status()));
        }

        Ok(())
    }
}

// --- Brevo API Request Types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendEmailRequest<'a> {
    sender: Party<'a>,
    to: Vec<Party<'a>>,
    subject: &'a str,
    html_content: &'a str,
}

#[derive(Debug, Serialize)]
struct Party<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: &'a str,
}
