//! Plunk transactional email client
//!
//! One `POST` per message with a bearer key and a fixed request timeout.
//! Failures are returned to the caller, which decides whether they matter.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tg_core::services::{EmailMessage, NotificationSender};
use tg_shared::validation::mask_email;
use tg_shared::EmailConfig;
use tracing::{error, info};

use crate::InfrastructureError;

/// Request body accepted by `POST /v1/send`
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PlunkPayload<'a> {
    pub to: &'a str,
    pub subject: &'a str,
    pub body: &'a str,
}

impl<'a> From<&'a EmailMessage> for PlunkPayload<'a> {
    fn from(message: &'a EmailMessage) -> Self {
        Self {
            to: &message.to,
            subject: &message.subject,
            body: &message.html_body,
        }
    }
}

pub struct PlunkEmailSender {
    client: reqwest::Client,
    config: EmailConfig,
}

impl PlunkEmailSender {
    pub fn new(config: EmailConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "PLUNK_API_KEY must be set when EMAIL_PROVIDER=plunk".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(api_url = %config.api_url, "Plunk email sender initialized");
        Ok(Self { client, config })
    }

    async fn post(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&PlunkPayload::from(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Email(format!(
                "Plunk returned {}: {}",
                status, body
            )));
        }

        let body: serde_json::Value = response.json().await.unwrap_or_default();
        Ok(message_id(&body))
    }
}

/// Best-effort identifier from a Plunk send response
pub fn message_id(body: &serde_json::Value) -> String {
    body.pointer("/emails/0/email")
        .or_else(|| body.get("timestamp"))
        .and_then(|v| v.as_str())
        .unwrap_or("accepted")
        .to_string()
}

#[async_trait]
impl NotificationSender for PlunkEmailSender {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, String> {
        match self.post(message).await {
            Ok(id) => {
                info!(
                    to = %mask_email(&message.to),
                    message_id = %id,
                    "Email sent via Plunk"
                );
                Ok(id)
            }
            Err(e) => {
                error!(to = %mask_email(&message.to), error = %e, "Plunk send failed");
                Err(e.to_string())
            }
        }
    }
}
