//! Webhook message sender.
//!
//! POSTs each message as JSON to a relay that owns the real chat/email
//! transports. Any 2xx response counts as delivered.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::ports::{DeliveryError, MessageSender, OutboundMessage};

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    recipient: &'a str,
    text: &'a str,
}

/// Sends messages to an HTTP relay.
#[derive(Clone)]
pub struct WebhookSender {
    client: Client,
    url: String,
}

impl WebhookSender {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeliveryError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl MessageSender for WebhookSender {
    async fn send(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        let payload = WebhookPayload {
            recipient: message.recipient.as_str(),
            text: &message.text,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout
                } else {
                    DeliveryError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            message: body.chars().take(200).collect(),
        })
    }
}
