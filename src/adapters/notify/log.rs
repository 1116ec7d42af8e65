//! Sender that only records deliveries in the log.

use async_trait::async_trait;

use crate::ports::{DeliveryError, MessageSender, OutboundMessage};

/// Used when no relay is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSender;

#[async_trait]
impl MessageSender for TracingSender {
    async fn send(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        tracing::info!(
            recipient = %message.recipient,
            chars = message.text.chars().count(),
            "outbound message (log only)"
        );
        Ok(())
    }
}
