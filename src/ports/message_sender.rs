//! Outbound message port.
//!
//! Best-effort delivery to a channel identity. Callers count failures; a
//! failed send never rolls back state that was already committed.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::InternalKey;

/// A plain-text message addressed to one identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub recipient: InternalKey,
    pub text: String,
}

impl OutboundMessage {
    pub fn new(recipient: InternalKey, text: impl Into<String>) -> Self {
        Self {
            recipient,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    #[error("delivery rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("delivery timed out")]
    Timeout,
}

#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<(), DeliveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_sender_is_object_safe() {
        fn _accepts_dyn(_sender: &dyn MessageSender) {}
    }

    #[test]
    fn rejected_error_displays_status() {
        let err = DeliveryError::Rejected {
            status: 502,
            message: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "delivery rejected with status 502: bad gateway");
    }
}
