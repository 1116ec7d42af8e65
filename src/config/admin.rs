//! Admin surface configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Shared secret expected in the `X-Admin-Token` header
    pub token: SecretString,

    /// Concurrent deliveries during a broadcast
    #[serde(default = "default_broadcast_concurrency")]
    pub broadcast_concurrency: usize,
}

impl AdminConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token.expose_secret().trim().is_empty() {
            return Err(ValidationError::MissingRequired("ADMIN__TOKEN"));
        }
        if self.broadcast_concurrency == 0 {
            return Err(ValidationError::InvalidBroadcastConcurrency);
        }
        Ok(())
    }
}

fn default_broadcast_concurrency() -> usize {
    8
}
