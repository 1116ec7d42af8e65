//! Outbound notification configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Where broadcast and channel messages are delivered.
///
/// Without a webhook URL messages are only logged.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    #[serde(default)]
    pub webhook_url: Option<String>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl NotifyConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.webhook_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidWebhookUrl);
            }
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_log_only() {
        let config = NotifyConfig::default();
        assert!(config.webhook_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_http_webhook_is_rejected() {
        let config = NotifyConfig {
            webhook_url: Some("ftp://relay".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidWebhookUrl));
    }
}
