//! Registration flow configuration

use chrono::FixedOffset;
use serde::Deserialize;

use crate::domain::participant::Language;
use crate::domain::scheduling::{CapacityPolicy, OfferWindow, WeekendDays, MAX_OFFER_DAYS};

use super::error::ValidationError;

/// Which participant and session store implementation to wire.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationConfig {
    #[serde(default)]
    pub storage: StorageBackend,

    /// Seats per offered meeting date
    #[serde(default = "default_capacity")]
    pub capacity_per_date: u32,

    /// Participant numbers start at base + 1
    #[serde(default = "default_number_base")]
    pub participant_number_base: i64,

    #[serde(default = "default_interactive_offer_days")]
    pub interactive_offer_days: u8,

    #[serde(default = "default_email_offer_days")]
    pub email_offer_days: u8,

    #[serde(default)]
    pub weekend: WeekendDays,

    /// Offer today's date as well as upcoming ones
    #[serde(default)]
    pub include_today: bool,

    /// Ask individual/organization between language and date
    #[serde(default)]
    pub ask_participant_type: bool,

    /// Prefix of the scannable credential payload
    #[serde(default = "default_credential_prefix")]
    pub credential_prefix: String,

    #[serde(default)]
    pub default_language: Language,

    /// Local offset used to decide what "today" is
    #[serde(default)]
    pub utc_offset_hours: i32,
}

impl RegistrationConfig {
    pub fn capacity(&self) -> CapacityPolicy {
        CapacityPolicy::new(self.capacity_per_date)
    }

    pub fn interactive_window(&self) -> OfferWindow {
        OfferWindow::new(self.interactive_offer_days, self.include_today, self.weekend)
    }

    pub fn email_window(&self) -> OfferWindow {
        OfferWindow::new(self.email_offer_days, self.include_today, self.weekend)
    }

    pub fn utc_offset(&self) -> Result<FixedOffset, ValidationError> {
        if !(-12..=14).contains(&self.utc_offset_hours) {
            return Err(ValidationError::InvalidUtcOffset);
        }
        FixedOffset::east_opt(self.utc_offset_hours * 3600).ok_or(ValidationError::InvalidUtcOffset)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.capacity_per_date == 0 {
            return Err(ValidationError::ZeroCapacity);
        }
        for (channel, days) in [
            ("interactive", self.interactive_offer_days),
            ("email", self.email_offer_days),
        ] {
            if days == 0 || days > MAX_OFFER_DAYS {
                return Err(ValidationError::InvalidOfferDays {
                    channel,
                    max: MAX_OFFER_DAYS,
                });
            }
        }
        if self.credential_prefix.is_empty()
            || !self.credential_prefix.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(ValidationError::InvalidCredentialPrefix);
        }
        self.utc_offset()?;
        Ok(())
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            storage: StorageBackend::default(),
            capacity_per_date: default_capacity(),
            participant_number_base: default_number_base(),
            interactive_offer_days: default_interactive_offer_days(),
            email_offer_days: default_email_offer_days(),
            weekend: WeekendDays::default(),
            include_today: false,
            ask_participant_type: false,
            credential_prefix: default_credential_prefix(),
            default_language: Language::default(),
            utc_offset_hours: 0,
        }
    }
}

fn default_capacity() -> u32 {
    290
}

fn default_number_base() -> i64 {
    12000
}

fn default_interactive_offer_days() -> u8 {
    3
}

fn default_email_offer_days() -> u8 {
    6
}

fn default_credential_prefix() -> String {
    "SUMMIT".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_observed_deployment() {
        let config = RegistrationConfig::default();
        assert_eq!(config.capacity().cap(), 290);
        assert_eq!(config.participant_number_base, 12000);
        assert_eq!(config.interactive_window().days, 3);
        assert_eq!(config.email_window().days, 6);
        assert_eq!(config.weekend, WeekendDays::SatSun);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let config = RegistrationConfig {
            capacity_per_date: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::ZeroCapacity));
    }

    #[test]
    fn email_window_beyond_six_days_is_rejected() {
        let config = RegistrationConfig {
            email_offer_days: 7,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidOfferDays { channel: "email", .. })
        ));
    }

    #[test]
    fn zero_day_window_is_rejected() {
        let config = RegistrationConfig {
            interactive_offer_days: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn credential_prefix_must_be_alphanumeric() {
        let config = RegistrationConfig {
            credential_prefix: "SUM MIT".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidCredentialPrefix));
    }

    #[test]
    fn utc_offset_converts_hours() {
        let config = RegistrationConfig {
            utc_offset_hours: 3,
            ..Default::default()
        };
        assert_eq!(config.utc_offset().unwrap().local_minus_utc(), 3 * 3600);

        let config = RegistrationConfig {
            utc_offset_hours: 20,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidUtcOffset));
    }
}
