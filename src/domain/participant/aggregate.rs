//! Participant aggregate entity.
//!
//! A Participant is one registrant identity (chat account or email address).
//! Rows are created only when a meeting date is committed for the first time.
//!
//! # Design Decisions
//!
//! - **Issued once**: `number` and `activation_code` are assigned by the store
//!   inside the creating transaction and never change afterwards
//! - **Monotonic activation**: `is_activated` only ever moves false → true
//! - **No deletes**: the core never removes a participant

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{InternalKey, ParticipantNumber, Timestamp};

use super::{ActivationCode, Language, ParticipantType};

/// Participant aggregate.
///
/// # Invariants
///
/// - `internal_key` is unique (one row per identity)
/// - `number` and `activation_code` are globally unique
/// - `activated_at.is_some() == is_activated`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub internal_key: InternalKey,
    pub display_name: Option<String>,
    pub handle: Option<String>,
    pub participant_type: ParticipantType,
    pub number: ParticipantNumber,
    pub activation_code: ActivationCode,
    pub language: Language,
    pub meeting_date: Option<NaiveDate>,
    pub registered_at: Timestamp,
    pub is_activated: bool,
    pub activated_at: Option<Timestamp>,
}

/// Everything a caller supplies when creating a participant. The store adds
/// the issued identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParticipant {
    pub internal_key: InternalKey,
    pub display_name: Option<String>,
    pub handle: Option<String>,
    pub participant_type: ParticipantType,
    pub language: Language,
}

impl NewParticipant {
    pub fn new(internal_key: InternalKey, language: Language) -> Self {
        Self {
            internal_key,
            display_name: None,
            handle: None,
            participant_type: ParticipantType::default(),
            language,
        }
    }

    pub fn with_profile(mut self, display_name: Option<String>, handle: Option<String>) -> Self {
        self.display_name = display_name.filter(|s| !s.trim().is_empty());
        self.handle = handle.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn with_type(mut self, participant_type: ParticipantType) -> Self {
        self.participant_type = participant_type;
        self
    }
}

impl Participant {
    /// Materializes a freshly issued row.
    pub fn issue(
        new: NewParticipant,
        number: ParticipantNumber,
        activation_code: ActivationCode,
        meeting_date: Option<NaiveDate>,
        registered_at: Timestamp,
    ) -> Self {
        Self {
            internal_key: new.internal_key,
            display_name: new.display_name,
            handle: new.handle,
            participant_type: new.participant_type,
            number,
            activation_code,
            language: new.language,
            meeting_date,
            registered_at,
            is_activated: false,
            activated_at: None,
        }
    }

    /// Marks the participant as activated.
    ///
    /// Returns `false` without touching `activated_at` if already activated.
    pub fn activate(&mut self, at: Timestamp) -> bool {
        if self.is_activated {
            return false;
        }
        self.is_activated = true;
        self.activated_at = Some(at);
        true
    }

    /// Moves the participant to `date`. Returns `false` if it was already set.
    pub fn reschedule(&mut self, date: NaiveDate) -> bool {
        if self.meeting_date == Some(date) {
            return false;
        }
        self.meeting_date = Some(date);
        true
    }

    pub fn change_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Human-readable name for reports: display name, then handle, then key.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.handle.as_deref())
            .unwrap_or_else(|| self.internal_key.as_str())
    }
}
