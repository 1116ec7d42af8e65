//! Per-identity session record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{InternalKey, Timestamp};
use crate::domain::participant::{Language, ParticipantType};

use super::RegistrationState;

/// Conversation state for one channel identity.
///
/// Holds the choices made before a participant row exists. Once the row is
/// created the pending fields are no longer read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationContext {
    pub internal_key: InternalKey,
    pub state: RegistrationState,
    /// Language replies are rendered in.
    pub language: Language,
    pub pending_language: Option<Language>,
    pub pending_type: Option<ParticipantType>,
    pub updated_at: Timestamp,
}

impl RegistrationContext {
    /// Fresh context for an identity seen for the first time.
    pub fn new(internal_key: InternalKey, language: Language) -> Self {
        Self {
            internal_key,
            state: RegistrationState::ChoosingLanguage,
            language,
            pending_language: None,
            pending_type: None,
            updated_at: Timestamp::now(),
        }
    }

    /// Context for an identity that already has a participant row but no
    /// stored session (e.g. after a session store wipe).
    pub fn resumed(internal_key: InternalKey, language: Language) -> Self {
        Self {
            state: RegistrationState::Menu,
            ..Self::new(internal_key, language)
        }
    }

    /// Clears choices made before registration.
    pub fn reset(&mut self) {
        self.state = RegistrationState::ChoosingLanguage;
        self.pending_language = None;
        self.pending_type = None;
    }

    pub fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
