//! Participant repository port.
//!
//! The single source of truth for participant state. Implementations also act
//! as the identifier registry (number and code issuance) and the capacity gate
//! (per-date counting with a commit-time check).
//!
//! # Atomicity
//!
//! - `create` reserves the next number, draws a code and inserts the row as
//!   one unit. A code collision retries only the code draw, up to
//!   `MAX_CODE_ATTEMPTS`.
//! - When a `SeatRequest` is supplied, the capacity check and the date write
//!   happen in that same unit. Two callers racing for the last seat cannot
//!   both succeed.
//! - A failed call leaves no partial effect.
//!
//! # Example
//!
//! ```ignore
//! let seat = SeatRequest::new(date, CapacityPolicy::new(290));
//! let participant = repo
//!     .create(NewParticipant::new(key, Language::En), Some(seat))
//!     .await?;
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{InternalKey, Timestamp};
use crate::domain::participant::{
    ActivationCode, Language, NewParticipant, Participant, ParticipantError,
};
use crate::domain::scheduling::SeatRequest;

/// Result of an activation attempt for one code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// The code matched and the participant was activated now.
    Activated(Participant),
    /// The code matched a participant who was already active; nothing changed.
    AlreadyActivated(Participant),
    /// No participant holds this code.
    UnknownCode,
}

impl ActivationOutcome {
    /// Activation counts as a success for both fresh and repeated activations.
    pub fn is_success(&self) -> bool {
        !matches!(self, ActivationOutcome::UnknownCode)
    }
}

/// Repository port for participant persistence.
#[async_trait]
pub trait ParticipantRepository: Send + Sync {
    /// Find a participant by channel identity.
    async fn get_by_key(&self, key: &InternalKey) -> Result<Option<Participant>, ParticipantError>;

    /// Create a participant, issuing its number and activation code.
    ///
    /// # Errors
    ///
    /// - `AlreadyRegistered` if a row exists for the key
    /// - `CapacityExceeded` if `seat` is given and the date is full
    /// - `CodeSpaceExhausted` if no free code was found
    /// - `StorageUnavailable` on persistence failure
    async fn create(
        &self,
        new: NewParticipant,
        seat: Option<SeatRequest>,
    ) -> Result<Participant, ParticipantError>;

    /// Change the preferred language. No other field is touched.
    async fn update_language(
        &self,
        key: &InternalKey,
        language: Language,
    ) -> Result<Participant, ParticipantError>;

    /// Move a participant to a new meeting date, re-checking capacity.
    ///
    /// Moving to the date already held succeeds without a capacity check.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no row exists for the key
    /// - `CapacityExceeded` if the target date is full
    async fn update_meeting_date(
        &self,
        key: &InternalKey,
        seat: SeatRequest,
    ) -> Result<Participant, ParticipantError>;

    /// Number of participants holding `date`.
    async fn count_by_date(&self, date: NaiveDate) -> Result<u32, ParticipantError>;

    /// Activate the participant holding `code`. Activating twice keeps the
    /// first `activated_at`.
    async fn activate_by_code(
        &self,
        code: &ActivationCode,
        at: Timestamp,
    ) -> Result<ActivationOutcome, ParticipantError>;

    /// All participants ordered by number.
    async fn list_all(&self) -> Result<Vec<Participant>, ParticipantError>;

    /// Participants holding `date`, ordered by number.
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Participant>, ParticipantError>;
}
