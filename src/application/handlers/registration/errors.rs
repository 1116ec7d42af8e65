//! Registration engine errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::participant::ParticipantError;

/// Failures that abort a registration turn.
///
/// Everything else (full dates, unknown input, missing rows) is answered
/// with a localized reply instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("activation code space exhausted after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },

    #[error("invalid state transition: {0}")]
    InvalidTransition(String),
}

impl RegistrationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RegistrationError::StorageUnavailable(_) => ErrorCode::DatabaseError,
            RegistrationError::CodeSpaceExhausted { .. } => ErrorCode::CodeSpaceExhausted,
            RegistrationError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
        }
    }

    /// Whether the participant can simply try the same step again.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, RegistrationError::CodeSpaceExhausted { .. })
    }
}

impl From<ParticipantError> for RegistrationError {
    fn from(err: ParticipantError) -> Self {
        match err {
            ParticipantError::CodeSpaceExhausted { attempts } => {
                RegistrationError::CodeSpaceExhausted { attempts }
            }
            other => RegistrationError::StorageUnavailable(other.message()),
        }
    }
}

impl From<DomainError> for RegistrationError {
    fn from(err: DomainError) -> Self {
        RegistrationError::StorageUnavailable(err.message)
    }
}

impl From<ValidationError> for RegistrationError {
    fn from(err: ValidationError) -> Self {
        RegistrationError::InvalidTransition(err.to_string())
    }
}

impl From<RegistrationError> for DomainError {
    fn from(err: RegistrationError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
