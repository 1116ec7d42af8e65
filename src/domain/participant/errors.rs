//! Participant-specific error types.
//!
//! Errors raised by the participant store and the rules it enforces.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Validation | 400 |
//! | CapacityExceeded | 409 |
//! | AlreadyRegistered | 409 |
//! | NotFound | 404 |
//! | StorageUnavailable | 503 |
//! | CodeSpaceExhausted | 500 |

use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, ErrorCode, InternalKey, ValidationError};

/// Participant-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantError {
    /// Input failed validation.
    Validation(ValidationError),

    /// The date already holds `cap` participants.
    CapacityExceeded { date: NaiveDate, cap: u32 },

    /// A row already exists for this key.
    AlreadyRegistered(InternalKey),

    /// No row exists for this key.
    NotFound(InternalKey),

    /// The backing store could not be reached or rejected the operation.
    StorageUnavailable(String),

    /// No unused activation code was found within the retry budget.
    CodeSpaceExhausted { attempts: u32 },
}

impl ParticipantError {
    pub fn capacity_exceeded(date: NaiveDate, cap: u32) -> Self {
        ParticipantError::CapacityExceeded { date, cap }
    }

    pub fn already_registered(key: InternalKey) -> Self {
        ParticipantError::AlreadyRegistered(key)
    }

    pub fn not_found(key: InternalKey) -> Self {
        ParticipantError::NotFound(key)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        ParticipantError::StorageUnavailable(message.into())
    }

    pub fn code_space_exhausted(attempts: u32) -> Self {
        ParticipantError::CodeSpaceExhausted { attempts }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ParticipantError::Validation(_) => ErrorCode::ValidationFailed,
            ParticipantError::CapacityExceeded { .. } => ErrorCode::CapacityExceeded,
            ParticipantError::AlreadyRegistered(_) => ErrorCode::AlreadyRegistered,
            ParticipantError::NotFound(_) => ErrorCode::ParticipantNotFound,
            ParticipantError::StorageUnavailable(_) => ErrorCode::DatabaseError,
            ParticipantError::CodeSpaceExhausted { .. } => ErrorCode::CodeSpaceExhausted,
        }
    }

    /// Returns an operator-facing error message.
    pub fn message(&self) -> String {
        match self {
            ParticipantError::Validation(err) => err.to_string(),
            ParticipantError::CapacityExceeded { date, cap } => {
                format!("Meeting date {} is full ({} seats)", date, cap)
            }
            ParticipantError::AlreadyRegistered(key) => {
                format!("Participant {} is already registered", key)
            }
            ParticipantError::NotFound(key) => format!("Participant not found: {}", key),
            ParticipantError::StorageUnavailable(msg) => format!("Storage unavailable: {}", msg),
            ParticipantError::CodeSpaceExhausted { attempts } => format!(
                "No free activation code found after {} attempts",
                attempts
            ),
        }
    }

    /// Returns true if the caller may retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ParticipantError::StorageUnavailable(_))
    }
}

impl std::fmt::Display for ParticipantError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ParticipantError {}

impl From<ValidationError> for ParticipantError {
    fn from(err: ValidationError) -> Self {
        ParticipantError::Validation(err)
    }
}

impl From<DomainError> for ParticipantError {
    fn from(err: DomainError) -> Self {
        ParticipantError::StorageUnavailable(err.to_string())
    }
}

impl From<ParticipantError> for DomainError {
    fn from(err: ParticipantError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
