//! Admin operation errors.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Forbidden | 403 |
//! | Validation | 400 |
//! | NotFound | 404 |
//! | StorageUnavailable | 503 |
//! | Internal | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::participant::ParticipantError;
use crate::ports::AuthorizationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    #[error("forbidden: {0}")]
    Forbidden(AuthorizationError),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AdminError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AdminError::Forbidden(_) => ErrorCode::Forbidden,
            AdminError::Validation(_) => ErrorCode::ValidationFailed,
            AdminError::NotFound(_) => ErrorCode::ParticipantNotFound,
            AdminError::StorageUnavailable(_) => ErrorCode::DatabaseError,
            AdminError::Internal(_) => ErrorCode::InternalError,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            AdminError::Forbidden(_) => 403,
            AdminError::Validation(_) => 400,
            AdminError::NotFound(_) => 404,
            AdminError::StorageUnavailable(_) => 503,
            AdminError::Internal(_) => 500,
        }
    }
}

impl From<AuthorizationError> for AdminError {
    fn from(err: AuthorizationError) -> Self {
        AdminError::Forbidden(err)
    }
}

impl From<ValidationError> for AdminError {
    fn from(err: ValidationError) -> Self {
        AdminError::Validation(err.to_string())
    }
}

impl From<ParticipantError> for AdminError {
    fn from(err: ParticipantError) -> Self {
        match err {
            ParticipantError::Validation(v) => AdminError::Validation(v.to_string()),
            ParticipantError::NotFound(key) => AdminError::NotFound(key.to_string()),
            ParticipantError::StorageUnavailable(msg) => AdminError::StorageUnavailable(msg),
            other => AdminError::Internal(other.message()),
        }
    }
}

impl From<AdminError> for DomainError {
    fn from(err: AdminError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
