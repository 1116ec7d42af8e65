//! JSON error responses shared by every route.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::application::handlers::admin::AdminError;
use crate::application::handlers::registration::RegistrationError;
use crate::domain::foundation::{ErrorCode, ValidationError};

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

/// Error returned by HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    Admin(AdminError),
    Registration(RegistrationError),
    Validation(ValidationError),
}

impl From<AdminError> for ApiError {
    fn from(err: AdminError) -> Self {
        ApiError::Admin(err)
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        ApiError::Registration(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::Admin(err) => (
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                ErrorResponse::new(err.code().to_string(), err.to_string()),
            ),
            ApiError::Registration(err) => {
                let status = match err {
                    RegistrationError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, ErrorResponse::new(err.code().to_string(), err.to_string()))
            }
            ApiError::Validation(err) => {
                let field = match err {
                    ValidationError::EmptyField { field }
                    | ValidationError::InvalidFormat { field, .. }
                    | ValidationError::OutOfRange { field, .. } => field.clone(),
                };
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::with_details(
                        ErrorCode::ValidationFailed.to_string(),
                        err.to_string(),
                        serde_json::json!({ "field": field }),
                    ),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.parts();
        if status.is_server_error() {
            tracing::error!(error_code = %body.error_code, message = %body.message, "request failed");
        }
        (status, Json(body)).into_response()
    }
}
