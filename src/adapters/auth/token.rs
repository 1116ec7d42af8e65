//! Shared-token admin authorizer.
//!
//! # Example
//!
//! ```ignore
//! use orientation_registrar::adapters::auth::SharedTokenAuthorizer;
//! use orientation_registrar::ports::{AdminAuthorizer, AdminCredential};
//!
//! let authorizer = SharedTokenAuthorizer::new(SecretString::new("s3cret".into()));
//! authorizer.authorize(&AdminCredential::new("s3cret")).await?;
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::ports::{AdminAuthorizer, AdminCredential, AuthorizationError};

/// Grants access when the presented token equals the configured secret.
#[derive(Clone)]
pub struct SharedTokenAuthorizer {
    expected: SecretString,
}

impl SharedTokenAuthorizer {
    pub fn new(expected: SecretString) -> Self {
        Self { expected }
    }
}

#[async_trait]
impl AdminAuthorizer for SharedTokenAuthorizer {
    async fn authorize(&self, credential: &AdminCredential) -> Result<(), AuthorizationError> {
        let presented = credential.token().expose_secret().as_bytes();
        if presented.is_empty() {
            return Err(AuthorizationError::Missing);
        }

        let expected = self.expected.expose_secret().as_bytes();
        if bool::from(presented.ct_eq(expected)) {
            Ok(())
        } else {
            tracing::warn!("admin token rejected");
            Err(AuthorizationError::Denied)
        }
    }
}
