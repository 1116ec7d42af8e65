//! Admin authorization port.
//!
//! Admin operations receive a credential and ask this port whether it grants
//! access. Where the credential comes from (header, config, directory) is an
//! adapter concern.

use async_trait::async_trait;
use secrecy::SecretString;
use thiserror::Error;

/// Opaque credential presented by an admin caller.
#[derive(Debug, Clone)]
pub struct AdminCredential {
    token: SecretString,
}

impl AdminCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: SecretString::new(token.into()),
        }
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    #[error("admin credential is missing")]
    Missing,

    #[error("admin credential was rejected")]
    Denied,
}

#[async_trait]
pub trait AdminAuthorizer: Send + Sync {
    async fn authorize(&self, credential: &AdminCredential) -> Result<(), AuthorizationError>;
}
