//! Session store port.
//!
//! Persists the per-identity registration context between turns.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, InternalKey};
use crate::domain::registration::RegistrationContext;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns `None` for an identity with no stored context.
    async fn load(&self, key: &InternalKey) -> Result<Option<RegistrationContext>, DomainError>;

    /// Inserts or replaces the context for `context.internal_key`.
    async fn save(&self, context: &RegistrationContext) -> Result<(), DomainError>;
}
