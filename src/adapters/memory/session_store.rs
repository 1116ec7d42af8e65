//! In-memory session store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, InternalKey};
use crate::domain::registration::RegistrationContext;
use crate::ports::SessionStore;

/// Session contexts held for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<InternalKey, RegistrationContext>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, key: &InternalKey) -> Result<Option<RegistrationContext>, DomainError> {
        Ok(self.sessions.read().await.get(key).cloned())
    }

    async fn save(&self, context: &RegistrationContext) -> Result<(), DomainError> {
        self.sessions
            .write()
            .await
            .insert(context.internal_key.clone(), context.clone());
        Ok(())
    }
}
