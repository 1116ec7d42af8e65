//! GetParticipantHandler - Look up one participant by channel identity.

use std::sync::Arc;

use crate::domain::foundation::InternalKey;
use crate::domain::participant::Participant;
use crate::ports::{AdminAuthorizer, AdminCredential, ParticipantRepository};

use super::{ensure_admin, AdminError};

#[derive(Debug, Clone)]
pub struct GetParticipantQuery {
    pub internal_key: String,
}

pub struct GetParticipantHandler {
    participants: Arc<dyn ParticipantRepository>,
    authorizer: Arc<dyn AdminAuthorizer>,
}

impl GetParticipantHandler {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        authorizer: Arc<dyn AdminAuthorizer>,
    ) -> Self {
        Self {
            participants,
            authorizer,
        }
    }

    pub async fn handle(
        &self,
        credential: &AdminCredential,
        query: GetParticipantQuery,
    ) -> Result<Participant, AdminError> {
        ensure_admin(self.authorizer.as_ref(), credential, "get_participant").await?;
        let key = InternalKey::new(query.internal_key)?;
        self.participants
            .get_by_key(&key)
            .await?
            .ok_or_else(|| AdminError::NotFound(format!("participant {}", key)))
    }
}
