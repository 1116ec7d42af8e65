//! Activation handlers - flip participants to activated by their code.
//!
//! Activation proves meeting attendance and is only ever done by an admin.
//! Re-activating an already active code succeeds without changing
//! `activated_at`.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::participant::{ActivationCode, Participant};
use crate::ports::{
    ActivationOutcome, AdminAuthorizer, AdminCredential, Clock, ParticipantRepository,
};

use super::{ensure_admin, AdminError};

// ════════════════════════════════════════════════════════════════════════════
// Single code
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct ActivateCodeCommand {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivateCodeResult {
    pub participant: Participant,
    pub already_active: bool,
}

pub struct ActivateCodeHandler {
    participants: Arc<dyn ParticipantRepository>,
    authorizer: Arc<dyn AdminAuthorizer>,
    clock: Arc<dyn Clock>,
}

impl ActivateCodeHandler {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        authorizer: Arc<dyn AdminAuthorizer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            participants,
            authorizer,
            clock,
        }
    }

    pub async fn handle(
        &self,
        credential: &AdminCredential,
        cmd: ActivateCodeCommand,
    ) -> Result<ActivateCodeResult, AdminError> {
        ensure_admin(self.authorizer.as_ref(), credential, "activate_code").await?;
        let code = ActivationCode::parse(&cmd.code)?;

        match self
            .participants
            .activate_by_code(&code, self.clock.now())
            .await?
        {
            ActivationOutcome::Activated(participant) => {
                tracing::info!(number = %participant.number, "participant activated");
                Ok(ActivateCodeResult {
                    participant,
                    already_active: false,
                })
            }
            ActivationOutcome::AlreadyActivated(participant) => Ok(ActivateCodeResult {
                participant,
                already_active: true,
            }),
            ActivationOutcome::UnknownCode => Err(AdminError::NotFound(format!(
                "no participant holds activation code {}",
                code
            ))),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Bulk
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct BulkActivateCommand {
    pub codes: Vec<String>,
}

impl BulkActivateCommand {
    /// Splits pasted text on newlines and commas. Blank entries are dropped.
    pub fn from_raw(raw: &str) -> Self {
        let codes = raw
            .split(|c: char| c == '\n' || c == ',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        Self { codes }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BulkActivateResult {
    pub succeeded: u32,
    pub failed: u32,
    /// Entries that were malformed or matched nobody, in input order.
    pub rejected: Vec<String>,
}

pub struct BulkActivateHandler {
    participants: Arc<dyn ParticipantRepository>,
    authorizer: Arc<dyn AdminAuthorizer>,
    clock: Arc<dyn Clock>,
}

impl BulkActivateHandler {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        authorizer: Arc<dyn AdminAuthorizer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            participants,
            authorizer,
            clock,
        }
    }

    /// Storage failures abort the batch. Codes processed before the failure
    /// stay activated, and resubmitting the batch is safe.
    pub async fn handle(
        &self,
        credential: &AdminCredential,
        cmd: BulkActivateCommand,
    ) -> Result<BulkActivateResult, AdminError> {
        ensure_admin(self.authorizer.as_ref(), credential, "bulk_activate").await?;

        let mut result = BulkActivateResult::default();
        let at = self.clock.now();

        for raw in cmd.codes {
            let Ok(code) = ActivationCode::parse(&raw) else {
                result.failed += 1;
                result.rejected.push(raw);
                continue;
            };
            if self.participants.activate_by_code(&code, at).await?.is_success() {
                result.succeeded += 1;
            } else {
                result.failed += 1;
                result.rejected.push(raw);
            }
        }

        tracing::info!(
            succeeded = result.succeeded,
            failed = result.failed,
            "bulk activation finished"
        );
        Ok(result)
    }
}
