//! Request and response bodies for admin routes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::admin::{AudienceFilter, BulkActivateCommand};
use crate::domain::foundation::InternalKey;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportParams {
    pub date: Option<NaiveDate>,
}

/// Codes as a list, as pasted text, or both.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivationsRequest {
    #[serde(default)]
    pub codes: Vec<String>,
    #[serde(default)]
    pub raw: Option<String>,
}

impl ActivationsRequest {
    pub fn into_command(self) -> BulkActivateCommand {
        let mut codes: Vec<String> = self.codes.into_iter().map(|c| c.trim().to_string()).collect();
        if let Some(raw) = self.raw {
            codes.extend(BulkActivateCommand::from_raw(&raw).codes);
        }
        BulkActivateCommand { codes }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastRequest {
    #[serde(default)]
    pub audience: AudienceFilter,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AudienceResponse {
    pub count: usize,
    pub internal_keys: Vec<InternalKey>,
}

impl From<Vec<InternalKey>> for AudienceResponse {
    fn from(internal_keys: Vec<InternalKey>) -> Self {
        Self {
            count: internal_keys.len(),
            internal_keys,
        }
    }
}
