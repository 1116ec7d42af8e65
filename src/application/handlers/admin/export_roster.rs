//! ExportRosterHandler - CSV export of the full roster or one date's roster.
//!
//! Output is UTF-8 with a byte-order mark so spreadsheet tools pick the right
//! encoding for Cyrillic and Hebrew names.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::participant::Participant;
use crate::ports::{AdminAuthorizer, AdminCredential, Clock, ParticipantRepository};

use super::{ensure_admin, AdminError};

const BOM: &[u8] = b"\xEF\xBB\xBF";

const FULL_HEADER: [&str; 11] = [
    "number",
    "internal_key",
    "handle",
    "display_name",
    "participant_type",
    "activation_code",
    "registered_at",
    "meeting_date",
    "language",
    "activated",
    "activated_at",
];

const DATE_HEADER: [&str; 7] = [
    "number",
    "internal_key",
    "handle",
    "display_name",
    "activation_code",
    "language",
    "activated",
];

/// Export everyone, or only the participants holding `date`.
#[derive(Debug, Clone, Default)]
pub struct ExportRosterQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterExport {
    pub filename: String,
    pub rows: usize,
    pub content: Vec<u8>,
}

pub struct ExportRosterHandler {
    participants: Arc<dyn ParticipantRepository>,
    authorizer: Arc<dyn AdminAuthorizer>,
    clock: Arc<dyn Clock>,
}

impl ExportRosterHandler {
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
        query: ExportRosterQuery,
    ) -> Result<RosterExport, AdminError> {
        ensure_admin(self.authorizer.as_ref(), credential, "export_roster").await?;

        let export = match query.date {
            Some(date) => {
                let participants = self.participants.list_by_date(date).await?;
                RosterExport {
                    filename: format!("participants_{}.csv", date.format("%Y-%m-%d")),
                    rows: participants.len(),
                    content: write_csv(&DATE_HEADER, participants.iter().map(date_row))?,
                }
            }
            None => {
                let participants = self.participants.list_all().await?;
                let stamp = self.clock.now().as_datetime().format("%Y%m%d_%H%M%S");
                RosterExport {
                    filename: format!("participants_all_{}.csv", stamp),
                    rows: participants.len(),
                    content: write_csv(&FULL_HEADER, participants.iter().map(full_row))?,
                }
            }
        };

        tracing::info!(filename = %export.filename, rows = export.rows, "roster exported");
        Ok(export)
    }
}

fn yes_no(flag: bool) -> String {
    String::from(if flag { "yes" } else { "no" })
}

fn full_row(p: &Participant) -> Vec<String> {
    vec![
        p.number.to_string(),
        p.internal_key.to_string(),
        p.handle.clone().unwrap_or_default(),
        p.display_name.clone().unwrap_or_default(),
        p.participant_type.to_string(),
        p.activation_code.to_string(),
        p.registered_at.to_rfc3339(),
        p.meeting_date.map(|d| d.to_string()).unwrap_or_default(),
        p.language.to_string(),
        yes_no(p.is_activated),
        p.activated_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
    ]
}

fn date_row(p: &Participant) -> Vec<String> {
    vec![
        p.number.to_string(),
        p.internal_key.to_string(),
        p.handle.clone().unwrap_or_default(),
        p.display_name.clone().unwrap_or_default(),
        p.activation_code.to_string(),
        p.language.to_string(),
        yes_no(p.is_activated),
    ]
}

fn write_csv(
    header: &[&str],
    rows: impl Iterator<Item = Vec<String>>,
) -> Result<Vec<u8>, AdminError> {
    let csv_error = |e: csv::Error| AdminError::Internal(format!("csv export failed: {}", e));

    let mut writer = csv::Writer::from_writer(BOM.to_vec());
    writer.write_record(header).map_err(csv_error)?;
    for row in rows {
        writer.write_record(&row).map_err(csv_error)?;
    }
    writer
        .into_inner()
        .map_err(|e| AdminError::Internal(format!("csv export failed: {}", e.error())))
}
