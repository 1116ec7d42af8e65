//! Admin handlers.
//!
//! Every handler checks the caller's [`AdminCredential`] with the injected
//! [`AdminAuthorizer`] before touching the store.
//!
//! ## Commands
//! - Activating participants by code (single or bulk)
//! - Broadcasting a message to an audience
//!
//! ## Queries
//! - Statistics and per-date summaries
//! - Roster export (CSV)
//! - Participant lookup and audience resolution

mod activate_codes;
mod broadcast;
mod errors;
mod export_roster;
mod get_participant;
mod get_statistics;
mod list_dates;

use crate::ports::{AdminAuthorizer, AdminCredential};

pub use errors::AdminError;

// Commands
pub use activate_codes::{
    ActivateCodeCommand, ActivateCodeHandler, ActivateCodeResult, BulkActivateCommand,
    BulkActivateHandler, BulkActivateResult,
};
pub use broadcast::{
    AudienceFilter, BroadcastCommand, BroadcastHandler, BroadcastResult, ResolveAudienceHandler,
    ResolveAudienceQuery,
};

// Queries
pub use export_roster::{ExportRosterHandler, ExportRosterQuery, RosterExport};
pub use get_participant::{GetParticipantHandler, GetParticipantQuery};
pub use get_statistics::{
    DateCount, GetStatisticsHandler, GetStatisticsQuery, RegistrationStatistics,
};
pub use list_dates::{DateSummary, ListDatesHandler, ListDatesQuery};

async fn ensure_admin(
    authorizer: &dyn AdminAuthorizer,
    credential: &AdminCredential,
    operation: &'static str,
) -> Result<(), AdminError> {
    authorizer.authorize(credential).await.map_err(|err| {
        tracing::warn!(operation, reason = %err, "admin operation refused");
        AdminError::from(err)
    })
}
