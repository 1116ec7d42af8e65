//! HTTP handlers for admin endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::header;
use axum::response::IntoResponse;

use crate::application::handlers::admin::{
    ActivateCodeCommand, ActivateCodeHandler, ActivateCodeResult, AudienceFilter,
    BroadcastCommand, BroadcastHandler, BroadcastResult, BulkActivateHandler, BulkActivateResult,
    DateSummary, ExportRosterHandler, ExportRosterQuery, GetParticipantHandler,
    GetParticipantQuery, GetStatisticsHandler, GetStatisticsQuery, ListDatesHandler,
    ListDatesQuery, RegistrationStatistics, ResolveAudienceHandler, ResolveAudienceQuery,
};
use crate::domain::participant::Participant;
use crate::ports::{AdminAuthorizer, Clock, MessageSender, ParticipantRepository};

use super::super::error::ApiError;
use super::super::middleware::AdminToken;
use super::dto::{ActivationsRequest, AudienceResponse, BroadcastRequest, ExportParams};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AdminAppState {
    pub statistics: Arc<GetStatisticsHandler>,
    pub dates: Arc<ListDatesHandler>,
    pub export: Arc<ExportRosterHandler>,
    pub activate: Arc<ActivateCodeHandler>,
    pub bulk_activate: Arc<BulkActivateHandler>,
    pub participant: Arc<GetParticipantHandler>,
    pub audience: Arc<ResolveAudienceHandler>,
    pub broadcast: Arc<BroadcastHandler>,
}

impl AdminAppState {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        sender: Arc<dyn MessageSender>,
        authorizer: Arc<dyn AdminAuthorizer>,
        clock: Arc<dyn Clock>,
        broadcast_concurrency: usize,
    ) -> Self {
        Self {
            statistics: Arc::new(GetStatisticsHandler::new(
                participants.clone(),
                authorizer.clone(),
            )),
            dates: Arc::new(ListDatesHandler::new(participants.clone(), authorizer.clone())),
            export: Arc::new(ExportRosterHandler::new(
                participants.clone(),
                authorizer.clone(),
                clock.clone(),
            )),
            activate: Arc::new(ActivateCodeHandler::new(
                participants.clone(),
                authorizer.clone(),
                clock.clone(),
            )),
            bulk_activate: Arc::new(BulkActivateHandler::new(
                participants.clone(),
                authorizer.clone(),
                clock,
            )),
            participant: Arc::new(GetParticipantHandler::new(
                participants.clone(),
                authorizer.clone(),
            )),
            audience: Arc::new(ResolveAudienceHandler::new(
                participants.clone(),
                authorizer.clone(),
            )),
            broadcast: Arc::new(BroadcastHandler::new(
                participants,
                sender,
                authorizer,
                broadcast_concurrency,
            )),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/stats
pub async fn get_statistics(
    State(state): State<AdminAppState>,
    AdminToken(credential): AdminToken,
) -> Result<Json<RegistrationStatistics>, ApiError> {
    let stats = state
        .statistics
        .handle(&credential, GetStatisticsQuery)
        .await?;
    Ok(Json(stats))
}

/// GET /api/admin/dates
pub async fn list_dates(
    State(state): State<AdminAppState>,
    AdminToken(credential): AdminToken,
) -> Result<Json<Vec<DateSummary>>, ApiError> {
    Ok(Json(state.dates.handle(&credential, ListDatesQuery).await?))
}

/// GET /api/admin/export?date=YYYY-MM-DD
pub async fn export_roster(
    State(state): State<AdminAppState>,
    AdminToken(credential): AdminToken,
    Query(params): Query<ExportParams>,
) -> Result<impl IntoResponse, ApiError> {
    let export = state
        .export
        .handle(&credential, ExportRosterQuery { date: params.date })
        .await?;
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.filename),
        ),
    ];
    Ok((headers, export.content))
}

/// GET /api/admin/participants/:key
pub async fn get_participant(
    State(state): State<AdminAppState>,
    AdminToken(credential): AdminToken,
    Path(key): Path<String>,
) -> Result<Json<Participant>, ApiError> {
    let participant = state
        .participant
        .handle(&credential, GetParticipantQuery { internal_key: key })
        .await?;
    Ok(Json(participant))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/admin/activations
pub async fn bulk_activate(
    State(state): State<AdminAppState>,
    AdminToken(credential): AdminToken,
    Json(request): Json<ActivationsRequest>,
) -> Result<Json<BulkActivateResult>, ApiError> {
    let result = state
        .bulk_activate
        .handle(&credential, request.into_command())
        .await?;
    Ok(Json(result))
}

/// POST /api/admin/activations/:code
pub async fn activate_code(
    State(state): State<AdminAppState>,
    AdminToken(credential): AdminToken,
    Path(code): Path<String>,
) -> Result<Json<ActivateCodeResult>, ApiError> {
    let result = state
        .activate
        .handle(&credential, ActivateCodeCommand { code })
        .await?;
    Ok(Json(result))
}

/// POST /api/admin/audience
pub async fn resolve_audience(
    State(state): State<AdminAppState>,
    AdminToken(credential): AdminToken,
    Json(filter): Json<AudienceFilter>,
) -> Result<Json<AudienceResponse>, ApiError> {
    let keys = state
        .audience
        .handle(&credential, ResolveAudienceQuery { filter })
        .await?;
    Ok(Json(AudienceResponse::from(keys)))
}

/// POST /api/admin/broadcast
pub async fn broadcast(
    State(state): State<AdminAppState>,
    AdminToken(credential): AdminToken,
    Json(request): Json<BroadcastRequest>,
) -> Result<Json<BroadcastResult>, ApiError> {
    let result = state
        .broadcast
        .handle(
            &credential,
            BroadcastCommand {
                audience: request.audience,
                message: request.message,
            },
        )
        .await?;
    Ok(Json(result))
}
