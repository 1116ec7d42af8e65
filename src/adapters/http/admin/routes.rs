//! Axum router for admin endpoints.
//!
//! Every route expects the `X-Admin-Token` header.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    activate_code, broadcast, bulk_activate, export_roster, get_participant, get_statistics,
    list_dates, resolve_audience, AdminAppState,
};

/// # Routes
/// - `GET /stats` - Registration statistics
/// - `GET /dates` - Per-date summaries
/// - `GET /export` - CSV roster, optionally `?date=YYYY-MM-DD`
/// - `GET /participants/:key` - One participant
/// - `POST /activations` - Bulk activation
/// - `POST /activations/:code` - Single activation
/// - `POST /audience` - Resolve a broadcast audience
/// - `POST /broadcast` - Send a message to an audience
pub fn admin_routes() -> Router<AdminAppState> {
    Router::new()
        .route("/stats", get(get_statistics))
        .route("/dates", get(list_dates))
        .route("/export", get(export_roster))
        .route("/participants/:key", get(get_participant))
        .route("/activations", post(bulk_activate))
        .route("/activations/:code", post(activate_code))
        .route("/audience", post(resolve_audience))
        .route("/broadcast", post(broadcast))
}
