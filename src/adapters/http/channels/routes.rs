//! Axum router for channel ingress.

use axum::{routing::post, Router};

use super::handlers::{email_inbound, interactive_event, ChannelsAppState};

/// # Routes
/// - `POST /interactive/events` - One chat update
/// - `POST /email/inbound` - One received email
pub fn channel_routes() -> Router<ChannelsAppState> {
    Router::new()
        .route("/interactive/events", post(interactive_event))
        .route("/email/inbound", post(email_inbound))
}
