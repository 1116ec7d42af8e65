//! HTTP adapters - REST API implementations.
//!
//! - `channels` - Chat and email ingress, mounted at `/api/channels`
//! - `admin` - Admin operations, mounted at `/api/admin`
//! - `GET /health` - Liveness

pub mod admin;
pub mod channels;
pub mod error;
pub mod middleware;

use std::time::Duration;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use admin::{admin_routes, AdminAppState};
pub use channels::{channel_routes, ChannelsAppState};
pub use error::{ApiError, ErrorResponse};

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Complete application router.
pub fn router(channels: ChannelsAppState, admin: AdminAppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/channels", channel_routes().with_state(channels))
        .nest("/api/admin", admin_routes().with_state(admin))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
}
