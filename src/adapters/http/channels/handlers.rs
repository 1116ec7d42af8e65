//! HTTP handlers for channel ingress.
//!
//! Each handler derives the internal key, decodes the channel input, runs one
//! registration turn and encodes the replies for the channel.

use std::sync::Arc;

use axum::extract::{Json, State};

use crate::adapters::channels::email::{self, EmailMessage, InboundEmail};
use crate::adapters::channels::interactive;
use crate::application::handlers::registration::{HandleTurnCommand, RegistrationEngine};
use crate::domain::scheduling::OfferWindow;
use crate::ports::Clock;

use super::super::error::ApiError;
use super::dto::{InteractiveEventRequest, InteractiveEventResponse};

/// Shared state for channel routes.
#[derive(Clone)]
pub struct ChannelsAppState {
    pub engine: Arc<RegistrationEngine>,
    pub clock: Arc<dyn Clock>,
    pub interactive_window: OfferWindow,
    pub email_window: OfferWindow,
}

/// POST /api/channels/interactive/events
pub async fn interactive_event(
    State(state): State<ChannelsAppState>,
    Json(request): Json<InteractiveEventRequest>,
) -> Result<Json<InteractiveEventResponse>, ApiError> {
    let key = interactive::internal_key(&request.account_id)?;
    let event = interactive::decode(&request.input, state.clock.today());
    tracing::debug!(internal_key = %key, ?event, "interactive event");

    let cmd = HandleTurnCommand::new(key, event, state.interactive_window)
        .with_profile(request.display_name, request.handle);
    let outcome = state.engine.handle(cmd).await?;

    Ok(Json(InteractiveEventResponse {
        state: outcome.state,
        language: outcome.language,
        messages: interactive::encode(&outcome.replies),
    }))
}

/// POST /api/channels/email/inbound
pub async fn email_inbound(
    State(state): State<ChannelsAppState>,
    Json(inbound): Json<InboundEmail>,
) -> Result<Json<Vec<EmailMessage>>, ApiError> {
    let address = email::normalize_address(&inbound.from)?;
    let key = email::internal_key(&address)?;

    let context = state.engine.context_for(&key).await?;
    let event = email::decode(&inbound.body, context.state, state.clock.today());
    tracing::debug!(internal_key = %key, ?event, state = %context.state, "inbound email");

    let cmd = HandleTurnCommand::new(key, event, state.email_window)
        .with_profile(sender_name(&inbound.from, &address), Some(address.clone()));
    let outcome = state.engine.handle(cmd).await?;

    Ok(Json(vec![email::encode(&address, &outcome)]))
}

/// Display name from `Name <addr>`, falling back to the address local part.
fn sender_name(raw_from: &str, address: &str) -> Option<String> {
    let quoted = raw_from
        .split_once('<')
        .map(|(name, _)| name.trim().trim_matches('"').trim())
        .filter(|name| !name.is_empty());
    quoted
        .or_else(|| address.split_once('@').map(|(local, _)| local))
        .map(str::to_string)
}
