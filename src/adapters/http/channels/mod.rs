//! HTTP adapter for channel ingress.
//!
//! - `POST /api/channels/interactive/events` - Chat update in, chat messages out
//! - `POST /api/channels/email/inbound` - Email in, reply email out

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ChannelsAppState;
pub use routes::channel_routes;
