//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - Durable participant and session storage
//! - `memory` - In-process storage for tests and single-node runs
//! - `channels` - Chat and email bindings of the registration flow
//! - `http` - Axum routes for channel ingress and admin operations
//! - `notify` - Outbound message senders
//! - `auth` - Admin credential check
//! - `clock` - System and fixed clocks

pub mod auth;
pub mod channels;
pub mod clock;
pub mod http;
pub mod memory;
pub mod notify;
pub mod postgres;

pub use auth::SharedTokenAuthorizer;
pub use clock::{FixedClock, SystemClock};
pub use memory::{InMemoryParticipantRepository, InMemorySessionStore};
pub use notify::{TracingSender, WebhookSender};
pub use postgres::{PostgresParticipantRepository, PostgresSessionStore};
