//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `ParticipantRepository` - Participant store, identifier registry and capacity gate
//! - `SessionStore` - Per-identity conversation context
//!
//! ## Delivery and Access Ports
//!
//! - `MessageSender` - Best-effort outbound messages
//! - `AdminAuthorizer` - Admin credential check
//! - `Clock` - Time source

mod admin_authorizer;
mod clock;
mod message_sender;
mod participant_repository;
mod session_store;

pub use admin_authorizer::{AdminAuthorizer, AdminCredential, AuthorizationError};
pub use clock::Clock;
pub use message_sender::{DeliveryError, MessageSender, OutboundMessage};
pub use participant_repository::{ActivationOutcome, ParticipantRepository};
pub use session_store::SessionStore;
