//! In-memory adapters.
//!
//! Used for tests, local development and `storage = "memory"` deployments.
//! State is lost when the process exits.

mod participant_repository;
mod session_store;

pub use participant_repository::InMemoryParticipantRepository;
pub use session_store::InMemorySessionStore;
