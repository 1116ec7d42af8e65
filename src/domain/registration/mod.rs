//! Registration domain module.
//!
//! The conversation flow shared by every channel: states, the inputs that
//! drive them, the per-identity session record and the abstract replies.
//!
//! # Module Structure
//!
//! - `state` - RegistrationState state machine
//! - `event` - Decoded inputs (RegistrationEvent, MenuAction, DateChoice)
//! - `context` - Per-identity session record
//! - `reply` - Abstract responses and the issued credential

mod context;
mod event;
mod reply;
mod state;

pub use context::RegistrationContext;
pub use event::{DateChoice, MenuAction, RegistrationEvent};
pub use reply::{Credential, MenuSummary, Reply, ReplyKind};
pub use state::RegistrationState;
