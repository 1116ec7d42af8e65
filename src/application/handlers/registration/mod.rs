//! Registration flow handlers.
//!
//! - `engine` - RegistrationEngine, one conversational turn per call
//! - `errors` - RegistrationError

mod engine;
mod errors;

pub use engine::{HandleTurnCommand, RegistrationEngine, RegistrationSettings, TurnOutcome};
pub use errors::RegistrationError;
