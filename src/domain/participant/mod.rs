//! Participant domain module.
//!
//! Registrant records and the identifiers issued to them.
//!
//! # Module Structure
//!
//! - `aggregate` - Participant aggregate and creation request
//! - `activation_code` - 6-digit activation code and its generators
//! - `language` - Supported conversation languages
//! - `participant_type` - Advisory registrant classification
//! - `errors` - ParticipantError

mod activation_code;
mod aggregate;
mod errors;
mod language;
mod participant_type;

pub use activation_code::{
    draw_unique_code, ActivationCode, CodeGenerator, RandomCodeGenerator, CODE_LENGTH,
    MAX_CODE_ATTEMPTS,
};
pub use aggregate::{NewParticipant, Participant};
pub use errors::ParticipantError;
pub use language::Language;
pub use participant_type::ParticipantType;
