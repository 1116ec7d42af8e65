//! Application handlers.
//!
//! - `registration` - The conversational registration engine
//! - `admin` - Statistics, export, activation and broadcast

pub mod admin;
pub mod registration;
