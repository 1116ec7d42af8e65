//! Admin authorization adapters.
//!
//! - `token` - Shared-secret authorizer compared in constant time

mod token;

pub use token::SharedTokenAuthorizer;
