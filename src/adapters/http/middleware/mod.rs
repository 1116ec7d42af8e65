//! HTTP middleware for axum.
//!
//! - `admin_token` - Admin credential extraction

pub mod admin_token;

pub use admin_token::{AdminToken, ADMIN_TOKEN_HEADER};
