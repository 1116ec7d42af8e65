//! Orientation Registrar - Multi-channel registration for orientation meetings
//!
//! This crate registers participants over chat and email, issues each a
//! sequential number and a one-time activation code, seats them on a meeting
//! date under a per-date cap, and exposes admin operations over HTTP.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
