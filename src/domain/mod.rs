//! Domain layer - pure registration rules with no I/O.

pub mod foundation;
pub mod localization;
pub mod participant;
pub mod registration;
pub mod scheduling;
