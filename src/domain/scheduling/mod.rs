//! Scheduling domain module.
//!
//! Business-day offer windows and the per-date capacity gate.

mod capacity;
mod offer_window;
mod weekend;

pub use capacity::{CapacityPolicy, DateOffer, SeatRequest};
pub use offer_window::{OfferWindow, MAX_OFFER_DAYS};
pub use weekend::WeekendDays;
