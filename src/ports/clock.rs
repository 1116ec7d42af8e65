//! Time source port.

use chrono::NaiveDate;

use crate::domain::foundation::Timestamp;

/// Supplies "now" and the local calendar day offers are computed from.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;

    /// Calendar date in the event's time zone.
    fn today(&self) -> NaiveDate;
}
