//! Per-date capacity rules and date offers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed seat cap applied uniformly to every meeting date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapacityPolicy {
    cap: u32,
}

impl CapacityPolicy {
    pub fn new(cap: u32) -> Self {
        Self { cap }
    }

    pub fn cap(&self) -> u32 {
        self.cap
    }

    /// True while another participant fits.
    pub fn has_capacity(&self, current_count: u32) -> bool {
        current_count < self.cap
    }
}

/// A request to hold one seat on `date`, checked by the store at commit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatRequest {
    pub date: NaiveDate,
    pub capacity: CapacityPolicy,
}

impl SeatRequest {
    pub fn new(date: NaiveDate, capacity: CapacityPolicy) -> Self {
        Self { date, capacity }
    }
}

/// One selectable date as shown to a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOffer {
    /// 1-based position in the offer list.
    pub ordinal: u8,
    pub date: NaiveDate,
    /// Calendar days between today and `date`.
    pub days_ahead: i64,
    pub count: u32,
    pub cap: u32,
}

impl DateOffer {
    pub fn new(
        ordinal: u8,
        date: NaiveDate,
        today: NaiveDate,
        count: u32,
        capacity: CapacityPolicy,
    ) -> Self {
        Self {
            ordinal,
            date,
            days_ahead: (date - today).num_days(),
            count,
            cap: capacity.cap(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.count >= self.cap
    }
}
