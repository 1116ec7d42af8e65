//! Rolling window of selectable meeting dates.
//!
//! The window is never persisted. Every offer recomputes it from "today",
//! so the dates a participant sees can shift from one day to the next.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::WeekendDays;

/// Upper bound on offered dates in any channel.
pub const MAX_OFFER_DAYS: u8 = 6;

/// Next-N-business-days computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferWindow {
    pub days: u8,
    pub include_today: bool,
    pub weekend: WeekendDays,
}

impl OfferWindow {
    pub fn new(days: u8, include_today: bool, weekend: WeekendDays) -> Self {
        Self {
            days: days.clamp(1, MAX_OFFER_DAYS),
            include_today,
            weekend,
        }
    }

    /// Returns the offered dates in ascending order.
    pub fn dates(&self, today: NaiveDate) -> Vec<NaiveDate> {
        let mut current = if self.include_today {
            today
        } else {
            today + Duration::days(1)
        };
        let mut dates = Vec::with_capacity(self.days as usize);
        while dates.len() < self.days as usize {
            if !self.weekend.contains(current.weekday()) {
                dates.push(current);
            }
            current += Duration::days(1);
        }
        dates
    }

    /// 1-based position of `date` within today's window.
    pub fn ordinal_of(&self, today: NaiveDate, date: NaiveDate) -> Option<u8> {
        self.dates(today)
            .iter()
            .position(|d| *d == date)
            .map(|index| index as u8 + 1)
    }

    /// Date at a 1-based position within today's window.
    pub fn date_at(&self, today: NaiveDate, ordinal: u8) -> Option<NaiveDate> {
        (ordinal as usize)
            .checked_sub(1)
            .and_then(|index| self.dates(today).get(index).copied())
    }
}
