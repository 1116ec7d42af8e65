//! Clock implementations.

use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use std::sync::Mutex;

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Wall clock with a fixed local offset for calendar decisions.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }

    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }
}

/// Settable clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<Timestamp>,
    today: Mutex<NaiveDate>,
}

impl FixedClock {
    pub fn new(now: Timestamp, today: NaiveDate) -> Self {
        Self {
            now: Mutex::new(now),
            today: Mutex::new(today),
        }
    }

    /// Clock whose "now" is the current instant and whose date is pinned.
    pub fn on(today: NaiveDate) -> Self {
        Self::new(Timestamp::now(), today)
    }

    pub fn set_today(&self, today: NaiveDate) {
        if let Ok(mut guard) = self.today.lock() {
            *guard = today;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.now.lock().map(|t| *t).unwrap_or_else(|e| *e.into_inner())
    }

    fn today(&self) -> NaiveDate {
        self.today.lock().map(|d| *d).unwrap_or_else(|e| *e.into_inner())
    }
}
