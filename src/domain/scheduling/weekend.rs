//! Weekend definition for business-day computation.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The two days of the week that are never offered as meeting dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeekendDays {
    /// Saturday and Sunday.
    #[default]
    SatSun,
    /// Friday and Saturday.
    FriSat,
}

impl WeekendDays {
    pub fn days(&self) -> [Weekday; 2] {
        match self {
            WeekendDays::SatSun => [Weekday::Sat, Weekday::Sun],
            WeekendDays::FriSat => [Weekday::Fri, Weekday::Sat],
        }
    }

    pub fn contains(&self, day: Weekday) -> bool {
        self.days().contains(&day)
    }
}

impl FromStr for WeekendDays {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sat_sun" => Ok(WeekendDays::SatSun),
            "fri_sat" => Ok(WeekendDays::FriSat),
            other => Err(ValidationError::invalid_format(
                "weekend",
                format!("expected sat_sun or fri_sat, got '{}'", other),
            )),
        }
    }
}
