//! Participant type tag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Advisory classification of a registrant.
///
/// Does not gate capacity or activation; it only feeds reporting and
/// broadcast targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantType {
    Individual,
    Organization,
    /// Used when the flow does not ask for a type.
    #[default]
    Participant,
}

impl ParticipantType {
    /// Types a registrant may pick explicitly.
    pub const SELECTABLE: [ParticipantType; 2] =
        [ParticipantType::Individual, ParticipantType::Organization];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantType::Individual => "individual",
            ParticipantType::Organization => "organization",
            ParticipantType::Participant => "participant",
        }
    }
}

impl fmt::Display for ParticipantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ParticipantType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "individual" => Ok(ParticipantType::Individual),
            "organization" => Ok(ParticipantType::Organization),
            "participant" => Ok(ParticipantType::Participant),
            other => Err(ValidationError::invalid_format(
                "participant_type",
                format!("unknown participant type '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for t in [
            ParticipantType::Individual,
            ParticipantType::Organization,
            ParticipantType::Participant,
        ] {
            assert_eq!(t.as_str().parse::<ParticipantType>(), Ok(t));
        }
    }

    #[test]
    fn generic_participant_is_not_selectable() {
        assert!(!ParticipantType::SELECTABLE.contains(&ParticipantType::Participant));
    }

    #[test]
    fn unknown_type_fails() {
        assert!("company".parse::<ParticipantType>().is_err());
    }
}
