//! Channel-independent inputs to the registration flow.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;
use crate::domain::participant::{Language, ParticipantType};

/// A decoded user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RegistrationEvent {
    Start,
    Language(Language),
    ParticipantType(ParticipantType),
    Date(DateChoice),
    Menu(MenuAction),
    Help,
    /// Raw input that matched nothing; answered with help instead of failing.
    Unrecognized(String),
}

/// Reference to one offered date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateChoice {
    /// 1-based position in the current offer list.
    Ordinal(u8),
    Literal(NaiveDate),
}

/// Commands available from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    RemindId,
    RemindCode,
    RemindDate,
    Reschedule,
    HowToActivate,
    Instruction,
    ChangeLanguage,
    Show,
}

impl MenuAction {
    /// Menu entries in display order. Their 1-based positions are the
    /// numerals accepted by text channels.
    pub const LISTED: [MenuAction; 7] = [
        MenuAction::RemindId,
        MenuAction::RemindCode,
        MenuAction::RemindDate,
        MenuAction::Reschedule,
        MenuAction::HowToActivate,
        MenuAction::Instruction,
        MenuAction::ChangeLanguage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuAction::RemindId => "remind_id",
            MenuAction::RemindCode => "remind_code",
            MenuAction::RemindDate => "remind_date",
            MenuAction::Reschedule => "reschedule",
            MenuAction::HowToActivate => "how_to_activate",
            MenuAction::Instruction => "instruction",
            MenuAction::ChangeLanguage => "change_language",
            MenuAction::Show => "show",
        }
    }

    pub fn from_ordinal(ordinal: usize) -> Option<MenuAction> {
        ordinal
            .checked_sub(1)
            .and_then(|index| Self::LISTED.get(index).copied())
    }
}

impl FromStr for MenuAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let candidate = s.trim().to_lowercase();
        Self::LISTED
            .iter()
            .chain(std::iter::once(&MenuAction::Show))
            .find(|action| action.as_str() == candidate)
            .copied()
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "menu_action",
                    format!("unknown menu action '{}'", candidate),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_action_parses_its_own_names() {
        for action in MenuAction::LISTED {
            assert_eq!(action.as_str().parse::<MenuAction>(), Ok(action));
        }
        assert_eq!("show".parse::<MenuAction>(), Ok(MenuAction::Show));
    }

    #[test]
    fn menu_ordinals_cover_listed_actions() {
        assert_eq!(MenuAction::from_ordinal(1), Some(MenuAction::RemindId));
        assert_eq!(MenuAction::from_ordinal(7), Some(MenuAction::ChangeLanguage));
        assert_eq!(MenuAction::from_ordinal(8), None);
    }

    #[test]
    fn event_serializes_with_kind_tag() {
        let json = serde_json::to_value(RegistrationEvent::Language(Language::En)).unwrap();
        assert_eq!(json["kind"], "language");
        assert_eq!(json["value"], "en");
    }
}
