//! Registration flow states.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Where an identity currently is in the registration conversation.
///
/// ```text
/// ChoosingLanguage ──► [ChoosingType] ──► ChoosingDate ──► Menu
///        ▲                                     ▲            │
///        └──────────── change language ────────┼────────────┤
///                                              └─ reschedule┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationState {
    #[default]
    ChoosingLanguage,
    ChoosingType,
    ChoosingDate,
    Menu,
}

impl RegistrationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationState::ChoosingLanguage => "choosing_language",
            RegistrationState::ChoosingType => "choosing_type",
            RegistrationState::ChoosingDate => "choosing_date",
            RegistrationState::Menu => "menu",
        }
    }
}

impl fmt::Display for RegistrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StateMachine for RegistrationState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use RegistrationState::*;
        matches!(
            (self, target),
            (ChoosingLanguage, ChoosingType)
                | (ChoosingLanguage, ChoosingDate)
                | (ChoosingLanguage, Menu)
                | (ChoosingType, ChoosingLanguage)
                | (ChoosingType, ChoosingDate)
                | (ChoosingType, Menu)
                | (ChoosingDate, ChoosingLanguage)
                | (ChoosingDate, Menu)
                | (Menu, ChoosingLanguage)
                | (Menu, ChoosingDate)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use RegistrationState::*;
        match self {
            ChoosingLanguage => vec![ChoosingType, ChoosingDate, Menu],
            ChoosingType => vec![ChoosingLanguage, ChoosingDate, Menu],
            ChoosingDate => vec![ChoosingLanguage, Menu],
            Menu => vec![ChoosingLanguage, ChoosingDate],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RegistrationState::*;

    const ALL: [RegistrationState; 4] = [ChoosingLanguage, ChoosingType, ChoosingDate, Menu];

    #[test]
    fn linear_flow_is_allowed() {
        assert!(ChoosingLanguage.transition_to(ChoosingType).is_ok());
        assert!(ChoosingType.transition_to(ChoosingDate).is_ok());
        assert!(ChoosingDate.transition_to(Menu).is_ok());
    }

    #[test]
    fn menu_loops_back_for_reschedule_and_language() {
        assert!(Menu.transition_to(ChoosingDate).is_ok());
        assert!(Menu.transition_to(ChoosingLanguage).is_ok());
    }

    #[test]
    fn menu_cannot_jump_to_type_selection() {
        assert!(Menu.transition_to(ChoosingType).is_err());
        assert!(ChoosingDate.transition_to(ChoosingType).is_err());
    }

    #[test]
    fn no_state_is_terminal() {
        for state in ALL {
            assert!(!state.is_terminal(), "{:?}", state);
        }
    }

    #[test]
    fn every_state_can_restart_or_reach_menu() {
        for state in ALL {
            if state != ChoosingLanguage {
                assert!(state.can_transition_to(&ChoosingLanguage));
            }
            if state != Menu {
                assert!(state.can_transition_to(&Menu));
            }
        }
    }

    #[test]
    fn valid_transitions_match_can_transition() {
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ChoosingDate).unwrap(),
            "\"choosing_date\""
        );
    }
}
