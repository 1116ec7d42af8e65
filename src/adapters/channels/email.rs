//! Email binding.
//!
//! Inbound mail is reduced to the reply text the sender actually wrote,
//! then read for keywords, a literal date or a bare number. Numbers mean
//! different things depending on the step the sender is on.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::application::handlers::registration::TurnOutcome;
use crate::domain::foundation::{InternalKey, ValidationError};
use crate::domain::localization::{text, TextKey};
use crate::domain::participant::{Language, ParticipantType};
use crate::domain::registration::{
    DateChoice, MenuAction, RegistrationEvent, RegistrationState, Reply, ReplyKind,
};

use super::keywords::{lookup, tokens, Keyword};
use super::{menu_label, offer_caption, reply_text};

pub const CHANNEL: &str = "email";

/// Hex digits of the address digest kept in the key (128 bits).
const KEY_HEX_LEN: usize = 32;

/// A message received from the mailbox poller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEmail {
    pub from: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub body: String,
}

/// A message to hand to the mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Bare lower-cased address from `addr` or `Name <addr>`.
pub fn normalize_address(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    let bare = match (trimmed.rfind('<'), trimmed.rfind('>')) {
        (Some(open), Some(close)) if open < close => &trimmed[open + 1..close],
        _ => trimmed,
    };
    let address = bare.trim().to_lowercase();
    if address.is_empty() {
        return Err(ValidationError::empty_field("email"));
    }
    match address.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(address),
        _ => Err(ValidationError::invalid_format(
            "email",
            format!("'{}' is not an email address", address),
        )),
    }
}

/// Stable identity for a sender address.
///
/// The same address, however it is capitalized or wrapped, always yields the
/// same key.
pub fn internal_key(address: &str) -> Result<InternalKey, ValidationError> {
    let normalized = normalize_address(address)?;
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    InternalKey::scoped(CHANNEL, &digest[..KEY_HEX_LEN])
}

/// Lines the sender typed, without quoted history or signature.
fn fresh_text(body: &str) -> String {
    body.lines()
        .take_while(|line| line.trim_end() != "--")
        .filter(|line| !line.trim_start().starts_with('>'))
        .collect::<Vec<_>>()
        .join("\n")
}

fn literal_date(text: &str) -> Option<NaiveDate> {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_ascii_digit()))
        .find_map(|word| {
            NaiveDate::parse_from_str(word, "%d.%m.%Y")
                .or_else(|_| NaiveDate::parse_from_str(word, "%Y-%m-%d"))
                .ok()
        })
}

/// First short number in the text (`"2"`, `"2."`, `"#3"`).
fn leading_numeral(text: &str) -> Option<usize> {
    tokens(text)
        .into_iter()
        .find(|t| t.len() <= 2 && t.chars().all(|c| c.is_ascii_digit()))
        .and_then(|t| t.parse().ok())
}

pub fn decode(body: &str, state: RegistrationState, today: NaiveDate) -> RegistrationEvent {
    let fresh = fresh_text(body);
    let unrecognized = || RegistrationEvent::Unrecognized(fresh.trim().to_string());

    if let Some(date) = literal_date(&fresh) {
        return RegistrationEvent::Date(DateChoice::Literal(date));
    }

    match lookup(&fresh) {
        Some(Keyword::Event(event)) => return event,
        Some(Keyword::DaysAhead(n)) => {
            return today
                .checked_add_days(Days::new(n.unsigned_abs()))
                .map(|d| RegistrationEvent::Date(DateChoice::Literal(d)))
                .unwrap_or_else(unrecognized);
        }
        None => {}
    }

    let Some(n) = leading_numeral(&fresh) else {
        return unrecognized();
    };
    let event = match state {
        RegistrationState::ChoosingLanguage => {
            Language::from_ordinal(n).map(RegistrationEvent::Language)
        }
        RegistrationState::ChoosingType => n
            .checked_sub(1)
            .and_then(|i| ParticipantType::SELECTABLE.get(i).copied())
            .map(RegistrationEvent::ParticipantType),
        RegistrationState::ChoosingDate => u8::try_from(n)
            .ok()
            .map(|o| RegistrationEvent::Date(DateChoice::Ordinal(o))),
        RegistrationState::Menu => MenuAction::from_ordinal(n).map(RegistrationEvent::Menu),
    };
    event.unwrap_or_else(unrecognized)
}

/// Folds every reply of a turn into one email.
pub fn encode(to: &str, outcome: &TurnOutcome) -> EmailMessage {
    let body = outcome
        .replies
        .iter()
        .map(encode_reply)
        .collect::<Vec<_>>()
        .join("\n\n");
    EmailMessage {
        to: to.to_string(),
        subject: text(outcome.language, TextKey::EmailSubject).to_string(),
        body,
    }
}

fn encode_reply(reply: &Reply) -> String {
    let lang = reply.language;
    let mut block = reply_text(reply);
    let mut append = |extra: String| {
        block.push_str("\n\n");
        block.push_str(&extra);
    };

    match &reply.kind {
        ReplyKind::ChooseLanguage => append(text(lang, TextKey::EmailReplyLanguage).to_string()),
        ReplyKind::ChooseType => append(text(lang, TextKey::EmailReplyType).to_string()),
        ReplyKind::ChooseDate { offers } => {
            let list = offers
                .iter()
                .map(|offer| format!("{}. {}", offer.ordinal, offer_caption(reply, offer)))
                .collect::<Vec<_>>()
                .join("\n");
            append(list);
            append(text(lang, TextKey::EmailReplyDate).to_string());
        }
        ReplyKind::Menu { .. } => {
            let list = MenuAction::LISTED
                .iter()
                .enumerate()
                .map(|(i, action)| format!("{}. {}", i + 1, menu_label(lang, *action)))
                .collect::<Vec<_>>()
                .join("\n");
            append(list);
            append(text(lang, TextKey::EmailReplyMenu).to_string());
        }
        _ => {}
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scheduling::{CapacityPolicy, DateOffer};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[test]
    fn address_normalization_extracts_and_lowercases() {
        assert_eq!(
            normalize_address("  Dana Levi <Dana.Levi@Example.COM> ").unwrap(),
            "dana.levi@example.com"
        );
        assert_eq!(normalize_address("a@b.io").unwrap(), "a@b.io");
        assert!(normalize_address("not-an-address").is_err());
        assert!(normalize_address("@example.com").is_err());
        assert!(normalize_address("   ").is_err());
    }

    #[test]
    fn internal_key_is_stable_across_address_forms() {
        let plain = internal_key("dana@example.com").unwrap();
        let wrapped = internal_key("Dana <DANA@example.com>").unwrap();
        assert_eq!(plain, wrapped);
        assert!(plain.as_str().starts_with("email:"));
        assert_eq!(plain.as_str().len(), "email:".len() + KEY_HEX_LEN);

        let other = internal_key("dan@example.com").unwrap();
        assert_ne!(plain, other);
    }

    #[test]
    fn quoted_history_is_ignored() {
        let body = "2\n\nOn Mon, registrar wrote:\n> 1. RUSSIAN\n> 2. ENGLISH\n> 3. HEBREW";
        assert_eq!(
            decode(body, RegistrationState::ChoosingLanguage, today()),
            RegistrationEvent::Language(Language::En)
        );
    }

    #[test]
    fn signature_is_ignored() {
        let body = "menu\n--\nSent from a phone, reply 3 to unsubscribe";
        assert_eq!(
            decode(body, RegistrationState::Menu, today()),
            RegistrationEvent::Menu(MenuAction::Show)
        );
    }

    #[test]
    fn numerals_resolve_by_state() {
        assert_eq!(
            decode("3", RegistrationState::ChoosingLanguage, today()),
            RegistrationEvent::Language(Language::He)
        );
        assert_eq!(
            decode("2.", RegistrationState::ChoosingType, today()),
            RegistrationEvent::ParticipantType(ParticipantType::Organization)
        );
        assert_eq!(
            decode("5", RegistrationState::ChoosingDate, today()),
            RegistrationEvent::Date(DateChoice::Ordinal(5))
        );
        assert_eq!(
            decode("4", RegistrationState::Menu, today()),
            RegistrationEvent::Menu(MenuAction::Reschedule)
        );
    }

    #[test]
    fn out_of_range_numerals_are_unrecognized() {
        assert!(matches!(
            decode("4", RegistrationState::ChoosingLanguage, today()),
            RegistrationEvent::Unrecognized(_)
        ));
        assert!(matches!(
            decode("9", RegistrationState::Menu, today()),
            RegistrationEvent::Unrecognized(_)
        ));
    }

    #[test]
    fn keywords_win_over_state() {
        assert_eq!(
            decode("Регистрация", RegistrationState::Menu, today()),
            RegistrationEvent::Start
        );
        assert_eq!(
            decode("HELP", RegistrationState::ChoosingDate, today()),
            RegistrationEvent::Help
        );
    }

    #[test]
    fn dates_resolve_from_words_and_literals() {
        assert_eq!(
            decode("tomorrow please", RegistrationState::ChoosingDate, today()),
            RegistrationEvent::Date(DateChoice::Literal(date(10, 16)))
        );
        assert_eq!(
            decode("19.10.2026", RegistrationState::ChoosingDate, today()),
            RegistrationEvent::Date(DateChoice::Literal(date(10, 19)))
        );
        assert_eq!(
            decode("I pick 2026-10-20.", RegistrationState::ChoosingDate, today()),
            RegistrationEvent::Date(DateChoice::Literal(date(10, 20)))
        );
    }

    #[test]
    fn empty_body_is_unrecognized() {
        assert!(matches!(
            decode("> only quoted text", RegistrationState::Menu, today()),
            RegistrationEvent::Unrecognized(_)
        ));
    }

    #[test]
    fn encode_lists_dates_with_reply_instruction() {
        let policy = CapacityPolicy::new(290);
        let offers = vec![
            DateOffer::new(1, date(10, 16), today(), 12, policy),
            DateOffer::new(2, date(10, 19), today(), 290, policy),
        ];
        let outcome = TurnOutcome {
            state: RegistrationState::ChoosingDate,
            language: Language::En,
            replies: vec![Reply::new(Language::En, ReplyKind::ChooseDate { offers })],
        };
        let message = encode("dana@example.com", &outcome);

        assert_eq!(message.to, "dana@example.com");
        assert_eq!(message.subject, "🕊️ Registration");
        assert!(message
            .body
            .contains("1. Tomorrow (Friday) - 16.10.2026 (12/290)"));
        assert!(message.body.contains("2. Monday - 19.10.2026 ❌ FULL"));
        assert!(message
            .body
            .ends_with("Reply to this email with the number of your preferred date:"));
    }

    #[test]
    fn encode_numbers_menu_commands_in_decode_order() {
        let outcome = TurnOutcome {
            state: RegistrationState::Menu,
            language: Language::En,
            replies: vec![Reply::new(Language::En, ReplyKind::Menu { summary: None })],
        };
        let body = encode("dana@example.com", &outcome).body;
        for (i, action) in MenuAction::LISTED.iter().enumerate() {
            let line = format!("{}. {}", i + 1, menu_label(Language::En, *action));
            assert!(body.contains(&line), "missing {}", line);
            assert_eq!(
                decode(&(i + 1).to_string(), RegistrationState::Menu, today()),
                RegistrationEvent::Menu(*action)
            );
        }
    }

    #[test]
    fn encode_joins_replies_into_one_message() {
        let outcome = TurnOutcome {
            state: RegistrationState::ChoosingType,
            language: Language::Ru,
            replies: vec![
                Reply::new(Language::Ru, ReplyKind::LanguageChanged),
                Reply::new(Language::Ru, ReplyKind::ChooseType),
            ],
        };
        let message = encode("dana@example.com", &outcome);
        assert!(message.body.contains(text(Language::Ru, TextKey::LanguageChanged)));
        assert!(message.body.contains(text(Language::Ru, TextKey::EmailReplyType)));
    }
}
