//! Interactive (button-driven chat) binding.
//!
//! # Callback payloads
//!
//! | payload                    | event                         |
//! |----------------------------|-------------------------------|
//! | `lang_{ru,en,he}`          | `Language`                    |
//! | `type_{individual,...}`    | `ParticipantType`             |
//! | `date_{YYYY-MM-DD}`        | `Date(Literal)`               |
//! | `menu_{action}`            | `Menu(action)`                |

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{InternalKey, ValidationError};
use crate::domain::localization::{text, TextKey};
use crate::domain::participant::{Language, ParticipantType};
use crate::domain::registration::{DateChoice, MenuAction, RegistrationEvent, Reply, ReplyKind};

use super::keywords::{lookup, Keyword};
use super::qr;
use super::{menu_label, offer_caption, reply_text};

pub const CHANNEL: &str = "chat";

/// Raw input from the chat transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InteractiveInput {
    /// Slash command such as `/start`.
    Command(String),
    /// Payload of a pressed button.
    Callback(String),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub label: String,
    pub callback: String,
}

impl Button {
    fn new(label: impl Into<String>, callback: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            callback: callback.into(),
        }
    }
}

/// One outgoing chat message with an optional inline keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractiveMessage {
    pub text: String,
    /// Rows of buttons.
    pub keyboard: Vec<Vec<Button>>,
    /// Payload to render as a scannable code, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
    /// The credential payload rendered as an SVG QR code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_svg: Option<String>,
}

/// `chat:{account_id}`
pub fn internal_key(account_id: &str) -> Result<InternalKey, ValidationError> {
    let account_id = account_id.trim();
    if account_id.is_empty() {
        return Err(ValidationError::empty_field("account_id"));
    }
    InternalKey::scoped(CHANNEL, account_id)
}

pub fn decode(input: &InteractiveInput, today: NaiveDate) -> RegistrationEvent {
    match input {
        InteractiveInput::Command(command) => decode_command(command),
        InteractiveInput::Callback(payload) => decode_callback(payload),
        InteractiveInput::Text(text) => decode_text(text, today),
    }
}

fn decode_command(command: &str) -> RegistrationEvent {
    // `/start@bot_name payload` style suffixes are ignored.
    let name = command
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .split('@')
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match name.as_str() {
        "/start" => RegistrationEvent::Start,
        "/menu" => RegistrationEvent::Menu(MenuAction::Show),
        "/help" => RegistrationEvent::Help,
        _ => RegistrationEvent::Unrecognized(command.to_string()),
    }
}

fn decode_callback(payload: &str) -> RegistrationEvent {
    let unrecognized = || RegistrationEvent::Unrecognized(payload.to_string());
    let Some((prefix, value)) = payload.split_once('_') else {
        return unrecognized();
    };
    match prefix {
        "lang" => value
            .parse::<Language>()
            .map(RegistrationEvent::Language)
            .unwrap_or_else(|_| unrecognized()),
        "type" => value
            .parse::<ParticipantType>()
            .ok()
            .filter(|t| ParticipantType::SELECTABLE.contains(t))
            .map(RegistrationEvent::ParticipantType)
            .unwrap_or_else(unrecognized),
        "date" => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|d| RegistrationEvent::Date(DateChoice::Literal(d)))
            .unwrap_or_else(|_| unrecognized()),
        "menu" => value
            .parse::<MenuAction>()
            .map(RegistrationEvent::Menu)
            .unwrap_or_else(|_| unrecognized()),
        _ => unrecognized(),
    }
}

fn decode_text(input: &str, today: NaiveDate) -> RegistrationEvent {
    if input.trim_start().starts_with('/') {
        return decode_command(input.trim());
    }
    match lookup(input) {
        Some(Keyword::Event(event)) => event,
        Some(Keyword::DaysAhead(n)) => match today.checked_add_days(Days::new(n as u64)) {
            Some(date) => RegistrationEvent::Date(DateChoice::Literal(date)),
            None => RegistrationEvent::Unrecognized(input.to_string()),
        },
        None => RegistrationEvent::Unrecognized(input.to_string()),
    }
}

/// Renders each reply as its own chat message.
pub fn encode(replies: &[Reply]) -> Vec<InteractiveMessage> {
    replies.iter().map(encode_reply).collect()
}

fn encode_reply(reply: &Reply) -> InteractiveMessage {
    let lang = reply.language;
    let mut credential = None;
    let mut credential_svg = None;
    let keyboard = match &reply.kind {
        ReplyKind::ChooseLanguage => Language::ALL
            .iter()
            .map(|l| vec![Button::new(l.display_name(), format!("lang_{}", l.code()))])
            .collect(),
        ReplyKind::ChooseType => vec![ParticipantType::SELECTABLE
            .iter()
            .map(|t| {
                let key = match t {
                    ParticipantType::Organization => TextKey::BtnOrganization,
                    _ => TextKey::BtnIndividual,
                };
                Button::new(text(lang, key), format!("type_{}", t.as_str()))
            })
            .collect()],
        ReplyKind::ChooseDate { offers } => offers
            .iter()
            .map(|offer| {
                vec![Button::new(
                    offer_caption(reply, offer),
                    format!("date_{}", offer.date.format("%Y-%m-%d")),
                )]
            })
            .collect(),
        ReplyKind::Menu { .. } => MenuAction::LISTED
            .iter()
            .map(|action| vec![menu_button(lang, *action)])
            .collect(),
        ReplyKind::Credentials { credential: issued } => {
            credential_svg = match qr::credential_svg(&issued.payload) {
                Ok(image) => Some(image),
                Err(err) => {
                    tracing::warn!(
                        number = issued.number.value(),
                        error = %err,
                        "credential image not rendered"
                    );
                    None
                }
            };
            credential = Some(issued.payload.clone());
            Vec::new()
        }
        ReplyKind::RemindId { .. }
        | ReplyKind::RemindCode { .. }
        | ReplyKind::RemindDate { .. }
        | ReplyKind::HowToActivate
        | ReplyKind::Instruction => vec![vec![menu_button(lang, MenuAction::Show)]],
        _ => Vec::new(),
    };

    InteractiveMessage {
        text: reply_text(reply),
        keyboard,
        credential,
        credential_svg,
    }
}

fn menu_button(lang: Language, action: MenuAction) -> Button {
    Button::new(menu_label(lang, action), format!("menu_{}", action.as_str()))
}
