//! Abstract responses produced by the registration flow.
//!
//! A reply names what to say, not how to show it. Channel encoders turn each
//! reply into buttons, email bodies and so on, using [`Reply::text_key`] and
//! [`Reply::params`] for the localized text.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ParticipantNumber;
use crate::domain::localization::{describe_date, format_date, text, weekday_name, TextKey};
use crate::domain::participant::{ActivationCode, Language, Participant, ParticipantType};
use crate::domain::scheduling::DateOffer;

use super::RegistrationState;

/// Scannable credential issued on first registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub number: ParticipantNumber,
    pub code: ActivationCode,
    /// `{prefix}_{number}_{code}`; rendering it as a QR image is up to the channel.
    pub payload: String,
}

impl Credential {
    pub fn new(prefix: &str, number: ParticipantNumber, code: ActivationCode) -> Self {
        let payload = format!("{}_{}_{}", prefix, number, code);
        Self {
            number,
            code,
            payload,
        }
    }
}

/// Identifiers shown with the main menu once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuSummary {
    pub number: ParticipantNumber,
    pub code: ActivationCode,
    pub meeting_date: Option<NaiveDate>,
}

impl From<&Participant> for MenuSummary {
    fn from(p: &Participant) -> Self {
        Self {
            number: p.number,
            code: p.activation_code.clone(),
            meeting_date: p.meeting_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplyKind {
    ChooseLanguage,
    Greeting { participant_type: Option<ParticipantType> },
    ChooseType,
    ChooseDate { offers: Vec<DateOffer> },
    DateFull { date: NaiveDate },
    DateNotOffered,
    MeetingConfirmed { date: NaiveDate },
    Credentials { credential: Credential },
    Menu { summary: Option<MenuSummary> },
    RemindId { number: ParticipantNumber },
    RemindCode { code: ActivationCode },
    RemindDate { date: Option<NaiveDate> },
    HowToActivate,
    Instruction,
    LanguageChanged,
    NotRegistered,
    Unrecognized,
    Help { state: RegistrationState },
    TryAgainLater,
}

/// One localized response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub language: Language,
    #[serde(flatten)]
    pub kind: ReplyKind,
}

impl Reply {
    pub fn new(language: Language, kind: ReplyKind) -> Self {
        Self { language, kind }
    }

    pub fn text_key(&self) -> TextKey {
        match &self.kind {
            ReplyKind::ChooseLanguage => TextKey::ChooseLanguage,
            ReplyKind::Greeting { participant_type } => match participant_type {
                Some(ParticipantType::Individual) => TextKey::GreetingIndividual,
                Some(ParticipantType::Organization) => TextKey::GreetingOrganization,
                _ => TextKey::Greeting,
            },
            ReplyKind::ChooseType => TextKey::ChooseType,
            ReplyKind::ChooseDate { .. } => TextKey::ChooseDate,
            ReplyKind::DateFull { .. } => TextKey::DateFull,
            ReplyKind::DateNotOffered => TextKey::DateNotOffered,
            ReplyKind::MeetingConfirmed { .. } => TextKey::MeetingConfirmed,
            ReplyKind::Credentials { .. } => TextKey::IdAndCode,
            ReplyKind::Menu { .. } => TextKey::MainMenu,
            ReplyKind::RemindId { .. } => TextKey::YourId,
            ReplyKind::RemindCode { .. } => TextKey::YourCode,
            ReplyKind::RemindDate { .. } => TextKey::YourDate,
            ReplyKind::HowToActivate => TextKey::HowToActivate,
            ReplyKind::Instruction => TextKey::Instruction,
            ReplyKind::LanguageChanged => TextKey::LanguageChanged,
            ReplyKind::NotRegistered => TextKey::NotRegistered,
            ReplyKind::Unrecognized => TextKey::Unrecognized,
            ReplyKind::Help { .. } => TextKey::Help,
            ReplyKind::TryAgainLater => TextKey::TryAgainLater,
        }
    }

    /// Substitution parameters for [`Reply::text_key`].
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match &self.kind {
            ReplyKind::MeetingConfirmed { date } => {
                vec![("zoom_date", self.date_label(Some(*date)))]
            }
            ReplyKind::Credentials { credential } => vec![
                ("participant_id", credential.number.to_string()),
                ("activation_code", credential.code.to_string()),
                ("credential", credential.payload.clone()),
            ],
            ReplyKind::Menu {
                summary: Some(summary),
            } => self.summary_params(summary),
            ReplyKind::RemindId { number } => vec![("participant_id", number.to_string())],
            ReplyKind::RemindCode { code } => vec![("activation_code", code.to_string())],
            ReplyKind::RemindDate { date } => vec![("zoom_date", self.date_label(*date))],
            _ => Vec::new(),
        }
    }

    /// Parameters for [`TextKey::MenuSummary`].
    pub fn summary_params(&self, summary: &MenuSummary) -> Vec<(&'static str, String)> {
        vec![
            ("participant_id", summary.number.to_string()),
            ("activation_code", summary.code.to_string()),
            ("zoom_date", self.date_label(summary.meeting_date)),
        ]
    }

    /// Label for an offered date in this reply's language.
    pub fn offer_label(&self, offer: &DateOffer) -> String {
        describe_date(self.language, offer.date, offer.days_ahead)
    }

    fn date_label(&self, date: Option<NaiveDate>) -> String {
        match date {
            Some(d) => format!("{} ({})", format_date(d), weekday_name(self.language, d.weekday())),
            None => text(self.language, TextKey::DateNotSet).to_string(),
        }
    }
}
