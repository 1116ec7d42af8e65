//! Keys into the localized text catalogs.

use serde::{Deserialize, Serialize};

/// Identifies one localized template.
///
/// Templates may contain `{name}` placeholders filled by
/// [`render`](super::render).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKey {
    ChooseLanguage,
    Greeting,
    GreetingIndividual,
    GreetingOrganization,
    ChooseType,
    ChooseDate,
    DateFull,
    DateNotOffered,
    /// `{zoom_date}`
    MeetingConfirmed,
    /// `{participant_id}`, `{activation_code}`
    IdAndCode,
    /// `{credential}`
    CredentialLine,
    MainMenu,
    /// `{participant_id}`, `{activation_code}`, `{zoom_date}`
    MenuSummary,
    BtnRemindId,
    BtnRemindCode,
    BtnRemindDate,
    BtnReschedule,
    BtnHowToActivate,
    BtnInstruction,
    BtnChangeLanguage,
    BtnBackToMenu,
    BtnIndividual,
    BtnOrganization,
    /// `{participant_id}`
    YourId,
    /// `{activation_code}`
    YourCode,
    /// `{zoom_date}`
    YourDate,
    DateNotSet,
    HowToActivate,
    Instruction,
    NotRegistered,
    LanguageChanged,
    Unrecognized,
    Help,
    TryAgainLater,
    Full,
    EmailSubject,
    EmailReplyLanguage,
    EmailReplyType,
    EmailReplyDate,
    EmailReplyMenu,
}

impl TextKey {
    /// Every key, for catalog completeness checks.
    pub const ALL: [TextKey; 40] = [
        TextKey::ChooseLanguage,
        TextKey::Greeting,
        TextKey::GreetingIndividual,
        TextKey::GreetingOrganization,
        TextKey::ChooseType,
        TextKey::ChooseDate,
        TextKey::DateFull,
        TextKey::DateNotOffered,
        TextKey::MeetingConfirmed,
        TextKey::IdAndCode,
        TextKey::CredentialLine,
        TextKey::MainMenu,
        TextKey::MenuSummary,
        TextKey::BtnRemindId,
        TextKey::BtnRemindCode,
        TextKey::BtnRemindDate,
        TextKey::BtnReschedule,
        TextKey::BtnHowToActivate,
        TextKey::BtnInstruction,
        TextKey::BtnChangeLanguage,
        TextKey::BtnBackToMenu,
        TextKey::BtnIndividual,
        TextKey::BtnOrganization,
        TextKey::YourId,
        TextKey::YourCode,
        TextKey::YourDate,
        TextKey::DateNotSet,
        TextKey::HowToActivate,
        TextKey::Instruction,
        TextKey::NotRegistered,
        TextKey::LanguageChanged,
        TextKey::Unrecognized,
        TextKey::Help,
        TextKey::TryAgainLater,
        TextKey::Full,
        TextKey::EmailSubject,
        TextKey::EmailReplyLanguage,
        TextKey::EmailReplyType,
        TextKey::EmailReplyDate,
        TextKey::EmailReplyMenu,
    ];
}
