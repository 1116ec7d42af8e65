//! Declarative free-text vocabulary shared by text-capable channels.
//!
//! Each entry maps a word or phrase, in any supported language, to what it
//! means. Entries are tried in table order and the first match wins, so more
//! specific phrases sit above the words they contain. Relative days sit above
//! everything else, so "register for tomorrow" names a date.
//!
//! Two-letter language tags are not words here: "he" is an English pronoun.
//! They exist only in `lang_` callbacks.

use once_cell::sync::Lazy;

use crate::domain::participant::{Language, ParticipantType};
use crate::domain::registration::{MenuAction, RegistrationEvent};

/// Meaning of a recognized word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keyword {
    Event(RegistrationEvent),
    /// A relative day ("tomorrow"); resolved against today by the decoder.
    DaysAhead(i64),
}

struct Entry {
    phrase: &'static str,
    keyword: Keyword,
}

fn entries(phrases: &[&'static str], keyword: Keyword) -> Vec<Entry> {
    phrases
        .iter()
        .map(|&phrase| Entry {
            phrase,
            keyword: keyword.clone(),
        })
        .collect()
}

fn event(e: RegistrationEvent) -> Keyword {
    Keyword::Event(e)
}

fn menu(action: MenuAction) -> Keyword {
    Keyword::Event(RegistrationEvent::Menu(action))
}

static KEYWORDS: Lazy<Vec<Entry>> = Lazy::new(|| {
    let mut table = Vec::new();
    table.extend(entries(
        &["day after tomorrow", "послезавтра", "מחרתיים"],
        Keyword::DaysAhead(2),
    ));
    table.extend(entries(&["tomorrow", "завтра", "מחר"], Keyword::DaysAhead(1)));
    table.extend(entries(&["today", "сегодня", "היום"], Keyword::DaysAhead(0)));
    table.extend(entries(
        &["start", "register", "старт", "начать", "регистрация", "התחל", "הרשמה"],
        event(RegistrationEvent::Start),
    ));
    table.extend(entries(
        &["help", "помощь", "справка", "עזרה"],
        event(RegistrationEvent::Help),
    ));
    table.extend(entries(
        &["russian", "русский", "рус", "רוסית"],
        event(RegistrationEvent::Language(Language::Ru)),
    ));
    table.extend(entries(
        &["english", "английский", "англ", "אנגלית"],
        event(RegistrationEvent::Language(Language::En)),
    ));
    table.extend(entries(
        &["hebrew", "иврит", "עברית"],
        event(RegistrationEvent::Language(Language::He)),
    ));
    table.extend(entries(
        &["individual", "private", "частное лицо", "лично", "יחיד", "פרטי"],
        event(RegistrationEvent::ParticipantType(ParticipantType::Individual)),
    ));
    table.extend(entries(
        &["organization", "organisation", "организация", "ארגון"],
        event(RegistrationEvent::ParticipantType(ParticipantType::Organization)),
    ));
    table.extend(entries(
        &["change language", "сменить язык", "language", "язык", "שפה"],
        menu(MenuAction::ChangeLanguage),
    ));
    table.extend(entries(
        &["reschedule", "перенести", "перенос", "לשנות", "לדחות"],
        menu(MenuAction::Reschedule),
    ));
    table.extend(entries(
        &["how to activate", "activate", "активация", "активировать", "הפעלה"],
        menu(MenuAction::HowToActivate),
    ));
    table.extend(entries(
        &["instruction", "instructions", "инструкция", "הוראות"],
        menu(MenuAction::Instruction),
    ));
    table.extend(entries(
        &["code", "код", "קוד"],
        menu(MenuAction::RemindCode),
    ));
    table.extend(entries(
        &["id", "номер", "мой номер", "מספר"],
        menu(MenuAction::RemindId),
    ));
    table.extend(entries(
        &["date", "дата", "תאריך"],
        menu(MenuAction::RemindDate),
    ));
    table.extend(entries(
        &["menu", "меню", "תפריט", "back"],
        menu(MenuAction::Show),
    ));
    table
});

/// Lower-cased words of `text`. Letters of every script count as word
/// characters.
pub fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// First table entry found in `text`, by whole word or whole phrase.
pub fn lookup(text: &str) -> Option<Keyword> {
    let words = tokens(text);
    if words.is_empty() {
        return None;
    }
    let joined = format!(" {} ", words.join(" "));

    KEYWORDS
        .iter()
        .find(|entry| {
            if entry.phrase.contains(' ') {
                joined.contains(&format!(" {} ", entry.phrase))
            } else {
                words.iter().any(|w| w == entry.phrase)
            }
        })
        .map(|entry| entry.keyword.clone())
}
