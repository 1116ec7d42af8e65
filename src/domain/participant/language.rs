//! Supported conversation languages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Language a participant reads replies in.
///
/// The set is closed; every text catalog carries an entry for each variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    En,
    He,
}

impl Language {
    /// All languages in the order they are offered.
    pub const ALL: [Language; 3] = [Language::Ru, Language::En, Language::He];

    /// Returns the short tag stored in the database (`ru`, `en`, `he`).
    pub fn code(&self) -> &'static str {
        match self {
            Language::Ru => "ru",
            Language::En => "en",
            Language::He => "he",
        }
    }

    /// Label shown on language pickers.
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Ru => "🇷🇺 Русский",
            Language::En => "🇬🇧 English",
            Language::He => "🇮🇱 עברית",
        }
    }

    /// Resolves a 1-based position in [`Language::ALL`].
    pub fn from_ordinal(ordinal: usize) -> Option<Language> {
        ordinal
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ru" => Ok(Language::Ru),
            "en" => Ok(Language::En),
            "he" => Ok(Language::He),
            other => Err(ValidationError::invalid_format(
                "language",
                format!("unknown language tag '{}'", other),
            )),
        }
    }
}
