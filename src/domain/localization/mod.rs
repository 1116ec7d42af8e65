//! Localization domain module.
//!
//! Static text catalogs for every supported language and `{placeholder}`
//! substitution. Each catalog is an exhaustive match over [`TextKey`], so a
//! new key does not compile until every language has an entry.

mod calendar;
mod en;
mod he;
mod ru;
mod text_key;

pub use calendar::{describe_date, format_date, relative_day_name, weekday_name};
pub use text_key::TextKey;

use crate::domain::participant::Language;

/// Returns the raw template for `key`.
pub fn text(language: Language, key: TextKey) -> &'static str {
    match language {
        Language::Ru => ru::text(key),
        Language::En => en::text(key),
        Language::He => he::text(key),
    }
}

/// Renders `key`, replacing each `{name}` with its value from `params`.
///
/// Placeholders without a matching parameter are left as-is.
pub fn render(language: Language, key: TextKey, params: &[(&str, String)]) -> String {
    let mut rendered = text(language, key).to_string();
    for (name, value) in params {
        rendered = rendered.replace(&format!("{{{}}}", name), value);
    }
    rendered
}
