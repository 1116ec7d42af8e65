//! Localized day names and date labels.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::participant::Language;

pub fn weekday_name(language: Language, day: Weekday) -> &'static str {
    let names: [&'static str; 7] = match language {
        Language::Ru => [
            "Понедельник",
            "Вторник",
            "Среда",
            "Четверг",
            "Пятница",
            "Суббота",
            "Воскресенье",
        ],
        Language::En => [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ],
        Language::He => [
            "יום שני",
            "יום שלישי",
            "יום רביעי",
            "יום חמישי",
            "יום שישי",
            "שבת",
            "יום ראשון",
        ],
    };
    names[day.num_days_from_monday() as usize]
}

/// "Today", "Tomorrow" or "Day after tomorrow" for distances 0..=2.
pub fn relative_day_name(language: Language, days_ahead: i64) -> Option<&'static str> {
    let names: [&'static str; 3] = match language {
        Language::Ru => ["Сегодня", "Завтра", "Послезавтра"],
        Language::En => ["Today", "Tomorrow", "Day after tomorrow"],
        Language::He => ["היום", "מחר", "מחרתיים"],
    };
    usize::try_from(days_ahead)
        .ok()
        .and_then(|index| names.get(index).copied())
}

/// `dd.mm.yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// `Tomorrow (Friday) - 16.10.2026`, or `Monday - 19.10.2026` when the date is
/// further out.
pub fn describe_date(language: Language, date: NaiveDate, days_ahead: i64) -> String {
    let weekday = weekday_name(language, date.weekday());
    match relative_day_name(language, days_ahead) {
        Some(relative) => format!("{} ({}) - {}", relative, weekday, format_date(date)),
        None => format!("{} - {}", weekday, format_date(date)),
    }
}
