//! Date parsing and French month names.
//!
//! Event payloads carry either ISO `YYYY-MM-DD` strings or localized French
//! dates such as `mardi 10 septembre 2013`. Axis and tooltip formatting reuse
//! the month tables so labels match the source site's locale.

use chrono::NaiveDate;

pub const FRENCH_MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

pub const FRENCH_MONTHS_SHORT: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];

/// Full French month name for a 1-based month number.
///
/// # Panics
/// Panics when `month` is outside `1..=12`.
#[must_use]
pub fn month_name(month: u32) -> &'static str {
    FRENCH_MONTHS[(month - 1) as usize]
}

/// Abbreviated French month name for a 1-based month number.
///
/// # Panics
/// Panics when `month` is outside `1..=12`.
#[must_use]
pub fn month_abbrev(month: u32) -> &'static str {
    FRENCH_MONTHS_SHORT[(month - 1) as usize]
}

/// Parses an event date string, accepting ISO dates first and falling back to
/// localized French dates. Returns `None` when neither form matches.
#[must_use]
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    parse_french_date(raw)
}

/// Parses dates of the form `[weekday] D month YYYY` with French month names.
///
/// The day token `1er` is accepted for the first of the month. Matching is
/// case-insensitive and ignores unrecognized leading tokens such as weekdays.
#[must_use]
pub fn parse_french_date(raw: &str) -> Option<NaiveDate> {
    let mut day: Option<u32> = None;
    let mut month: Option<u32> = None;
    let mut year: Option<i32> = None;

    for token in raw.split_whitespace() {
        let token = token.trim_matches(|c: char| c == ',');
        if year.is_none() && token.len() == 4 {
            if let Ok(value) = token.parse::<i32>() {
                year = Some(value);
                continue;
            }
        }
        if day.is_none() {
            let digits = token.trim_end_matches("er");
            if let Ok(value) = digits.parse::<u32>() {
                if (1..=31).contains(&value) {
                    day = Some(value);
                    continue;
                }
            }
        }
        if month.is_none() {
            let lowered = token.to_lowercase();
            if let Some(index) = FRENCH_MONTHS.iter().position(|name| **name == lowered) {
                month = Some(index as u32 + 1);
            }
        }
    }

    NaiveDate::from_ymd_opt(year?, month?, day?)
}
