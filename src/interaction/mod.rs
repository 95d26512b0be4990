//! Tooltip interaction state.
//!
//! Hover behavior is modeled on an explicit millisecond clock advanced by the
//! host: hovering a dot shows the tooltip immediately and cancels any pending
//! hide; leaving schedules a hide after a fixed delay. There is no wall-clock
//! access here, so the debounce is fully deterministic in tests.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::dates;

/// Tooltip payload for one hovered attendance dot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub attendees: usize,
    pub date: NaiveDate,
    pub city: String,
    /// Display color of the owning city, when the directory has one.
    pub color: Option<String>,
}

impl TooltipContent {
    /// Localized body text: pluralized attendee count, event date, and the
    /// capitalized city name.
    #[must_use]
    pub fn body_text(&self, current_year: i32) -> String {
        format!(
            "{} {} le {} à {}",
            self.attendees,
            pluralize("personne", self.attendees),
            format_event_date(self.date, current_year),
            capitalize(&self.city),
        )
    }
}

/// Formats an event date as day + full month, appending the year only when it
/// differs from the reference year.
#[must_use]
pub fn format_event_date(date: NaiveDate, current_year: i32) -> String {
    let month = dates::month_name(date.month());
    if date.year() != current_year {
        format!("{} {} {}", date.day(), month, date.year())
    } else {
        format!("{} {}", date.day(), month)
    }
}

/// Naive French pluralization: appends `s` for counts of two or more.
#[must_use]
pub fn pluralize(word: &str, count: usize) -> String {
    if count >= 2 {
        format!("{word}s")
    } else {
        word.to_owned()
    }
}

/// Uppercases the first character, leaving the rest untouched.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Debounced tooltip visibility.
///
/// `advance` drives the pending hide deadline; a hover between leave and
/// deadline cancels the hide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipController {
    hide_delay_ms: u64,
    content: Option<TooltipContent>,
    hide_deadline_ms: Option<u64>,
}

impl TooltipController {
    #[must_use]
    pub fn new(hide_delay_ms: u64) -> Self {
        Self {
            hide_delay_ms,
            content: None,
            hide_deadline_ms: None,
        }
    }

    /// Shows the tooltip for a hovered dot and cancels any pending hide.
    pub fn on_dot_over(&mut self, content: TooltipContent, _now_ms: u64) {
        self.hide_deadline_ms = None;
        self.content = Some(content);
    }

    /// Schedules the tooltip to hide after the configured delay. A later
    /// hover cancels the deadline; repeated leaves push it back.
    pub fn on_dot_out(&mut self, now_ms: u64) {
        self.hide_deadline_ms = Some(now_ms.saturating_add(self.hide_delay_ms));
    }

    /// Advances the clock, hiding the tooltip when the deadline has passed.
    /// Returns `true` when visibility changed on this step.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        match self.hide_deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.hide_deadline_ms = None;
                self.content.take().is_some()
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.content.is_some()
    }

    #[must_use]
    pub fn hide_delay_ms(&self) -> u64 {
        self.hide_delay_ms
    }
}
