use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::model::dates;

/// Month-aligned horizontal time scale.
///
/// The domain spans whole months: from the month of the earliest axis date to
/// the month of the latest. A single-month domain widens to the following
/// month so pixel mapping stays well defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthScale {
    start: NaiveDate,
    end: NaiveDate,
    range_px: f64,
}

impl MonthScale {
    /// Fits the scale over the given dates, extending the domain to whole
    /// month boundaries.
    pub fn from_dates<I>(dates: I, range_px: f64) -> ChartResult<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        if !range_px.is_finite() || range_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "month scale range must be finite and > 0".to_owned(),
            ));
        }

        let mut min: Option<NaiveDate> = None;
        let mut max: Option<NaiveDate> = None;
        for date in dates {
            min = Some(min.map_or(date, |m| m.min(date)));
            max = Some(max.map_or(date, |m| m.max(date)));
        }
        let (Some(min), Some(max)) = (min, max) else {
            return Err(ChartError::InvalidData(
                "month scale cannot be built from empty data".to_owned(),
            ));
        };

        let start = month_floor(min);
        let mut end = month_floor(max);
        if end == start {
            end = next_month(end);
        }

        Ok(Self {
            start,
            end,
            range_px,
        })
    }

    #[must_use]
    pub fn domain(self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    #[must_use]
    pub fn range_px(self) -> f64 {
        self.range_px
    }

    /// One tick per month start, domain boundaries included.
    #[must_use]
    pub fn ticks(self) -> Vec<NaiveDate> {
        let mut ticks = Vec::new();
        let mut tick = self.start;
        while tick <= self.end {
            ticks.push(tick);
            tick = next_month(tick);
        }
        ticks
    }

    /// Maps a date onto the pixel range, linear in days between the domain
    /// boundaries.
    pub fn date_to_pixel(self, date: NaiveDate) -> ChartResult<f64> {
        let span = days_between(self.start, self.end);
        let offset = days_between(self.start, date);
        Ok(offset / span * self.range_px)
    }
}

/// Axis tick label: abbreviated month, with a 2-digit year suffix when the
/// tick's year differs from the reference year.
#[must_use]
pub fn tick_label(date: NaiveDate, current_year: i32) -> String {
    let month = dates::month_abbrev(date.month());
    if date.year() != current_year {
        format!("{} {:02}", month, date.year().rem_euclid(100))
    } else {
        month.to_owned()
    }
}

/// First day of the date's month.
#[must_use]
pub fn month_floor(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

/// First day of the following month.
#[must_use]
pub fn next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is always valid")
}

fn days_between(from: NaiveDate, to: NaiveDate) -> f64 {
    (to - from).num_days() as f64
}
