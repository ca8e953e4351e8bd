//! Date ranges and presets.
//!
//! A `DateRange` is an inclusive `[start, end]` pair of ISO `YYYY-MM-DD`
//! strings. Membership is checked by string comparison, while the day
//! count uses calendar-day arithmetic on parsed dates.
//!
//! # Day Count
//! `days = |end - start| + 1`, in whole calendar days. The count is never
//! less than 1, and unparseable dates count as a single day.

use chrono::{Datelike, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// ISO date format used for task and range dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day (inclusive).
    pub start: String,
    /// Last day (inclusive).
    pub end: String,
}

impl DateRange {
    /// Creates a range from two ISO dates.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// A single-day range.
    pub fn single(date: impl Into<String>) -> Self {
        let date = date.into();
        Self {
            start: date.clone(),
            end: date,
        }
    }

    /// Single-day range for today's UTC date.
    pub fn today() -> Self {
        Self::single(format_date(Utc::now().date_naive()))
    }

    /// Range between two parsed dates.
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(format_date(start), format_date(end))
    }

    /// Whether `date` lies within `[start, end]`.
    #[inline]
    pub fn contains(&self, date: &str) -> bool {
        date >= self.start.as_str() && date <= self.end.as_str()
    }

    /// Number of calendar days in the range (at least 1).
    pub fn days(&self) -> u32 {
        days_in_range(&self.start, &self.end)
    }
}

/// Inclusive calendar-day count between two ISO dates.
///
/// Order-insensitive; returns 1 for equal or unparseable dates.
pub fn days_in_range(start: &str, end: &str) -> u32 {
    match (parse_date(start), parse_date(end)) {
        (Some(s), Some(e)) => {
            let diff = (e - s).num_days().unsigned_abs();
            u32::try_from(diff).unwrap_or(u32::MAX).saturating_add(1)
        }
        _ => 1,
    }
}

/// Parses a `YYYY-MM-DD` string.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Quick range selections relative to a reference day.
///
/// Weeks start on Monday and span seven days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatePreset {
    ThisWeek,
    NextWeek,
    ThisMonth,
    NextMonth,
}

impl DatePreset {
    /// Resolves the preset against `today`.
    ///
    /// Falls back to the single day `today` if calendar arithmetic
    /// leaves chrono's representable range.
    pub fn resolve(self, today: NaiveDate) -> DateRange {
        self.bounds(today)
            .map(|(start, end)| DateRange::from_dates(start, end))
            .unwrap_or_else(|| DateRange::from_dates(today, today))
    }

    fn bounds(self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            DatePreset::ThisWeek | DatePreset::NextWeek => {
                let offset = u64::from(today.weekday().num_days_from_monday());
                let mut monday = today.checked_sub_days(Days::new(offset))?;
                if self == DatePreset::NextWeek {
                    monday = monday.checked_add_days(Days::new(7))?;
                }
                Some((monday, monday.checked_add_days(Days::new(6))?))
            }
            DatePreset::ThisMonth | DatePreset::NextMonth => {
                let mut first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)?;
                if self == DatePreset::NextMonth {
                    first = first.checked_add_months(Months::new(1))?;
                }
                let last = first
                    .checked_add_months(Months::new(1))?
                    .checked_sub_days(Days::new(1))?;
                Some((first, last))
            }
        }
    }
}
