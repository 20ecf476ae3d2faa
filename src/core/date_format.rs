//! Date label shapes: detection, formatting and ordering.

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Textual shape used for every date string emitted by one decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateLabelStyle {
    /// `10/14`, or `10/14/2023` with a year.
    Slash,
    /// `Oct 14`, or `Oct 14 2023` with a year.
    MonthName,
}

impl DateLabelStyle {
    /// Picks the style matching the first visible axis date label.
    ///
    /// Falls back to [`DateLabelStyle::MonthName`] when no label is visible.
    #[must_use]
    pub fn detect(first_label: Option<&str>) -> Self {
        match first_label {
            Some(text) if parse_slash_month_day(text).is_some() => Self::Slash,
            _ => Self::MonthName,
        }
    }

    #[must_use]
    pub fn format(self, date: NaiveDate, include_year: bool) -> String {
        let pattern = match (self, include_year) {
            (Self::Slash, false) => "%-m/%-d",
            (Self::Slash, true) => "%-m/%-d/%Y",
            (Self::MonthName, false) => "%b %-d",
            (Self::MonthName, true) => "%b %-d %Y",
        };
        date.format(pattern).to_string()
    }
}

/// Month and day read from a year-less axis label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    fn checked(month: u32, day: u32) -> Option<Self> {
        ((1..=12).contains(&month) && (1..=31).contains(&day)).then_some(Self { month, day })
    }

    #[must_use]
    pub fn in_year(self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

fn parse_small_uint(text: &str, max_digits: usize) -> Option<u32> {
    if text.is_empty() || text.len() > max_digits || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn month_from_abbreviation(text: &str) -> Option<u32> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|name| *name == text)
        .and_then(|idx| u32::try_from(idx + 1).ok())
}

/// Parses `"M/D"`.
#[must_use]
pub fn parse_slash_month_day(text: &str) -> Option<MonthDay> {
    let (month, day) = text.trim().split_once('/')?;
    MonthDay::checked(parse_small_uint(month, 2)?, parse_small_uint(day, 2)?)
}

/// Parses `"Mon D"`.
#[must_use]
pub fn parse_month_name_day(text: &str) -> Option<MonthDay> {
    let mut parts = text.split_whitespace();
    let month = month_from_abbreviation(parts.next()?)?;
    let day = parse_small_uint(parts.next()?, 2)?;
    if parts.next().is_some() {
        return None;
    }
    MonthDay::checked(month, day)
}

/// Parses either year-less axis label shape.
#[must_use]
pub fn parse_axis_date_label(text: &str) -> Option<MonthDay> {
    parse_month_name_day(text).or_else(|| parse_slash_month_day(text))
}

#[must_use]
pub fn is_axis_date_label(text: &str) -> bool {
    parse_axis_date_label(text).is_some()
}

/// Parses `"M/D/YYYY"`.
#[must_use]
pub fn parse_slash_date_with_year(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('/');
    let month = parse_small_uint(parts.next()?, 2)?;
    let day = parse_small_uint(parts.next()?, 2)?;
    let year = parts.next()?;
    if parts.next().is_some() || year.len() != 4 {
        return None;
    }
    let year = i32::try_from(parse_small_uint(year, 4)?).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_month_name_date_with_year(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split_whitespace();
    let month = month_from_abbreviation(parts.next()?)?;
    let day = parse_small_uint(parts.next()?, 2)?;
    let year = parts.next()?;
    if parts.next().is_some() || year.len() != 4 {
        return None;
    }
    let year = i32::try_from(parse_small_uint(year, 4)?).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

const GENERIC_DATE_PATTERNS: [&str; 6] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %b %Y",
];

fn parse_generic_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    GENERIC_DATE_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDate::parse_from_str(text, pattern).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// One way of reading an emitted date string back into a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSortStrategy {
    MonthNameWithYear,
    SlashWithYear,
    MonthNameWithoutYear,
    SlashWithoutYear,
    /// Last resort over a handful of common layouts. Ordering produced
    /// through it is not guaranteed to agree with the other shapes.
    Generic,
}

/// Strategies in the order they are tried.
pub const DATE_SORT_STRATEGIES: [DateSortStrategy; 5] = [
    DateSortStrategy::MonthNameWithYear,
    DateSortStrategy::SlashWithYear,
    DateSortStrategy::MonthNameWithoutYear,
    DateSortStrategy::SlashWithoutYear,
    DateSortStrategy::Generic,
];

impl DateSortStrategy {
    /// Year-less shapes are placed in `reference_year`.
    #[must_use]
    pub fn parse(self, text: &str, reference_year: i32) -> Option<NaiveDate> {
        match self {
            Self::MonthNameWithYear => parse_month_name_date_with_year(text),
            Self::SlashWithYear => parse_slash_date_with_year(text),
            Self::MonthNameWithoutYear => parse_month_name_day(text)?.in_year(reference_year),
            Self::SlashWithoutYear => parse_slash_month_day(text)?.in_year(reference_year),
            Self::Generic => parse_generic_date(text),
        }
    }

    #[must_use]
    pub fn is_weak(self) -> bool {
        matches!(self, Self::Generic)
    }
}

/// Resolves a date string with the first strategy that accepts it.
#[must_use]
pub fn resolve_sort_date(text: &str, reference_year: i32) -> Option<(NaiveDate, DateSortStrategy)> {
    DATE_SORT_STRATEGIES.iter().find_map(|strategy| {
        strategy
            .parse(text, reference_year)
            .map(|date| (date, *strategy))
    })
}

/// `true` when `start` and `end` fall in different calendar years.
#[must_use]
pub fn spans_multiple_years(start: NaiveDate, end: NaiveDate) -> bool {
    start.year() != end.year()
}
