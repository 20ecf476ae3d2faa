use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::date_format::{MonthDay, parse_slash_date_with_year, spans_multiple_years};
use crate::error::{DecodeError, DecodeResult};

/// Inclusive calendar range covered by the plotted series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
    total_days: i64,
    spans_multiple_years: bool,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> DecodeResult<Self> {
        if end < start {
            return Err(DecodeError::InvalidDateRange { start, end });
        }
        Ok(Self {
            start,
            end,
            total_days: (end - start).num_days(),
            spans_multiple_years: spans_multiple_years(start, end),
        })
    }

    /// Reads a range from free text such as `"10/14/2023 - 10/16/2025"`.
    ///
    /// When `end_exclusive` is set the named end is the first day after
    /// the plotted data, so the range stops one day earlier.
    #[must_use]
    pub fn parse_text(text: &str, end_exclusive: bool) -> Option<Self> {
        let (start, end) = DATE_RANGE_TEXT_SHAPES
            .iter()
            .find_map(|shape| shape.parse(text))?;
        let end = if end_exclusive && end > start {
            end.checked_sub_days(Days::new(1))?
        } else {
            end
        };
        Self::new(start, end).ok()
    }

    /// Builds a range from the first and last year-less axis labels.
    ///
    /// The last label rolls into the following year when it would
    /// otherwise precede the first.
    #[must_use]
    pub fn from_axis_labels(first: MonthDay, last: MonthDay, reference_year: i32) -> Option<Self> {
        let start = first.in_year(reference_year)?;
        let mut end = last.in_year(reference_year)?;
        if end < start {
            end = last.in_year(reference_year.checked_add(1)?)?;
        }
        Self::new(start, end).ok()
    }

    #[must_use]
    pub fn start(self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub fn end(self) -> NaiveDate {
        self.end
    }

    #[must_use]
    pub fn total_days(self) -> i64 {
        self.total_days
    }

    #[must_use]
    pub fn spans_multiple_years(self) -> bool {
        self.spans_multiple_years
    }

    /// Date lying `offset_days` after the start, clamped to the range.
    #[must_use]
    pub fn day_at(self, offset_days: i64) -> NaiveDate {
        let offset = offset_days.clamp(0, self.total_days);
        u64::try_from(offset)
            .ok()
            .and_then(|days| self.start.checked_add_days(Days::new(days)))
            .unwrap_or(self.end)
    }
}

/// Known layouts of an authoritative range string, tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateRangeTextShape {
    /// `"10/14/2023 - 10/16/2025"` as shown by a range selector.
    Selector,
    /// `"Data from 10/14/2023 to 10/16/2025"` as shown by a caption.
    Description,
}

const DATE_RANGE_TEXT_SHAPES: [DateRangeTextShape; 2] =
    [DateRangeTextShape::Selector, DateRangeTextShape::Description];

impl DateRangeTextShape {
    fn parse(self, text: &str) -> Option<(NaiveDate, NaiveDate)> {
        let (left, right) = match self {
            Self::Selector => text.split_once('-')?,
            Self::Description => {
                let (_, rest) = text.split_once("Data from ")?;
                rest.split_once(" to ")?
            }
        };
        let start = left.split_whitespace().last()?;
        let end = right.split_whitespace().next()?;
        let end = end.trim_end_matches(|c: char| !c.is_ascii_digit());
        Some((
            parse_slash_date_with_year(start)?,
            parse_slash_date_with_year(end)?,
        ))
    }
}
