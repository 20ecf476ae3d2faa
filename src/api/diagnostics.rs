use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::SegmentIssue;

/// Soft failure recorded while a decode still produced a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecodeDiagnostic {
    /// A path command was skipped; the rest of the path decoded.
    UnparseableSegment {
        series_index: usize,
        issue: SegmentIssue,
    },
    /// A path yielded no point at all and was left out.
    SeriesNotDecodable {
        series_index: usize,
        color_key: String,
    },
    /// Neither a range nor axis date labels were usable.
    NoDateRangeAvailable,
    /// Range text was present but matched no known layout.
    UnparsedDateRangeText { text: String },
    /// Swatch and name counts differ in the legend.
    LegendCountMismatch { markers: usize, labels: usize },
    /// No legend entry carries the color of a path.
    UnmatchedSeriesColor {
        series_index: usize,
        color_key: String,
    },
    /// Several legend entries carry the color of a path.
    AmbiguousSeriesColor {
        series_index: usize,
        color_key: String,
    },
    /// A date string was ordered through the generic parser.
    WeakDateOrdering { date: String },
}

/// Error classes diagnostics fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCategory {
    UnparseableSegment,
    NoDateRangeAvailable,
    LegendMismatch,
    DateOrdering,
}

impl DecodeDiagnostic {
    #[must_use]
    pub fn category(&self) -> DiagnosticCategory {
        match self {
            Self::UnparseableSegment { .. } | Self::SeriesNotDecodable { .. } => {
                DiagnosticCategory::UnparseableSegment
            }
            Self::NoDateRangeAvailable | Self::UnparsedDateRangeText { .. } => {
                DiagnosticCategory::NoDateRangeAvailable
            }
            Self::LegendCountMismatch { .. }
            | Self::UnmatchedSeriesColor { .. }
            | Self::AmbiguousSeriesColor { .. } => DiagnosticCategory::LegendMismatch,
            Self::WeakDateOrdering { .. } => DiagnosticCategory::DateOrdering,
        }
    }
}

impl fmt::Display for DecodeDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnparseableSegment {
                series_index,
                issue,
            } => write!(
                f,
                "series {series_index}: skipped command #{} `{}` ({:?})",
                issue.command_index, issue.command, issue.kind
            ),
            Self::SeriesNotDecodable {
                series_index,
                color_key,
            } => write!(f, "series {series_index} ({color_key}) has no decodable point"),
            Self::NoDateRangeAvailable => {
                f.write_str("no date range or axis date labels; using sequential placeholders")
            }
            Self::UnparsedDateRangeText { text } => {
                write!(f, "date range text `{text}` matched no known layout")
            }
            Self::LegendCountMismatch { markers, labels } => {
                write!(f, "legend has {markers} swatches but {labels} names")
            }
            Self::UnmatchedSeriesColor {
                series_index,
                color_key,
            } => write!(f, "series {series_index}: no legend entry for color {color_key}"),
            Self::AmbiguousSeriesColor {
                series_index,
                color_key,
            } => write!(
                f,
                "series {series_index}: several legend entries share color {color_key}"
            ),
            Self::WeakDateOrdering { date } => {
                write!(f, "date `{date}` ordered by generic parsing")
            }
        }
    }
}
