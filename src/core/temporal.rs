//! Assignment of calendar dates to decoded points.
//!
//! Exactly one strategy is chosen per decode from the inputs available:
//! an authoritative range, a range derived from axis labels, nearest-label
//! lookup, or sequential placeholders. Sources are tried in
//! [`DATE_SOURCE_ORDER`] and the first one that applies wins.

use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::date_format::{DateLabelStyle, parse_axis_date_label};
use crate::core::primitives::round_to_i64;
use crate::core::{DateRange, PlotArea, Point, TextLabel};

/// What runs when no authoritative range is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LabelFallback {
    /// Each point takes the text of its nearest axis date label.
    NearestLabel,
    /// The first and last axis labels define a range in `reference_year`,
    /// then points are spread proportionally across it.
    DerivedRange { reference_year: i32 },
}

impl Default for LabelFallback {
    fn default() -> Self {
        Self::NearestLabel
    }
}

/// Where the dates of a decode came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateSource {
    AuthoritativeRange,
    LabelDerivedRange,
    NearestLabel,
    Sequential,
}

pub const DATE_SOURCE_ORDER: [DateSource; 4] = [
    DateSource::AuthoritativeRange,
    DateSource::LabelDerivedRange,
    DateSource::NearestLabel,
    DateSource::Sequential,
];

/// Axis date label reduced to what interpolation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisDateLabel {
    pub text: String,
    pub x: f64,
}

/// Everything date selection depends on.
#[derive(Debug, Clone, Copy)]
pub struct TemporalInputs<'a> {
    pub range: Option<DateRange>,
    pub labels: &'a [TextLabel],
    pub plot_area: Option<PlotArea>,
    pub fallback: LabelFallback,
    pub point_prefix: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemporalStrategy {
    RangeProportional {
        range: DateRange,
        style: DateLabelStyle,
    },
    LabelInterpolation {
        labels: Vec<AxisDateLabel>,
        left: f64,
        width: f64,
    },
    Sequential {
        prefix: String,
    },
}

/// Date assignment selected once per decode.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalMapper {
    source: DateSource,
    style: DateLabelStyle,
    strategy: TemporalStrategy,
}

impl TemporalMapper {
    #[must_use]
    pub fn select(inputs: TemporalInputs<'_>) -> Self {
        let mut labels: Vec<AxisDateLabel> = inputs
            .labels
            .iter()
            .filter(|label| parse_axis_date_label(&label.text).is_some())
            .map(|label| AxisDateLabel {
                text: label.text.trim().to_owned(),
                x: label.x,
            })
            .collect();
        labels.sort_by_key(|label| OrderedFloat(label.x));
        let style = DateLabelStyle::detect(labels.first().map(|label| label.text.as_str()));

        let (source, strategy) = DATE_SOURCE_ORDER
            .iter()
            .find_map(|source| {
                try_source(*source, &inputs, &labels, style).map(|strategy| (*source, strategy))
            })
            .unwrap_or_else(|| {
                (
                    DateSource::Sequential,
                    TemporalStrategy::Sequential {
                        prefix: inputs.point_prefix.to_owned(),
                    },
                )
            });
        debug!(?source, ?style, visible_labels = labels.len(), "date source selected");

        Self {
            source,
            style,
            strategy,
        }
    }

    #[must_use]
    pub fn with_range(range: DateRange, style: DateLabelStyle) -> Self {
        Self {
            source: DateSource::AuthoritativeRange,
            style,
            strategy: TemporalStrategy::RangeProportional { range, style },
        }
    }

    #[must_use]
    pub fn source(&self) -> DateSource {
        self.source
    }

    #[must_use]
    pub fn style(&self) -> DateLabelStyle {
        self.style
    }

    #[must_use]
    pub fn strategy(&self) -> &TemporalStrategy {
        &self.strategy
    }

    /// Returns one date string per point, in point order.
    #[must_use]
    pub fn map_points(&self, points: &[Point]) -> Vec<String> {
        match &self.strategy {
            TemporalStrategy::RangeProportional { range, style } => {
                let include_year = range.spans_multiple_years();
                proportional_dates(*range, points.len())
                    .into_iter()
                    .map(|date| style.format(date, include_year))
                    .collect()
            }
            TemporalStrategy::LabelInterpolation {
                labels,
                left,
                width,
            } => points
                .iter()
                .map(|point| {
                    let idx = nearest_label_index(point.x, *left, *width, labels.len());
                    labels[idx].text.clone()
                })
                .collect(),
            TemporalStrategy::Sequential { prefix } => (0..points.len())
                .map(|idx| format!("{prefix} {idx}"))
                .collect(),
        }
    }
}

fn try_source(
    source: DateSource,
    inputs: &TemporalInputs<'_>,
    labels: &[AxisDateLabel],
    style: DateLabelStyle,
) -> Option<TemporalStrategy> {
    match source {
        DateSource::AuthoritativeRange => inputs
            .range
            .map(|range| TemporalStrategy::RangeProportional { range, style }),
        DateSource::LabelDerivedRange => {
            let LabelFallback::DerivedRange { reference_year } = inputs.fallback else {
                return None;
            };
            if labels.len() < 2 {
                return None;
            }
            let first = parse_axis_date_label(&labels.first()?.text)?;
            let last = parse_axis_date_label(&labels.last()?.text)?;
            DateRange::from_axis_labels(first, last, reference_year)
                .map(|range| TemporalStrategy::RangeProportional { range, style })
        }
        DateSource::NearestLabel => {
            let first = labels.first()?;
            let last = labels.last()?;
            let (left, width) = match inputs.plot_area {
                Some(area) if area.is_valid() => (area.left, area.width),
                _ => (first.x, last.x - first.x),
            };
            Some(TemporalStrategy::LabelInterpolation {
                labels: labels.to_vec(),
                left,
                width,
            })
        }
        DateSource::Sequential => Some(TemporalStrategy::Sequential {
            prefix: inputs.point_prefix.to_owned(),
        }),
    }
}

/// Spreads `count` evenly spaced points across `range`.
///
/// The first point lands on the start and the last on the end; a single
/// point lands on the start.
#[must_use]
pub fn proportional_dates(range: DateRange, count: usize) -> Vec<NaiveDate> {
    if count == 1 {
        return vec![range.start()];
    }
    let last = count.saturating_sub(1) as f64;
    let total = range.total_days() as f64;
    (0..count)
        .map(|idx| range.day_at(round_to_i64(idx as f64 / last * total)))
        .collect()
}

/// Index of the label nearest `x`, clamped to `0..len`.
///
/// `len` must be non-zero.
fn nearest_label_index(x: f64, left: f64, width: f64, len: usize) -> usize {
    if len <= 1 || !(width > 0.0) || !x.is_finite() {
        return 0;
    }
    let fraction = (x - left) / width;
    let last = len - 1;
    let idx = round_to_i64(fraction * last as f64);
    usize::try_from(idx.max(0)).map_or(0, |idx| idx.min(last))
}
