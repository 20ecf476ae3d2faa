//! Legend reading: pairing swatches with names, and paths with entries.
//!
//! Swatches and names are drawn as separate elements that share one grid
//! layout, so both lists are put in row-major order and paired by rank.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{LegendLabel, LegendMarker};

pub const DEFAULT_LEGEND_ROW_TOLERANCE_PX: f64 = 20.0;
pub const DEFAULT_PLACEHOLDER_SERIES_PREFIX: &str = "Series";

/// One legend row item: a name and the color that identifies its series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub name: String,
    pub color_key: String,
    /// Rank under the row-major sort.
    pub ordinal_position: usize,
    /// `true` when no name label was available for this swatch.
    pub placeholder: bool,
}

/// How a path obtained its series name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatch {
    /// Exactly one legend entry shares the path color.
    Color,
    /// Several entries share the path color; the ordinal picked among them.
    AmbiguousColor,
    /// No entry shares the path color.
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesNaming {
    pub name: String,
    pub matched: NameMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LegendReading {
    pub entries: Vec<LegendEntry>,
    pub marker_count: usize,
    pub label_count: usize,
}

impl LegendReading {
    #[must_use]
    pub fn is_count_mismatch(&self) -> bool {
        self.marker_count != self.label_count
    }
}

/// Anything placed on screen by its top-left corner.
pub trait ScreenPositioned {
    fn screen_position(&self) -> (f64, f64);
}

impl ScreenPositioned for LegendMarker {
    fn screen_position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl ScreenPositioned for LegendLabel {
    fn screen_position(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Returns item indices in row-major order.
///
/// Items join the current row while their vertical distance to the row's
/// first item stays below `row_tolerance_px`; rows read top to bottom and
/// each row reads left to right.
#[must_use]
pub fn row_major_order<T: ScreenPositioned>(items: &[T], row_tolerance_px: f64) -> Vec<usize> {
    let mut by_y: Vec<usize> = (0..items.len()).collect();
    by_y.sort_by_key(|&idx| {
        let (x, y) = items[idx].screen_position();
        (OrderedFloat(y), OrderedFloat(x))
    });

    let mut ordered = Vec::with_capacity(items.len());
    let mut row: Vec<usize> = Vec::new();
    let mut row_y = f64::NAN;
    for idx in by_y {
        let (_, y) = items[idx].screen_position();
        if row.is_empty() || (y - row_y).abs() >= row_tolerance_px {
            flush_row(items, &mut row, &mut ordered);
            row_y = y;
        }
        row.push(idx);
    }
    flush_row(items, &mut row, &mut ordered);
    ordered
}

fn flush_row<T: ScreenPositioned>(items: &[T], row: &mut Vec<usize>, ordered: &mut Vec<usize>) {
    row.sort_by_key(|&idx| OrderedFloat(items[idx].screen_position().0));
    ordered.append(row);
}

/// Stateless legend matching with its tuning constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendMatcher<'a> {
    pub row_tolerance_px: f64,
    pub placeholder_prefix: &'a str,
}

impl Default for LegendMatcher<'_> {
    fn default() -> Self {
        Self {
            row_tolerance_px: DEFAULT_LEGEND_ROW_TOLERANCE_PX,
            placeholder_prefix: DEFAULT_PLACEHOLDER_SERIES_PREFIX,
        }
    }
}

impl LegendMatcher<'_> {
    #[must_use]
    pub fn placeholder_name(&self, ordinal: usize) -> String {
        format!("{} {}", self.placeholder_prefix, ordinal + 1)
    }

    /// Pairs swatches with name labels by row-major rank.
    ///
    /// Swatches without a color are dropped, as are blank names. Swatches
    /// left without a name get a placeholder.
    #[must_use]
    pub fn read_legend(&self, markers: &[LegendMarker], labels: &[LegendLabel]) -> LegendReading {
        let markers: Vec<&LegendMarker> = markers
            .iter()
            .filter(|marker| !marker.color_key.trim().is_empty())
            .collect();
        let labels: Vec<&LegendLabel> = labels
            .iter()
            .filter(|label| !label.name.trim().is_empty())
            .collect();

        let marker_order = row_major_order(&markers, self.row_tolerance_px);
        let label_order = row_major_order(&labels, self.row_tolerance_px);

        let entries = marker_order
            .iter()
            .enumerate()
            .map(|(rank, &marker_idx)| {
                let label = label_order.get(rank).map(|&label_idx| labels[label_idx]);
                LegendEntry {
                    name: label.map_or_else(
                        || self.placeholder_name(rank),
                        |label| label.name.trim().to_owned(),
                    ),
                    color_key: markers[marker_idx].color_key.clone(),
                    ordinal_position: rank,
                    placeholder: label.is_none(),
                }
            })
            .collect();

        LegendReading {
            entries,
            marker_count: markers.len(),
            label_count: labels.len(),
        }
    }

    /// Names the path at `path_ordinal` drawn with `color_key`.
    #[must_use]
    pub fn name_series(
        &self,
        entries: &[LegendEntry],
        color_key: &str,
        path_ordinal: usize,
    ) -> SeriesNaming {
        let candidates: Vec<&LegendEntry> = entries
            .iter()
            .filter(|entry| entry.color_key == color_key)
            .collect();

        match candidates.as_slice() {
            [] => SeriesNaming {
                name: self.placeholder_name(path_ordinal),
                matched: NameMatch::Placeholder,
            },
            [only] => SeriesNaming {
                name: only.name.clone(),
                matched: NameMatch::Color,
            },
            [first, ..] => {
                let chosen = candidates
                    .iter()
                    .find(|entry| entry.ordinal_position == path_ordinal)
                    .unwrap_or(first);
                SeriesNaming {
                    name: chosen.name.clone(),
                    matched: NameMatch::AmbiguousColor,
                }
            }
        }
    }
}

impl<T: ScreenPositioned> ScreenPositioned for &T {
    fn screen_position(&self) -> (f64, f64) {
        (**self).screen_position()
    }
}
