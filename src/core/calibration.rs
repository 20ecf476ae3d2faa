use std::str::FromStr;

use ordered_float::OrderedFloat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::TextLabel;
use crate::core::primitives::{decimal_to_f64, round_to_i64};
use crate::error::{DecodeError, DecodeResult};

/// Labeled reference point on the value axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationAnchor {
    pub value: f64,
    pub pixel: f64,
}

/// Parses an axis value label such as `"250"`, `"1,500"`, `"2.5k"` or `"-3M"`.
///
/// Recognized scale suffixes are `k`/`K` (thousand), `M` (million) and
/// `B` (billion). Returns `None` for anything that is not a value label.
#[must_use]
pub fn parse_axis_value(text: &str) -> Option<f64> {
    let text = text.trim();
    let (number, multiplier) = match text.char_indices().last()? {
        (idx, 'k' | 'K') => (&text[..idx], 1_000_i64),
        (idx, 'M') => (&text[..idx], 1_000_000),
        (idx, 'B') => (&text[..idx], 1_000_000_000),
        _ => (text, 1),
    };

    let normalized = normalize_number(number)?;
    let value = Decimal::from_str(&normalized).ok()?;
    let scaled = value.checked_mul(Decimal::from(multiplier))?;
    decimal_to_f64(scaled, "axis label").ok()
}

/// Strips thousands separators after checking the literal shape.
fn normalize_number(number: &str) -> Option<String> {
    let unsigned = number.strip_prefix(['-', '+']).unwrap_or(number);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    if integer.is_empty() {
        return None;
    }
    let mut groups = integer.split(',');
    let head = groups.next()?;
    if head.is_empty() || !head.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    for group in groups {
        if group.len() != 3 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }

    let sign = if number.starts_with('-') { "-" } else { "" };
    Some(format!("{sign}{}", unsigned.replace(',', "")))
}

/// Linear pixel to value transform for a vertical value axis.
///
/// `min_pixel` is where the lowest labeled value is drawn and `max_pixel`
/// is where the highest one is drawn. On a top-down surface `max_pixel`
/// is numerically smaller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisCalibration {
    min_value: f64,
    max_value: f64,
    min_pixel: f64,
    max_pixel: f64,
}

impl AxisCalibration {
    /// Builds a calibration from every value label among `labels`.
    ///
    /// Labels that are not numeric are ignored. The y coordinate of each
    /// value label is its pixel anchor.
    pub fn from_labels(labels: &[TextLabel]) -> DecodeResult<Self> {
        let anchors: Vec<CalibrationAnchor> = labels
            .iter()
            .filter_map(|label| {
                parse_axis_value(&label.text).map(|value| CalibrationAnchor {
                    value,
                    pixel: label.y,
                })
            })
            .collect();
        Self::from_anchors(&anchors)
    }

    pub fn from_anchors(anchors: &[CalibrationAnchor]) -> DecodeResult<Self> {
        let mut sorted: Vec<CalibrationAnchor> = anchors
            .iter()
            .copied()
            .filter(|anchor| anchor.value.is_finite() && anchor.pixel.is_finite())
            .collect();
        sorted.sort_by_key(|anchor| OrderedFloat(anchor.value));

        let mut distinct: Vec<f64> = sorted.iter().map(|anchor| anchor.value).collect();
        distinct.dedup();
        if distinct.len() < 2 {
            return Err(DecodeError::InsufficientCalibrationPoints {
                found: distinct.len(),
            });
        }

        let (Some(low), Some(high)) = (sorted.first(), sorted.last()) else {
            return Err(DecodeError::InsufficientCalibrationPoints { found: 0 });
        };
        if low.pixel == high.pixel {
            return Err(DecodeError::DegenerateCalibration { pixel: low.pixel });
        }

        debug!(
            anchors = sorted.len(),
            min_value = low.value,
            max_value = high.value,
            min_pixel = low.pixel,
            max_pixel = high.pixel,
            "axis calibrated"
        );

        Ok(Self {
            min_value: low.value,
            max_value: high.value,
            min_pixel: low.pixel,
            max_pixel: high.pixel,
        })
    }

    #[must_use]
    pub fn min_value(self) -> f64 {
        self.min_value
    }

    #[must_use]
    pub fn max_value(self) -> f64 {
        self.max_value
    }

    #[must_use]
    pub fn min_pixel(self) -> f64 {
        self.min_pixel
    }

    #[must_use]
    pub fn max_pixel(self) -> f64 {
        self.max_pixel
    }

    /// Unrounded value at `pixel`.
    #[must_use]
    pub fn value_at(self, pixel: f64) -> f64 {
        let ratio = (pixel - self.min_pixel) / (self.max_pixel - self.min_pixel);
        self.min_value + ratio * (self.max_value - self.min_value)
    }

    /// Value at `pixel`, rounded to the nearest integer.
    #[must_use]
    pub fn pixel_to_value(self, pixel: f64) -> i64 {
        round_to_i64(self.value_at(pixel))
    }
}
