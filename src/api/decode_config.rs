use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::LabelFallback;
use crate::core::legend::{DEFAULT_LEGEND_ROW_TOLERANCE_PX, DEFAULT_PLACEHOLDER_SERIES_PREFIX};
use crate::error::{DecodeError, DecodeResult};

pub const DEFAULT_PLACEHOLDER_POINT_PREFIX: &str = "Point";
pub const DEFAULT_SORT_REFERENCE_YEAR: i32 = 2000;

/// Tuning for one decode pass.
///
/// The defaults match the layout the decoder was calibrated against.
/// This type is serializable so hosts can keep per-site overrides in a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeConfig {
    #[serde(default = "default_legend_row_tolerance_px")]
    pub legend_row_tolerance_px: f64,
    #[serde(default = "default_range_end_exclusive")]
    pub range_end_exclusive: bool,
    #[serde(default)]
    pub label_fallback: LabelFallback,
    #[serde(default = "default_sort_reference_year")]
    pub sort_reference_year: i32,
    #[serde(default = "default_placeholder_series_prefix")]
    pub placeholder_series_prefix: String,
    #[serde(default = "default_placeholder_point_prefix")]
    pub placeholder_point_prefix: String,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            legend_row_tolerance_px: default_legend_row_tolerance_px(),
            range_end_exclusive: default_range_end_exclusive(),
            label_fallback: LabelFallback::default(),
            sort_reference_year: default_sort_reference_year(),
            placeholder_series_prefix: default_placeholder_series_prefix(),
            placeholder_point_prefix: default_placeholder_point_prefix(),
        }
    }
}

impl DecodeConfig {
    /// Sets the vertical distance below which legend items share a row.
    #[must_use]
    pub fn with_legend_row_tolerance_px(mut self, tolerance_px: f64) -> Self {
        self.legend_row_tolerance_px = tolerance_px;
        self
    }

    /// Sets whether the end of an authoritative range text is exclusive.
    #[must_use]
    pub fn with_range_end_exclusive(mut self, exclusive: bool) -> Self {
        self.range_end_exclusive = exclusive;
        self
    }

    #[must_use]
    pub fn with_label_fallback(mut self, fallback: LabelFallback) -> Self {
        self.label_fallback = fallback;
        self
    }

    #[must_use]
    pub fn with_sort_reference_year(mut self, year: i32) -> Self {
        self.sort_reference_year = year;
        self
    }

    #[must_use]
    pub fn with_placeholder_series_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.placeholder_series_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_placeholder_point_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.placeholder_point_prefix = prefix.into();
        self
    }

    pub fn validate(&self) -> DecodeResult<()> {
        if !self.legend_row_tolerance_px.is_finite() || self.legend_row_tolerance_px < 0.0 {
            return Err(DecodeError::InvalidData(
                "legend row tolerance must be finite and >= 0".to_owned(),
            ));
        }
        if NaiveDate::from_ymd_opt(self.sort_reference_year, 1, 1).is_none() {
            return Err(DecodeError::InvalidData(format!(
                "sort reference year {} is out of range",
                self.sort_reference_year
            )));
        }
        if let LabelFallback::DerivedRange { reference_year } = self.label_fallback {
            if NaiveDate::from_ymd_opt(reference_year, 1, 1).is_none() {
                return Err(DecodeError::InvalidData(format!(
                    "label reference year {reference_year} is out of range"
                )));
            }
        }
        if self.placeholder_series_prefix.trim().is_empty()
            || self.placeholder_point_prefix.trim().is_empty()
        {
            return Err(DecodeError::InvalidData(
                "placeholder prefixes must not be blank".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> DecodeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DecodeError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> DecodeResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| DecodeError::InvalidData(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_legend_row_tolerance_px() -> f64 {
    DEFAULT_LEGEND_ROW_TOLERANCE_PX
}

fn default_range_end_exclusive() -> bool {
    true
}

fn default_sort_reference_year() -> i32 {
    DEFAULT_SORT_REFERENCE_YEAR
}

fn default_placeholder_series_prefix() -> String {
    DEFAULT_PLACEHOLDER_SERIES_PREFIX.to_owned()
}

fn default_placeholder_point_prefix() -> String {
    DEFAULT_PLACEHOLDER_POINT_PREFIX.to_owned()
}
