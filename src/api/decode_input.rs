use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{LegendLabel, LegendMarker, PlotArea, Point, SeriesPath, TextLabel};
use crate::error::{DecodeError, DecodeResult};

/// Everything read off the rendered chart before decoding starts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DecodeInput {
    /// Every text node on the chart surface.
    #[serde(default)]
    pub labels: Vec<TextLabel>,
    #[serde(default)]
    pub paths: Vec<SeriesPath>,
    #[serde(default)]
    pub legend_markers: Vec<LegendMarker>,
    #[serde(default)]
    pub legend_labels: Vec<LegendLabel>,
    /// Authoritative range text, e.g. `"10/14/2023 - 10/16/2025"`.
    #[serde(default)]
    pub date_range_text: Option<String>,
    /// Offset that moves path coordinates into label coordinate space.
    #[serde(default)]
    pub path_origin: Point,
    #[serde(default)]
    pub plot_area: Option<PlotArea>,
    #[serde(default)]
    pub source_identifier: Option<String>,
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,
}

impl DecodeInput {
    #[must_use]
    pub fn new(labels: Vec<TextLabel>, paths: Vec<SeriesPath>) -> Self {
        Self {
            labels,
            paths,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_legend(mut self, markers: Vec<LegendMarker>, labels: Vec<LegendLabel>) -> Self {
        self.legend_markers = markers;
        self.legend_labels = labels;
        self
    }

    #[must_use]
    pub fn with_date_range_text(mut self, text: impl Into<String>) -> Self {
        self.date_range_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_path_origin(mut self, origin: Point) -> Self {
        self.path_origin = origin;
        self
    }

    #[must_use]
    pub fn with_plot_area(mut self, area: PlotArea) -> Self {
        self.plot_area = Some(area);
        self
    }

    #[must_use]
    pub fn with_source_identifier(mut self, source: impl Into<String>) -> Self {
        self.source_identifier = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_captured_at(mut self, captured_at: DateTime<Utc>) -> Self {
        self.captured_at = Some(captured_at);
        self
    }

    pub fn from_json_str(input: &str) -> DecodeResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| DecodeError::InvalidData(format!("failed to parse decode input: {e}")))
    }
}
