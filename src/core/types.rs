use serde::{Deserialize, Serialize};

/// Device-space coordinate of a drawn path endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn translated(self, origin: Point) -> Self {
        Self {
            x: self.x + origin.x,
            y: self.y + origin.y,
        }
    }
}

/// Text node found on the chart surface, positioned in screen space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

impl TextLabel {
    #[must_use]
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }
}

/// One plotted series: its path description and stroke color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPath {
    pub path_description: String,
    pub color_key: String,
}

impl SeriesPath {
    #[must_use]
    pub fn new(path_description: impl Into<String>, color_key: impl Into<String>) -> Self {
        Self {
            path_description: path_description.into(),
            color_key: color_key.into(),
        }
    }
}

/// Colored swatch drawn inside the legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendMarker {
    pub color_key: String,
    pub x: f64,
    pub y: f64,
}

impl LegendMarker {
    #[must_use]
    pub fn new(color_key: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            color_key: color_key.into(),
            x,
            y,
        }
    }
}

/// Series name text drawn next to a legend swatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendLabel {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

impl LegendLabel {
    #[must_use]
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }
}

/// Horizontal extent of the plotted region in label coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub width: f64,
}

impl PlotArea {
    #[must_use]
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.left.is_finite() && self.width.is_finite() && self.width > 0.0
    }
}
