pub mod calibration;
pub mod date_format;
pub mod date_range;
pub mod legend;
pub mod path;
pub mod primitives;
pub mod temporal;
pub mod types;

pub use calibration::{AxisCalibration, CalibrationAnchor, parse_axis_value};
pub use date_format::{DateLabelStyle, DateSortStrategy, resolve_sort_date};
pub use date_range::DateRange;
pub use legend::{LegendEntry, LegendMatcher, LegendReading, NameMatch, SeriesNaming};
pub use path::{PathCommand, PathDecoding, SegmentIssue, SegmentIssueKind, decode_path};
pub use temporal::{DateSource, LabelFallback, TemporalInputs, TemporalMapper, TemporalStrategy};
pub use types::{LegendLabel, LegendMarker, PlotArea, Point, SeriesPath, TextLabel};
