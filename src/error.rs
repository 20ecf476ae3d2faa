use thiserror::Error;

pub type DecodeResult<T> = Result<T, DecodeError>;

/// Failures that abort a decode pass.
///
/// Degradations that still produce a result are reported as
/// [`crate::api::DecodeDiagnostic`] values instead.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("insufficient calibration points: found {found} distinct axis values, need 2")]
    InsufficientCalibrationPoints { found: usize },

    #[error("degenerate calibration: both axis anchors sit on pixel {pixel}")]
    DegenerateCalibration { pixel: f64 },

    #[error("invalid date range: end {end} is before start {start}")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("export failed: {0}")]
    Export(String),
}
