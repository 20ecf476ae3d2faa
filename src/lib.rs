//! chart-decode: recovers numeric time series from rendered line charts.
//!
//! The crate reads a chart's drawn path descriptions and axis label text and
//! inverts them back into `(date, value)` samples per named series. Locating
//! chart elements and saving files are left to the host; everything here is
//! a pure, synchronous transform of the inputs it is handed.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{DecodeConfig, DecodeInput, DecodeReport, DecodedResult, SeriesAssembler};
pub use error::{DecodeError, DecodeResult};
