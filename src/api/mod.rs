mod decode_config;
mod decode_input;
mod decoded_result;
mod diagnostics;
mod series_assembler;
mod table_export;

pub use decode_config::{
    DEFAULT_PLACEHOLDER_POINT_PREFIX, DEFAULT_SORT_REFERENCE_YEAR, DecodeConfig,
};
pub use decode_input::DecodeInput;
pub use decoded_result::{
    DECODED_RESULT_JSON_SCHEMA_V1, DecodeReport, DecodedMetadata, DecodedPoint, DecodedResult,
    DecodedResultJsonContractV1, SeriesDecoded,
};
pub use diagnostics::{DecodeDiagnostic, DiagnosticCategory};
pub use series_assembler::{SeriesAssembler, decode_chart};
pub use table_export::{DATE_COLUMN_HEADER, DecodedRow, DecodedTable};
