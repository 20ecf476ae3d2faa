use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::DateSource;
use crate::error::{DecodeError, DecodeResult};

use super::DecodeDiagnostic;

pub const DECODED_RESULT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedPoint {
    pub date: String,
    pub value: i64,
}

/// One named series, ordered by the result's date axis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDecoded {
    pub name: String,
    pub color_key: String,
    pub data: Vec<DecodedPoint>,
}

impl SeriesDecoded {
    #[must_use]
    pub fn value_at(&self, date: &str) -> Option<i64> {
        self.data
            .iter()
            .find(|point| point.date == date)
            .map(|point| point.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedMetadata {
    pub timestamp: Option<DateTime<Utc>>,
    pub source_identifier: Option<String>,
    pub date_source: DateSource,
}

/// Terminal output of a decode pass.
///
/// `dates` is the chronologically sorted union of every series' dates.
/// A series without a sample on some date simply has no point for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedResult {
    pub dates: Vec<String>,
    pub series: Vec<SeriesDecoded>,
    pub metadata: DecodedMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedResultJsonContractV1 {
    pub schema_version: u32,
    pub result: DecodedResult,
}

impl DecodedResult {
    pub fn to_json_pretty(&self) -> DecodeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| DecodeError::InvalidData(format!("failed to serialize result: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> DecodeResult<String> {
        let payload = DecodedResultJsonContractV1 {
            schema_version: DECODED_RESULT_JSON_SCHEMA_V1,
            result: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DecodeError::InvalidData(format!("failed to serialize result contract v1: {e}"))
        })
    }

    /// Accepts either a bare result or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> DecodeResult<Self> {
        if let Ok(result) = serde_json::from_str::<DecodedResult>(input) {
            return Ok(result);
        }
        let payload: DecodedResultJsonContractV1 = serde_json::from_str(input)
            .map_err(|e| DecodeError::InvalidData(format!("failed to parse result json: {e}")))?;
        if payload.schema_version != DECODED_RESULT_JSON_SCHEMA_V1 {
            return Err(DecodeError::InvalidData(format!(
                "unsupported result schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.result)
    }

    #[must_use]
    pub fn series_named(&self, name: &str) -> Option<&SeriesDecoded> {
        self.series.iter().find(|series| series.name == name)
    }
}

/// Best-effort result plus every degradation met on the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeReport {
    pub result: DecodedResult,
    pub diagnostics: Vec<DecodeDiagnostic>,
}

impl DecodeReport {
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
