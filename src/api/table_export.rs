use std::io::Write;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, DecodeResult};

use super::DecodedResult;

pub const DATE_COLUMN_HEADER: &str = "Date";

/// Row-oriented view of a result: one row per date, one column per series.
///
/// Cells are `None` where a series has no sample for the row's date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedTable {
    pub header: Vec<String>,
    pub rows: Vec<DecodedRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedRow {
    pub date: String,
    pub values: Vec<Option<i64>>,
}

impl DecodedRow {
    fn cells(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(self.date.clone()).chain(
            self.values
                .iter()
                .map(|value| value.map_or_else(String::new, |value| value.to_string())),
        )
    }
}

impl DecodedResult {
    #[must_use]
    pub fn to_table(&self) -> DecodedTable {
        let header = std::iter::once(DATE_COLUMN_HEADER.to_owned())
            .chain(self.series.iter().map(|series| series.name.clone()))
            .collect();

        let lookups: Vec<IndexMap<&str, i64>> = self
            .series
            .iter()
            .map(|series| {
                series
                    .data
                    .iter()
                    .map(|point| (point.date.as_str(), point.value))
                    .collect()
            })
            .collect();

        let rows = self
            .dates
            .iter()
            .map(|date| DecodedRow {
                date: date.clone(),
                values: lookups
                    .iter()
                    .map(|lookup| lookup.get(date.as_str()).copied())
                    .collect(),
            })
            .collect();

        DecodedTable { header, rows }
    }
}

impl DecodedTable {
    pub fn write_csv<W: Write>(&self, writer: W) -> DecodeResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer
            .write_record(&self.header)
            .map_err(|e| DecodeError::Export(format!("failed to write csv header: {e}")))?;
        for row in &self.rows {
            csv_writer
                .write_record(row.cells())
                .map_err(|e| DecodeError::Export(format!("failed to write csv row: {e}")))?;
        }
        csv_writer
            .flush()
            .map_err(|e| DecodeError::Export(format!("failed to flush csv: {e}")))
    }

    pub fn to_csv(&self) -> DecodeResult<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| DecodeError::Export(format!("csv output is not utf-8: {e}")))
    }
}
