use chart_decode::api::{
    DATE_COLUMN_HEADER, DecodedMetadata, DecodedPoint, DecodedResult, SeriesDecoded,
};
use chart_decode::core::DateSource;

fn point(date: &str, value: i64) -> DecodedPoint {
    DecodedPoint {
        date: date.to_owned(),
        value,
    }
}

fn sample_result() -> DecodedResult {
    DecodedResult {
        dates: vec!["Oct 14".to_owned(), "Oct 15".to_owned(), "Oct 16".to_owned()],
        series: vec![
            SeriesDecoded {
                name: "Alpha".to_owned(),
                color_key: "#ff0000".to_owned(),
                data: vec![point("Oct 14", 0), point("Oct 15", 5_000), point("Oct 16", 10_000)],
            },
            SeriesDecoded {
                name: "Beta, adjusted".to_owned(),
                color_key: "#00ff00".to_owned(),
                data: vec![point("Oct 15", -20)],
            },
        ],
        metadata: DecodedMetadata {
            timestamp: None,
            source_identifier: None,
            date_source: DateSource::AuthoritativeRange,
        },
    }
}

#[test]
fn table_has_one_row_per_date_and_gaps_for_missing_samples() {
    let table = sample_result().to_table();

    assert_eq!(table.header, vec![DATE_COLUMN_HEADER, "Alpha", "Beta, adjusted"]);
    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.rows[0].values, vec![Some(0), None]);
    assert_eq!(table.rows[1].values, vec![Some(5_000), Some(-20)]);
    assert_eq!(table.rows[2].date, "Oct 16");
}

#[test]
fn csv_export_quotes_names_and_leaves_gaps_empty() {
    let csv = sample_result().to_table().to_csv().expect("csv");

    assert_eq!(
        csv,
        "Date,Alpha,\"Beta, adjusted\"\nOct 14,0,\nOct 15,5000,-20\nOct 16,10000,\n"
    );
}

#[test]
fn empty_result_exports_header_only() {
    let mut result = sample_result();
    result.dates.clear();
    result.series.clear();

    let csv = result.to_table().to_csv().expect("csv");
    assert_eq!(csv, "Date\n");
}
