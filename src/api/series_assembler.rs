use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, trace, warn};

use crate::core::primitives::round_to_i64;
use crate::core::{
    AxisCalibration, DateRange, DateSource, LegendMatcher, NameMatch, Point, TemporalInputs,
    TemporalMapper, decode_path, resolve_sort_date,
};
use crate::error::DecodeResult;

use super::{
    DecodeConfig, DecodeDiagnostic, DecodeInput, DecodeReport, DecodedMetadata, DecodedPoint,
    DecodedResult, SeriesDecoded,
};

/// Runs complete decode passes with a fixed configuration.
///
/// Every pass is a pure function of its input: the assembler keeps no
/// state between calls and never reads the clock.
#[derive(Debug, Clone, Default)]
pub struct SeriesAssembler {
    config: DecodeConfig,
}

impl SeriesAssembler {
    pub fn new(config: DecodeConfig) -> DecodeResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Decodes every series in `input`.
    ///
    /// Fails only when the value axis cannot be calibrated. Every other
    /// problem degrades the result and is listed in the report.
    ///
    /// Samples of one series that land on the same date are averaged and
    /// rounded to the nearest integer. This smooths dense paths onto the
    /// date axis; it does not drop a sample's contribution.
    pub fn decode(&self, input: &DecodeInput) -> DecodeResult<DecodeReport> {
        let mut pass = DecodePass::default();

        let calibration = AxisCalibration::from_labels(&input.labels)?;
        let mapper = self.select_dates(input, &mut pass);

        let matcher = LegendMatcher {
            row_tolerance_px: self.config.legend_row_tolerance_px,
            placeholder_prefix: &self.config.placeholder_series_prefix,
        };
        let legend = matcher.read_legend(&input.legend_markers, &input.legend_labels);
        if legend.is_count_mismatch() {
            pass.push(DecodeDiagnostic::LegendCountMismatch {
                markers: legend.marker_count,
                labels: legend.label_count,
            });
        }

        let mut series = Vec::with_capacity(input.paths.len());
        for (series_index, path) in input.paths.iter().enumerate() {
            let decoding = decode_path(&path.path_description);
            for issue in decoding.issues {
                pass.push(DecodeDiagnostic::UnparseableSegment {
                    series_index,
                    issue,
                });
            }
            if decoding.points.is_empty() {
                pass.push(DecodeDiagnostic::SeriesNotDecodable {
                    series_index,
                    color_key: path.color_key.clone(),
                });
                continue;
            }

            let points: Vec<Point> = decoding
                .points
                .iter()
                .map(|point| point.translated(input.path_origin))
                .collect();
            let dates = mapper.map_points(&points);
            let data = merge_same_date_samples(
                dates
                    .into_iter()
                    .zip(points.iter().map(|point| calibration.pixel_to_value(point.y))),
            );

            let naming = matcher.name_series(&legend.entries, &path.color_key, series_index);
            match naming.matched {
                NameMatch::Color => {}
                NameMatch::AmbiguousColor => pass.push(DecodeDiagnostic::AmbiguousSeriesColor {
                    series_index,
                    color_key: path.color_key.clone(),
                }),
                NameMatch::Placeholder => pass.push(DecodeDiagnostic::UnmatchedSeriesColor {
                    series_index,
                    color_key: path.color_key.clone(),
                }),
            }

            debug!(
                series_index,
                name = %naming.name,
                points = points.len(),
                samples = data.len(),
                "series decoded"
            );
            series.push(SeriesDecoded {
                name: naming.name,
                color_key: path.color_key.clone(),
                data,
            });
        }

        let dates = self.sorted_date_axis(&series, &mut pass);
        let positions: IndexMap<&str, usize> = dates
            .iter()
            .enumerate()
            .map(|(idx, date)| (date.as_str(), idx))
            .collect();
        for entry in &mut series {
            entry
                .data
                .sort_by_key(|point| positions.get(point.date.as_str()).copied());
        }

        let result = DecodedResult {
            dates,
            series,
            metadata: DecodedMetadata {
                timestamp: input.captured_at,
                source_identifier: input.source_identifier.clone(),
                date_source: mapper.source(),
            },
        };
        debug!(
            dates = result.dates.len(),
            series = result.series.len(),
            diagnostics = pass.diagnostics.len(),
            "decode pass complete"
        );

        Ok(DecodeReport {
            result,
            diagnostics: pass.diagnostics,
        })
    }

    fn select_dates(&self, input: &DecodeInput, pass: &mut DecodePass) -> TemporalMapper {
        let range = input.date_range_text.as_deref().and_then(|text| {
            let parsed = DateRange::parse_text(text, self.config.range_end_exclusive);
            if parsed.is_none() {
                pass.push(DecodeDiagnostic::UnparsedDateRangeText {
                    text: text.to_owned(),
                });
            }
            parsed
        });

        let mapper = TemporalMapper::select(TemporalInputs {
            range,
            labels: &input.labels,
            plot_area: input.plot_area,
            fallback: self.config.label_fallback,
            point_prefix: &self.config.placeholder_point_prefix,
        });
        if mapper.source() == DateSource::Sequential {
            pass.push(DecodeDiagnostic::NoDateRangeAvailable);
        }
        mapper
    }

    fn sorted_date_axis(&self, series: &[SeriesDecoded], pass: &mut DecodePass) -> Vec<String> {
        let unique: IndexSet<&str> = series
            .iter()
            .flat_map(|entry| entry.data.iter().map(|point| point.date.as_str()))
            .collect();

        let mut keyed: Vec<(DateSortKey, &str)> = Vec::with_capacity(unique.len());
        for (first_seen, &date) in unique.iter().enumerate() {
            let key = match resolve_sort_date(date, self.config.sort_reference_year) {
                Some((parsed, strategy)) => {
                    if strategy.is_weak() {
                        pass.push(DecodeDiagnostic::WeakDateOrdering {
                            date: date.to_owned(),
                        });
                    }
                    DateSortKey::Dated(parsed)
                }
                None => {
                    trace!(date, "date string left in first-seen order");
                    DateSortKey::Unparsed(first_seen)
                }
            };
            keyed.push((key, date));
        }
        keyed.sort_by_key(|(key, _)| *key);
        keyed
            .into_iter()
            .map(|(_, date)| date.to_owned())
            .collect()
    }
}

/// Orders parsed dates chronologically ahead of unparsed strings, which keep
/// their first-seen order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum DateSortKey {
    Dated(NaiveDate),
    Unparsed(usize),
}

#[derive(Debug, Default)]
struct DecodePass {
    diagnostics: Vec<DecodeDiagnostic>,
}

impl DecodePass {
    fn push(&mut self, diagnostic: DecodeDiagnostic) {
        warn!(%diagnostic, "decode degraded");
        self.diagnostics.push(diagnostic);
    }
}

/// Collapses samples sharing a date into their rounded mean, keeping the
/// first-seen order of dates.
fn merge_same_date_samples(samples: impl Iterator<Item = (String, i64)>) -> Vec<DecodedPoint> {
    let mut buckets: IndexMap<String, (f64, u32)> = IndexMap::new();
    for (date, value) in samples {
        let bucket = buckets.entry(date).or_insert((0.0, 0));
        bucket.0 += value as f64;
        bucket.1 += 1;
    }
    buckets
        .into_iter()
        .map(|(date, (sum, count))| DecodedPoint {
            date,
            value: round_to_i64(sum / f64::from(count)),
        })
        .collect()
}

/// Decodes `input` with `config` in a single call.
pub fn decode_chart(input: &DecodeInput, config: &DecodeConfig) -> DecodeResult<DecodeReport> {
    SeriesAssembler::new(config.clone())?.decode(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_averages_and_rounds_repeated_dates() {
        let merged = merge_same_date_samples(
            vec![
                ("Oct 1".to_owned(), 10),
                ("Oct 1".to_owned(), 11),
                ("Oct 2".to_owned(), 7),
            ]
            .into_iter(),
        );
        assert_eq!(
            merged,
            vec![
                DecodedPoint {
                    date: "Oct 1".to_owned(),
                    value: 11
                },
                DecodedPoint {
                    date: "Oct 2".to_owned(),
                    value: 7
                },
            ]
        );
    }

    #[test]
    fn generic_dates_sort_but_are_flagged_weak() {
        let series = vec![SeriesDecoded {
            name: "Alpha".to_owned(),
            color_key: "#a".to_owned(),
            data: vec![
                DecodedPoint {
                    date: "Point 1".to_owned(),
                    value: 1,
                },
                DecodedPoint {
                    date: "2023-10-12".to_owned(),
                    value: 2,
                },
                DecodedPoint {
                    date: "Oct 11 2023".to_owned(),
                    value: 3,
                },
            ],
        }];
        let mut pass = DecodePass::default();

        let dates = SeriesAssembler::default().sorted_date_axis(&series, &mut pass);

        assert_eq!(dates, vec!["Oct 11 2023", "2023-10-12", "Point 1"]);
        assert_eq!(
            pass.diagnostics,
            vec![DecodeDiagnostic::WeakDateOrdering {
                date: "2023-10-12".to_owned()
            }]
        );
    }

    #[test]
    fn unparsed_dates_sort_after_calendar_dates() {
        assert!(
            DateSortKey::Dated(NaiveDate::from_ymd_opt(2030, 1, 1).expect("date"))
                < DateSortKey::Unparsed(0)
        );
    }
}
