use chart_decode::core::date_format::{DateSortStrategy, is_axis_date_label};
use chart_decode::core::temporal::proportional_dates;
use chart_decode::core::{
    DateLabelStyle, DateRange, DateSource, LabelFallback, PlotArea, Point, TemporalInputs,
    TemporalMapper, TextLabel, resolve_sort_date,
};
use chrono::NaiveDate;

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn points_at(xs: &[f64]) -> Vec<Point> {
    xs.iter().map(|x| Point::new(*x, 0.0)).collect()
}

fn inputs<'a>(range: Option<DateRange>, labels: &'a [TextLabel]) -> TemporalInputs<'a> {
    TemporalInputs {
        range,
        labels,
        plot_area: None,
        fallback: LabelFallback::NearestLabel,
        point_prefix: "Point",
    }
}

#[test]
fn three_points_over_two_days_hit_every_day() {
    let range = DateRange::new(ymd(2023, 10, 14), ymd(2023, 10, 16)).expect("range");
    assert_eq!(range.total_days(), 2);
    assert!(!range.spans_multiple_years());

    assert_eq!(
        proportional_dates(range, 3),
        vec![ymd(2023, 10, 14), ymd(2023, 10, 15), ymd(2023, 10, 16)]
    );
}

#[test]
fn single_point_maps_to_range_start() {
    let range = DateRange::new(ymd(2024, 1, 1), ymd(2024, 3, 1)).expect("range");
    assert_eq!(proportional_dates(range, 1), vec![ymd(2024, 1, 1)]);
    assert!(proportional_dates(range, 0).is_empty());
}

#[test]
fn end_before_start_is_rejected() {
    assert!(DateRange::new(ymd(2024, 1, 2), ymd(2024, 1, 1)).is_err());
}

#[test]
fn weekly_points_across_ninety_days_land_on_week_boundaries() {
    let range = DateRange::parse_text("Data from 7/21/2023 to 10/14/2023", true).expect("parse");
    assert_eq!(range.end(), ymd(2023, 10, 13));

    let mapper = TemporalMapper::with_range(range, DateLabelStyle::MonthName);
    let dates = mapper.map_points(&points_at(&[0.0; 13]));
    assert_eq!(
        dates,
        vec![
            "Jul 21", "Jul 28", "Aug 4", "Aug 11", "Aug 18", "Aug 25", "Sep 1", "Sep 8", "Sep 15",
            "Sep 22", "Sep 29", "Oct 6", "Oct 13"
        ]
    );
}

#[test]
fn multi_year_range_keeps_every_date_unique_and_carries_years() {
    let range = DateRange::parse_text("10/14/2023 - 10/16/2025", true).expect("parse");
    assert!(range.spans_multiple_years());
    assert_eq!(range.end(), ymd(2025, 10, 15));

    let mapper = TemporalMapper::with_range(range, DateLabelStyle::Slash);
    let dates = mapper.map_points(&points_at(&[0.0; 366]));

    let unique: std::collections::BTreeSet<&String> = dates.iter().collect();
    assert_eq!(unique.len(), dates.len());
    assert_eq!(dates.first().map(String::as_str), Some("10/14/2023"));
    assert_eq!(dates.last().map(String::as_str), Some("10/15/2025"));
    assert!(dates.iter().all(|date| date.ends_with("/2023")
        || date.ends_with("/2024")
        || date.ends_with("/2025")));
}

#[test]
fn inclusive_range_text_keeps_named_end() {
    let range = DateRange::parse_text("10/14/2023 - 10/16/2023", false).expect("parse");
    assert_eq!(range.end(), ymd(2023, 10, 16));
    assert!(DateRange::parse_text("last 90 days", true).is_none());
}

#[test]
fn authoritative_range_wins_over_labels() {
    let labels = vec![TextLabel::new("10/1", 0.0, 0.0)];
    let range = DateRange::new(ymd(2023, 10, 1), ymd(2023, 10, 2)).expect("range");
    let mapper = TemporalMapper::select(inputs(Some(range), &labels));

    assert_eq!(mapper.source(), DateSource::AuthoritativeRange);
    assert_eq!(mapper.style(), DateLabelStyle::Slash);
    assert_eq!(mapper.map_points(&points_at(&[0.0, 1.0])), vec!["10/1", "10/2"]);
}

#[test]
fn nearest_label_interpolation_clamps_to_label_bounds() {
    let labels = vec![
        TextLabel::new("Oct 10", 200.0, 320.0),
        TextLabel::new("Oct 9", 100.0, 320.0),
        TextLabel::new("Oct 11", 300.0, 320.0),
        TextLabel::new("5k", 0.0, 100.0),
    ];
    let mapper = TemporalMapper::select(inputs(None, &labels));
    assert_eq!(mapper.source(), DateSource::NearestLabel);

    let dates = mapper.map_points(&points_at(&[50.0, 140.0, 160.0, 300.0, 400.0]));
    assert_eq!(dates, vec!["Oct 9", "Oct 9", "Oct 10", "Oct 11", "Oct 11"]);
}

#[test]
fn explicit_plot_area_drives_interpolation() {
    let labels = vec![
        TextLabel::new("Jan 1", 10.0, 0.0),
        TextLabel::new("Jan 2", 20.0, 0.0),
        TextLabel::new("Jan 3", 30.0, 0.0),
    ];
    let mut selection = inputs(None, &labels);
    selection.plot_area = Some(PlotArea::new(0.0, 1000.0));
    let mapper = TemporalMapper::select(selection);

    let dates = mapper.map_points(&points_at(&[0.0, 500.0, 1000.0]));
    assert_eq!(dates, vec!["Jan 1", "Jan 2", "Jan 3"]);
}

#[test]
fn derived_range_spreads_points_across_year_boundary() {
    let labels = vec![
        TextLabel::new("Dec 30", 0.0, 0.0),
        TextLabel::new("Jan 2", 100.0, 0.0),
    ];
    let mut selection = inputs(None, &labels);
    selection.fallback = LabelFallback::DerivedRange {
        reference_year: 2023,
    };
    let mapper = TemporalMapper::select(selection);

    assert_eq!(mapper.source(), DateSource::LabelDerivedRange);
    assert_eq!(
        mapper.map_points(&points_at(&[0.0; 4])),
        vec!["Dec 30 2023", "Dec 31 2023", "Jan 1 2024", "Jan 2 2024"]
    );
}

#[test]
fn no_range_and_no_labels_fall_back_to_sequential_placeholders() {
    let mapper = TemporalMapper::select(inputs(None, &[]));
    assert_eq!(mapper.source(), DateSource::Sequential);
    assert_eq!(
        mapper.map_points(&points_at(&[0.0, 0.0, 0.0])),
        vec!["Point 0", "Point 1", "Point 2"]
    );
}

#[test]
fn date_styles_format_with_and_without_year() {
    let date = ymd(2023, 3, 9);
    assert_eq!(DateLabelStyle::Slash.format(date, false), "3/9");
    assert_eq!(DateLabelStyle::Slash.format(date, true), "3/9/2023");
    assert_eq!(DateLabelStyle::MonthName.format(date, false), "Mar 9");
    assert_eq!(DateLabelStyle::MonthName.format(date, true), "Mar 9 2023");
    assert_eq!(DateLabelStyle::detect(None), DateLabelStyle::MonthName);
}

#[test]
fn sort_strategies_are_tried_in_order() {
    assert_eq!(
        resolve_sort_date("Oct 12 2023", 2000),
        Some((ymd(2023, 10, 12), DateSortStrategy::MonthNameWithYear))
    );
    assert_eq!(
        resolve_sort_date("10/12/2023", 2000),
        Some((ymd(2023, 10, 12), DateSortStrategy::SlashWithYear))
    );
    assert_eq!(
        resolve_sort_date("Feb 29", 2000),
        Some((ymd(2000, 2, 29), DateSortStrategy::MonthNameWithoutYear))
    );
    assert_eq!(
        resolve_sort_date("10/12", 2000),
        Some((ymd(2000, 10, 12), DateSortStrategy::SlashWithoutYear))
    );
    assert_eq!(
        resolve_sort_date("2023-10-12", 2000),
        Some((ymd(2023, 10, 12), DateSortStrategy::Generic))
    );
    assert_eq!(resolve_sort_date("Point 4", 2000), None);
}

#[test]
fn axis_date_label_shapes_are_recognized() {
    assert!(is_axis_date_label("Oct 9"));
    assert!(is_axis_date_label("10/9"));
    assert!(!is_axis_date_label("October 9"));
    assert!(!is_axis_date_label("13/40"));
    assert!(!is_axis_date_label("10k"));
}
