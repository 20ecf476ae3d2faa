use approx::assert_relative_eq;
use chart_decode::DecodeError;
use chart_decode::core::{AxisCalibration, CalibrationAnchor, TextLabel, parse_axis_value};

fn label(text: &str, y: f64) -> TextLabel {
    TextLabel::new(text, 0.0, y)
}

#[test]
fn thousands_suffix_calibration_matches_reference_points() {
    let calibration =
        AxisCalibration::from_labels(&[label("0", 300.0), label("10k", 50.0)]).expect("calibrate");

    assert_eq!(calibration.min_value(), 0.0);
    assert_eq!(calibration.min_pixel(), 300.0);
    assert_eq!(calibration.max_value(), 10_000.0);
    assert_eq!(calibration.max_pixel(), 50.0);
    assert_eq!(calibration.pixel_to_value(175.0), 5_000);
    assert_eq!(calibration.pixel_to_value(300.0), 0);
    assert_eq!(calibration.pixel_to_value(50.0), 10_000);
}

#[test]
fn extreme_labels_anchor_regardless_of_input_order() {
    let calibration = AxisCalibration::from_labels(&[
        label("5k", 175.0),
        label("10k", 50.0),
        label("Oct 14", 320.0),
        label("0", 300.0),
    ])
    .expect("calibrate");

    assert_eq!(calibration.min_pixel(), 300.0);
    assert_eq!(calibration.max_pixel(), 50.0);
    assert_relative_eq!(calibration.value_at(112.5), 7_500.0, epsilon = 1e-9);
}

#[test]
fn fewer_than_two_distinct_values_is_fatal() {
    let single = AxisCalibration::from_labels(&[label("100", 10.0)]);
    assert!(matches!(
        single,
        Err(DecodeError::InsufficientCalibrationPoints { found: 1 })
    ));

    let repeated = AxisCalibration::from_labels(&[label("5", 10.0), label("5", 90.0)]);
    assert!(matches!(
        repeated,
        Err(DecodeError::InsufficientCalibrationPoints { found: 1 })
    ));

    let none = AxisCalibration::from_labels(&[label("Jan 1", 10.0)]);
    assert!(matches!(
        none,
        Err(DecodeError::InsufficientCalibrationPoints { found: 0 })
    ));
}

#[test]
fn anchors_on_one_pixel_are_rejected() {
    let result = AxisCalibration::from_anchors(&[
        CalibrationAnchor {
            value: 0.0,
            pixel: 100.0,
        },
        CalibrationAnchor {
            value: 10.0,
            pixel: 100.0,
        },
    ]);
    assert!(matches!(
        result,
        Err(DecodeError::DegenerateCalibration { .. })
    ));
}

#[test]
fn label_values_accept_suffixes_signs_and_separators() {
    assert_eq!(parse_axis_value("2.5k"), Some(2_500.0));
    assert_eq!(parse_axis_value("1M"), Some(1_000_000.0));
    assert_eq!(parse_axis_value("3B"), Some(3_000_000_000.0));
    assert_eq!(parse_axis_value("-40"), Some(-40.0));
    assert_eq!(parse_axis_value(" 12,500 "), Some(12_500.0));
    assert_eq!(parse_axis_value("10K"), Some(10_000.0));
    assert_eq!(parse_axis_value("abc"), None);
    assert_eq!(parse_axis_value(""), None);
}

#[test]
fn pixel_to_value_is_idempotent() {
    let calibration =
        AxisCalibration::from_labels(&[label("0", 400.0), label("800", 0.0)]).expect("calibrate");
    let first = calibration.pixel_to_value(123.456);
    let second = calibration.pixel_to_value(123.456);
    assert_eq!(first, second);
    assert_eq!(first, 553);
}

#[test]
fn negative_axis_ties_round_toward_positive_infinity() {
    let calibration =
        AxisCalibration::from_labels(&[label("-10", 100.0), label("0", 0.0)]).expect("calibrate");

    assert_relative_eq!(calibration.value_at(25.0), -2.5, epsilon = 1e-9);
    assert_eq!(calibration.pixel_to_value(25.0), -2);
    assert_eq!(calibration.pixel_to_value(100.0), -10);
}
