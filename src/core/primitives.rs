use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{DecodeError, DecodeResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> DecodeResult<f64> {
    value.to_f64().ok_or_else(|| {
        DecodeError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Rounds to the nearest integer with ties toward positive infinity, so
/// `-2.5` becomes `-2`. Saturates at the `i64` bounds.
#[must_use]
pub fn round_to_i64(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    let rounded = (value + 0.5).floor();
    if rounded > (i64::MAX as f64) {
        i64::MAX
    } else if rounded < (i64::MIN as f64) {
        i64::MIN
    } else {
        rounded as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_round_toward_positive_infinity() {
        assert_eq!(round_to_i64(2.5), 3);
        assert_eq!(round_to_i64(-2.5), -2);
        assert_eq!(round_to_i64(-2.6), -3);
        assert_eq!(round_to_i64(10.5), 11);
    }

    #[test]
    fn non_finite_and_huge_values_are_clamped() {
        assert_eq!(round_to_i64(f64::NAN), 0);
        assert_eq!(round_to_i64(1e300), i64::MAX);
        assert_eq!(round_to_i64(-1e300), i64::MIN);
    }
}
