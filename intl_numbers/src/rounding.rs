//! Round-half-even rounding, both to a fixed fraction scale and to a
//! count of significant digits. `rust_decimal` gives us the former
//! directly; the latter we derive by shifting the decimal point to the
//! requested significant-digit boundary, rounding, and shifting back.

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};

pub fn round_to_fraction_digits(value: Decimal, digits: u32) -> Decimal {
    value.round_dp_with_strategy(digits, RoundingStrategy::MidpointNearestEven)
}

/// Rounds `value` so that it has at most `significant` significant digits,
/// preserving magnitude. Returns the original value for `value == 0` or
/// `significant == 0`.
pub fn round_to_significant_digits(value: Decimal, significant: usize) -> Decimal {
    if value.is_zero() || significant == 0 {
        return value;
    }
    let magnitude = order_of_magnitude(value);
    // The decimal point sits `magnitude + 1` digits in from the left of
    // the most significant digit; we want `significant` digits kept, so
    // round at scale `-(magnitude - significant + 1)`.
    let scale_shift = magnitude - significant as i32 + 1;
    if scale_shift >= 0 {
        let divisor = Decimal::from(10i64).powi(scale_shift as i64);
        let shifted = value / divisor;
        let rounded = shifted.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven);
        rounded * divisor
    } else {
        let dp = (-scale_shift) as u32;
        round_to_fraction_digits(value, dp)
    }
}

/// Base-10 order of magnitude of `|value|`: `0` for `[1, 10)`, `1` for
/// `[10, 100)`, `-1` for `[0.1, 1)`, etc.
fn order_of_magnitude(value: Decimal) -> i32 {
    let mut v = value.abs();
    let ten = Decimal::from(10);
    let mut magnitude = 0i32;
    if v >= ten {
        while v >= ten {
            v /= ten;
            magnitude += 1;
        }
    } else {
        let one = Decimal::from(1);
        while v < one {
            v *= ten;
            magnitude -= 1;
        }
    }
    magnitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn rounds_fraction_half_to_even() {
        let v = Decimal::from_str("2.5").unwrap();
        assert_eq!(round_to_fraction_digits(v, 0), Decimal::from(2));
        let v = Decimal::from_str("3.5").unwrap();
        assert_eq!(round_to_fraction_digits(v, 0), Decimal::from(4));
    }

    #[test]
    fn rounds_to_significant_digits() {
        let v = Decimal::from_str("1234.5").unwrap();
        assert_eq!(
            round_to_significant_digits(v, 2),
            Decimal::from_str("1200").unwrap()
        );
        let v = Decimal::from_str("0.012345").unwrap();
        assert_eq!(
            round_to_significant_digits(v, 3),
            Decimal::from_str("0.0123").unwrap()
        );
    }

    #[test]
    fn zero_is_unaffected() {
        assert_eq!(
            round_to_significant_digits(Decimal::ZERO, 3),
            Decimal::ZERO
        );
    }
}
