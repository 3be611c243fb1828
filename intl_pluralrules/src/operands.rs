//! The numeric operands CLDR plural predicates are evaluated against
//! (spec §4.3), derived from an exact decimal value so that trailing
//! zeros in the fraction (`v`, `w`, `f`, `t`) are preserved rather than
//! lost to binary-float rounding.

use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PluralOperands {
    /// Absolute value of the input.
    pub n: f64,
    /// Integer digits of `n`.
    pub i: u64,
    /// Count of visible fraction digits, *with* trailing zeros.
    pub v: u32,
    /// Count of visible fraction digits, *without* trailing zeros.
    pub w: u32,
    /// Visible fraction digits as an integer, with trailing zeros.
    pub f: u64,
    /// Visible fraction digits as an integer, without trailing zeros.
    pub t: u64,
    /// Compact-decimal exponent; `0` unless the caller is formatting a
    /// compact value (spec calls this `c`, aliased `e`).
    pub c: i32,
}

impl PluralOperands {
    /// Derive operands from an exact decimal value. The decimal's scale
    /// (as constructed, e.g. via `Decimal::from_str("1.50")`) is what
    /// determines `v`/`f`; re-scaling the value before calling this would
    /// change the result, by design (`1.00` and `1.0` must disagree on `v`).
    pub fn from_decimal(value: Decimal, compact_exponent: i32) -> PluralOperands {
        let value = value.abs();
        let text = value.to_string();
        let (int_part, frac_part) = match text.split_once('.') {
            Some((i, f)) => (i, f),
            None => (text.as_str(), ""),
        };

        let i = int_part.parse::<u64>().unwrap_or(0);
        let v = frac_part.len() as u32;
        let f = if frac_part.is_empty() {
            0
        } else {
            frac_part.parse::<u64>().unwrap_or(0)
        };
        let trimmed = frac_part.trim_end_matches('0');
        let w = trimmed.len() as u32;
        let t = if trimmed.is_empty() {
            0
        } else {
            trimmed.parse::<u64>().unwrap_or(0)
        };

        let n = text.parse::<f64>().unwrap_or(0.0);

        PluralOperands {
            n,
            i,
            v,
            w,
            f,
            t,
            c: compact_exponent,
        }
    }

    pub fn from_integer(value: i64) -> PluralOperands {
        PluralOperands::from_decimal(Decimal::from(value), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn integers_have_zeroed_fraction_operands() {
        let ops = PluralOperands::from_integer(5);
        assert_eq!((ops.i, ops.v, ops.w, ops.f, ops.t), (5, 0, 0, 0, 0));
    }

    #[test]
    fn trailing_zeros_distinguish_v() {
        let a = PluralOperands::from_decimal(Decimal::from_str("1.00").unwrap(), 0);
        let b = PluralOperands::from_decimal(Decimal::from_str("1.0").unwrap(), 0);
        assert_eq!(a.v, 2);
        assert_eq!(b.v, 1);
        assert_eq!(a.f, 0);
        assert_eq!(a.t, 0);
    }

    #[test]
    fn f_keeps_zeros_t_drops_them() {
        let ops = PluralOperands::from_decimal(Decimal::from_str("1.50").unwrap(), 0);
        assert_eq!(ops.v, 2);
        assert_eq!(ops.f, 50);
        assert_eq!(ops.w, 1);
        assert_eq!(ops.t, 5);
    }
}
