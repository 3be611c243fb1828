//! Formatting contract (spec component C4, §4.4.2): turns an exact
//! decimal value plus a compiled `NumberPattern`/`NumberSymbols` pair into
//! the final localized string.

use rust_decimal::Decimal;

use crate::error::NumberFormatError;
use crate::pattern::{NumberPattern, Scale};
use crate::rounding::{round_to_fraction_digits, round_to_significant_digits};
use crate::symbols::NumberSymbols;

/// A value to be rendered, widened beyond `Decimal` to also carry the two
/// IEEE special cases CLDR patterns have dedicated symbols for.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Finite(Decimal),
    NaN,
    Infinity { negative: bool },
}

impl From<Decimal> for Number {
    fn from(value: Decimal) -> Self {
        Number::Finite(value)
    }
}

#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// When false, skip rounding entirely and render the value's own scale
    /// (still honoring `min_fraction_digits` padding).
    pub decimal_quantization: bool,
    pub use_grouping: bool,
    /// Overrides the pattern's fraction digit bounds, e.g. a currency's
    /// CLDR-declared minor unit digit count (cash rounding).
    pub fraction_digits_override: Option<(u32, u32)>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            decimal_quantization: true,
            use_grouping: true,
            fraction_digits_override: None,
        }
    }
}

fn apply_scale(value: Decimal, scale: Scale) -> Decimal {
    match scale {
        Scale::None => value,
        Scale::Percent => value * Decimal::from(100),
        Scale::Permille => value * Decimal::from(1000),
    }
}

fn translate_digit(symbols: &NumberSymbols, ch: char) -> char {
    match ch.to_digit(10) {
        Some(d) => symbols.digit(d),
        None => ch,
    }
}

fn render_grouped_integer(digits: &str, primary: usize, secondary: usize, symbols: &NumberSymbols) -> String {
    if primary == 0 || digits.len() <= primary {
        return digits.chars().map(|c| translate_digit(symbols, c)).collect();
    }
    let bytes: Vec<char> = digits.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut end = bytes.len();
    let mut start = end - primary;
    groups.push(bytes[start..end].iter().collect());
    end = start;
    let secondary = if secondary == 0 { primary } else { secondary };
    while end > secondary {
        start = end - secondary;
        groups.push(bytes[start..end].iter().collect());
        end = start;
    }
    if end > 0 {
        groups.push(bytes[..end].iter().collect());
    }
    groups.reverse();
    groups
        .join(&symbols.group)
        .chars()
        .map(|c| if c.is_ascii_digit() { translate_digit(symbols, c) } else { c })
        .collect()
}

fn render_body(
    magnitude: Decimal,
    pattern: &NumberPattern,
    symbols: &NumberSymbols,
    options: &FormatOptions,
) -> String {
    let (min_frac, max_frac) = options
        .fraction_digits_override
        .unwrap_or((pattern.min_fraction_digits as u32, pattern.max_fraction_digits as u32));

    let (mantissa, exponent) = match pattern.exponent {
        Some(spec) => normalize_scientific(magnitude, spec.mantissa_width),
        None => (magnitude, 0),
    };

    let rounded = if !options.decimal_quantization {
        mantissa
    } else if let Some(sig) = pattern.max_significant_digits {
        round_to_significant_digits(mantissa, sig)
    } else {
        round_to_fraction_digits(mantissa, max_frac)
    };

    let plain = rounded.abs().normalize().to_string();

    let (mut int_part, mut frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (plain.clone(), String::new()),
    };

    while int_part.len() < pattern.min_integer_digits {
        int_part.insert(0, '0');
    }
    if int_part.is_empty() {
        int_part.push('0');
    }
    while (frac_part.len() as u32) < min_frac {
        frac_part.push('0');
    }
    if frac_part.len() as u32 > max_frac {
        frac_part.truncate(max_frac as usize);
    }

    let integer_rendered = if options.use_grouping && pattern.uses_grouping() {
        render_grouped_integer(&int_part, pattern.grouping_primary, pattern.grouping_secondary, symbols)
    } else {
        int_part.chars().map(|c| translate_digit(symbols, c)).collect()
    };

    let rendered = if frac_part.is_empty() {
        integer_rendered
    } else {
        let frac_rendered: String = frac_part.chars().map(|c| translate_digit(symbols, c)).collect();
        format!("{integer_rendered}{}{frac_rendered}", symbols.decimal)
    };

    match pattern.exponent {
        Some(spec) => format!("{rendered}{}", render_exponent(exponent, &spec, symbols)),
        None => rendered,
    }
}

fn substitute_literal_symbols(affix: &str, symbols: &NumberSymbols) -> String {
    affix
        .replace('%', &symbols.percent_sign)
        .replace('\u{2030}', &symbols.permille_sign)
        .replace('-', &symbols.minus_sign)
        .replace('+', &symbols.plus_sign)
}

/// Scales `value` into (mantissa, exponent) with `mantissa`'s integer part
/// holding between 1 and `mantissa_width` digits (spec §4.4.2 step 2,
/// "scientific normalization"); `mantissa_width` > 1 quantizes the exponent
/// to its multiples, matching CLDR engineering-notation patterns like
/// `##0E0`.
fn normalize_scientific(value: Decimal, mantissa_width: usize) -> (Decimal, i32) {
    if value.is_zero() {
        return (Decimal::ZERO, 0);
    }
    let ten = Decimal::from(10);
    let width = mantissa_width.max(1) as u32;
    let upper = Decimal::from(10i64.pow(width));
    let lower = Decimal::from(10i64.pow(width - 1));
    let mut mantissa = value;
    let mut exponent: i32 = 0;
    while mantissa.abs() >= upper {
        mantissa /= ten;
        exponent += 1;
    }
    while mantissa.abs() < lower {
        mantissa *= ten;
        exponent -= 1;
    }
    (mantissa, exponent)
}

fn render_exponent(exponent: i32, spec: &crate::pattern::ExponentSpec, symbols: &NumberSymbols) -> String {
    let sign = if exponent < 0 {
        symbols.minus_sign.clone()
    } else if spec.sign_required {
        symbols.plus_sign.clone()
    } else {
        String::new()
    };
    let mut digits = exponent.unsigned_abs().to_string();
    while digits.len() < spec.min_digits {
        digits.insert(0, '0');
    }
    let translated: String = digits.chars().map(|c| translate_digit(symbols, c)).collect();
    format!("{}{}{}", symbols.exponential, sign, translated)
}

/// Formats a plain decimal/percent/permille/scientific value. Currency
/// patterns (containing `¤`) should go through [`format_currency_value`]
/// instead, since the currency symbol is supplied by the caller, not the
/// pattern or symbols table.
pub fn format_number(
    value: &Number,
    pattern: &NumberPattern,
    symbols: &NumberSymbols,
    options: &FormatOptions,
) -> Result<String, NumberFormatError> {
    format_with_currency(value, pattern, symbols, options, None)
}

pub fn format_currency_value(
    value: &Number,
    pattern: &NumberPattern,
    symbols: &NumberSymbols,
    options: &FormatOptions,
    currency_symbol: &str,
) -> Result<String, NumberFormatError> {
    format_with_currency(value, pattern, symbols, options, Some(currency_symbol))
}

fn format_with_currency(
    value: &Number,
    pattern: &NumberPattern,
    symbols: &NumberSymbols,
    options: &FormatOptions,
    currency_symbol: Option<&str>,
) -> Result<String, NumberFormatError> {
    let (is_negative, body) = match value {
        Number::NaN => (false, symbols.nan.clone()),
        Number::Infinity { negative } => (*negative, symbols.infinity.clone()),
        Number::Finite(v) => {
            let scaled = apply_scale(*v, pattern.scale);
            (scaled.is_sign_negative(), render_body(scaled, pattern, symbols, options))
        }
    };

    let affix = if is_negative { &pattern.negative } else { &pattern.positive };
    let mut prefix = substitute_literal_symbols(&affix.prefix, symbols);
    let mut suffix = substitute_literal_symbols(&affix.suffix, symbols);

    if let Some(symbol) = currency_symbol {
        prefix = prefix.replace('\u{A4}', symbol);
        suffix = suffix.replace('\u{A4}', symbol);
    }

    Ok(format!("{prefix}{body}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::parse_pattern;
    use std::str::FromStr;

    fn decimal(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn formats_basic_grouping() {
        let pattern = parse_pattern("#,##0.###").unwrap();
        let symbols = NumberSymbols::default();
        let options = FormatOptions::default();
        let out = format_number(&Number::Finite(decimal("1234567.8")), &pattern, &symbols, &options).unwrap();
        assert_eq!(out, "1,234,567.8");
    }

    #[test]
    fn formats_negative_with_parens_pattern() {
        let pattern = parse_pattern("#,##0.00;(#,##0.00)").unwrap();
        let symbols = NumberSymbols::default();
        let options = FormatOptions::default();
        let out = format_number(&Number::Finite(decimal("-42.5")), &pattern, &symbols, &options).unwrap();
        assert_eq!(out, "(42.50)");
    }

    #[test]
    fn formats_percent_scaling() {
        let pattern = parse_pattern("#,##0%").unwrap();
        let symbols = NumberSymbols::default();
        let options = FormatOptions::default();
        let out = format_number(&Number::Finite(decimal("0.4225")), &pattern, &symbols, &options).unwrap();
        assert_eq!(out, "42%");
    }

    #[test]
    fn formats_nan_and_infinity() {
        let pattern = parse_pattern("#,##0.###").unwrap();
        let symbols = NumberSymbols::default();
        let options = FormatOptions::default();
        assert_eq!(
            format_number(&Number::NaN, &pattern, &symbols, &options).unwrap(),
            "NaN"
        );
        assert_eq!(
            format_number(&Number::Infinity { negative: true }, &pattern, &symbols, &options).unwrap(),
            "-\u{221E}"
        );
    }

    #[test]
    fn formats_currency_with_supplied_symbol() {
        let pattern = parse_pattern("\u{A4}#,##0.00").unwrap();
        let symbols = NumberSymbols::default();
        let options = FormatOptions::default();
        let out = format_currency_value(&Number::Finite(decimal("9.5")), &pattern, &symbols, &options, "$").unwrap();
        assert_eq!(out, "$9.50");
    }

    #[test]
    fn honors_indian_secondary_grouping() {
        let pattern = parse_pattern("#,##,##0").unwrap();
        let symbols = NumberSymbols::default();
        let options = FormatOptions::default();
        let out = format_number(&Number::Finite(decimal("1234567")), &pattern, &symbols, &options).unwrap();
        assert_eq!(out, "12,34,567");
    }

    #[test]
    fn formats_scientific_notation() {
        let pattern = parse_pattern("#E0").unwrap();
        let symbols = NumberSymbols::default();
        let options = FormatOptions::default();
        let out = format_number(&Number::Finite(decimal("12345")), &pattern, &symbols, &options).unwrap();
        assert_eq!(out, "1E4");
        let out = format_number(&Number::Finite(decimal("0.00123")), &pattern, &symbols, &options).unwrap();
        assert_eq!(out, "1E-3");
    }

    #[test]
    fn formats_scientific_with_fraction_digits_and_required_sign() {
        let pattern = parse_pattern("0.00E+00").unwrap();
        let symbols = NumberSymbols::default();
        let options = FormatOptions::default();
        let out = format_number(&Number::Finite(decimal("299792.458")), &pattern, &symbols, &options).unwrap();
        assert_eq!(out, "3.00E+05");
    }

    #[test]
    fn does_not_double_minus_sign_on_negative_infinity() {
        let pattern = parse_pattern("#,##0.###").unwrap();
        let symbols = NumberSymbols::default();
        let options = FormatOptions::default();
        let out = format_number(&Number::Infinity { negative: true }, &pattern, &symbols, &options).unwrap();
        assert_eq!(out.matches(&symbols.minus_sign).count(), 1);
    }
}
