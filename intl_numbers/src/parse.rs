//! Parsing contract (spec component C4, §4.4.3) — the inverse of
//! [`crate::format`] — recovers an exact `Decimal` from user-entered text
//! in a given numbering system, with an optional strict mode that
//! rejects input using the wrong grouping/decimal separators (or the
//! wrong group-separator *positions*) instead of silently tolerating
//! them.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::NumberParseError;
use crate::pattern::NumberPattern;
use crate::symbols::NumberSymbols;

#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Reject input that doesn't use the locale's own separators (e.g. a
    /// `.` where the locale expects `,` as the decimal sign), that places
    /// group separators somewhere other than the pattern's legal grouping
    /// boundaries, or that doubles a separator.
    pub strict: bool,
}

fn digit_value(symbols: &NumberSymbols, ch: char) -> Option<u32> {
    if let Some(d) = ch.to_digit(10) {
        return Some(d);
    }
    (0..10).find(|&d| symbols.digit(d) == ch)
}

fn translate_ascii_digits(ascii: &str, symbols: &NumberSymbols) -> String {
    ascii
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => symbols.digit(d),
            None => c,
        })
        .collect()
}

/// Groups `integer_digits` (plain ASCII) at `pattern`'s primary/secondary
/// sizes and renders it with `symbols`' own group separator and digits —
/// the "re-grouped form" half of a strict-mode suggestion pair.
fn group_at_pattern_boundaries(integer_digits: &str, pattern: &NumberPattern, symbols: &NumberSymbols) -> String {
    let primary = pattern.grouping_primary;
    if primary == 0 || integer_digits.len() <= primary {
        return translate_ascii_digits(integer_digits, symbols);
    }
    let secondary = if pattern.grouping_secondary == 0 {
        primary
    } else {
        pattern.grouping_secondary
    };
    let chars: Vec<char> = integer_digits.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut end = chars.len();
    let mut start = end - primary;
    groups.push(chars[start..end].iter().collect());
    end = start;
    while end > secondary {
        start = end - secondary;
        groups.push(chars[start..end].iter().collect());
        end = start;
    }
    if end > 0 {
        groups.push(chars[..end].iter().collect());
    }
    groups.reverse();
    translate_ascii_digits(&groups.join(","), symbols).replace(',', &symbols.group)
}

fn build_suggestions(
    sign: &str,
    integer_digits: &str,
    fraction_digits: &str,
    pattern: &NumberPattern,
    symbols: &NumberSymbols,
) -> (Option<String>, Option<String>) {
    let frac_suffix = if fraction_digits.is_empty() {
        String::new()
    } else {
        format!("{}{}", symbols.decimal, translate_ascii_digits(fraction_digits, symbols))
    };

    let regrouped = Some(format!(
        "{sign}{}{frac_suffix}",
        group_at_pattern_boundaries(integer_digits, pattern, symbols)
    ));
    let decimal_only = Some(format!(
        "{sign}{}{frac_suffix}",
        translate_ascii_digits(integer_digits, symbols)
    ));
    (regrouped, decimal_only)
}

/// Checks that every group separator in `integer_digits_with_groups`
/// (the integer-part text, still carrying `symbols.group` separators)
/// falls on a legal boundary for `pattern`'s primary/secondary grouping
/// sizes: the rightmost group has exactly `primary` digits, every group
/// left of that has exactly `secondary` digits, and the leftmost group
/// has between 1 and `secondary` digits.
fn grouping_is_legal(integer_digits_with_groups: &str, group_sep: &str, pattern: &NumberPattern) -> bool {
    if group_sep.is_empty() || !integer_digits_with_groups.contains(group_sep) {
        return pattern.grouping_primary == 0 || !integer_digits_with_groups.contains(group_sep);
    }
    if pattern.grouping_primary == 0 {
        return false;
    }
    let groups: Vec<&str> = integer_digits_with_groups.split(group_sep).collect();
    if groups.iter().any(|g| g.is_empty()) {
        return false;
    }
    let secondary = if pattern.grouping_secondary == 0 {
        pattern.grouping_primary
    } else {
        pattern.grouping_secondary
    };
    let last = groups.len() - 1;
    if groups[last].len() != pattern.grouping_primary {
        return false;
    }
    if last == 0 {
        return true;
    }
    if groups[0].is_empty() || groups[0].len() > secondary {
        return false;
    }
    groups[1..last].iter().all(|g| g.len() == secondary)
}

/// Parses `input` as a number written in `symbols`'s numbering system,
/// validating group-separator placement against `pattern` when
/// `options.strict` is set (spec §4.4.3).
pub fn parse_number(
    input: &str,
    pattern: &NumberPattern,
    symbols: &NumberSymbols,
    options: ParseOptions,
) -> Result<Decimal, NumberParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(NumberParseError::Invalid(input.to_string()));
    }

    let mut negative = false;
    let mut sign_text = "";
    let mut rest = trimmed;
    if let Some(stripped) = rest.strip_prefix(symbols.minus_sign.as_str()) {
        negative = true;
        sign_text = symbols.minus_sign.as_str();
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('-') {
        if options.strict && symbols.minus_sign != "-" {
            return Err(NumberParseError::StrictMismatch {
                input: input.to_string(),
                regrouped: Some(format!("{}{rest}", symbols.minus_sign)),
                decimal_only: Some(format!("{}{rest}", symbols.minus_sign)),
            });
        }
        negative = true;
        sign_text = "-";
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix(symbols.plus_sign.as_str()) {
        sign_text = symbols.plus_sign.as_str();
        rest = stripped;
    }

    if rest == symbols.nan {
        return Err(NumberParseError::Invalid(input.to_string()));
    }
    if rest == symbols.infinity {
        return Err(NumberParseError::Invalid(input.to_string()));
    }

    // Split on the locale decimal symbol before stripping anything, so
    // strict mode can validate the integer part's grouping independent
    // of the fraction part (which never carries group separators).
    let decimal_parts: Vec<&str> = if symbols.decimal.is_empty() {
        vec![rest]
    } else {
        rest.split(symbols.decimal.as_str()).collect()
    };
    if decimal_parts.len() > 2 {
        return Err(NumberParseError::Invalid(input.to_string()));
    }
    let integer_text = decimal_parts[0];
    let fraction_text = decimal_parts.get(1).copied().unwrap_or("");

    if options.strict {
        let doubled = !symbols.group.is_empty()
            && (integer_text.contains(&format!("{}{}", symbols.group, symbols.group))
                || fraction_text.contains(symbols.group.as_str()));
        let legal = !doubled && grouping_is_legal(integer_text, &symbols.group, pattern);
        if !legal {
            let ascii_integer = strip_and_translate(integer_text, symbols, false)?;
            let ascii_fraction = strip_and_translate(fraction_text, symbols, true)?;
            let (regrouped, decimal_only) = build_suggestions(sign_text, &ascii_integer, &ascii_fraction, pattern, symbols);
            return Err(NumberParseError::StrictMismatch {
                input: input.to_string(),
                regrouped,
                decimal_only,
            });
        }
    }

    let mut ascii = String::new();
    if negative {
        ascii.push('-');
    }
    ascii.push_str(&strip_and_translate(integer_text, symbols, false)?);
    let ascii_fraction = strip_and_translate(fraction_text, symbols, true)?;
    if !ascii_fraction.is_empty() {
        ascii.push('.');
        ascii.push_str(&ascii_fraction);
    }

    if ascii.is_empty() || ascii == "-" {
        return Err(NumberParseError::Invalid(input.to_string()));
    }

    Decimal::from_str(&ascii).map_err(|_| NumberParseError::Invalid(input.to_string()))
}

/// Strips group separators (integer part only) and translates numbering-
/// system digits to ASCII `0`-`9`. `is_fraction` disables group-separator
/// stripping since a fraction part never legitimately carries one.
fn strip_and_translate(part: &str, symbols: &NumberSymbols, is_fraction: bool) -> Result<String, NumberParseError> {
    let mut ascii = String::with_capacity(part.len());
    for ch in part.chars() {
        if !is_fraction && !symbols.group.is_empty() && ch.to_string() == symbols.group {
            continue;
        }
        match digit_value(symbols, ch) {
            Some(d) => ascii.push(std::char::from_digit(d, 10).unwrap()),
            None => return Err(NumberParseError::Invalid(part.to_string())),
        }
    }
    Ok(ascii)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::parse_pattern;

    fn decimal(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn parses_grouped_latn_number() {
        let pattern = parse_pattern("#,##0.###").unwrap();
        let symbols = NumberSymbols::default();
        let v = parse_number("1,234,567.89", &pattern, &symbols, ParseOptions::default()).unwrap();
        assert_eq!(v, decimal("1234567.89"));
    }

    #[test]
    fn parses_negative_with_locale_minus() {
        let pattern = parse_pattern("#,##0.###").unwrap();
        let symbols = NumberSymbols::default();
        let v = parse_number("-42", &pattern, &symbols, ParseOptions::default()).unwrap();
        assert_eq!(v, decimal("-42"));
    }

    #[test]
    fn rejects_garbage_in_lenient_mode() {
        let pattern = parse_pattern("#,##0.###").unwrap();
        let symbols = NumberSymbols::default();
        assert!(parse_number("not a number", &pattern, &symbols, ParseOptions::default()).is_err());
    }

    #[test]
    fn strict_mode_rejects_ascii_minus_for_non_ascii_locale_sign() {
        let pattern = parse_pattern("#,##0.###").unwrap();
        let mut symbols = NumberSymbols::default();
        symbols.minus_sign = "\u{2212}".to_string();
        let err = parse_number("-5", &pattern, &symbols, ParseOptions { strict: true }).unwrap_err();
        match err {
            NumberParseError::StrictMismatch { regrouped, decimal_only, .. } => {
                assert_eq!(regrouped.as_deref(), Some("\u{2212}5"));
                assert_eq!(decimal_only.as_deref(), Some("\u{2212}5"));
            }
            other => panic!("expected StrictMismatch, got {other:?}"),
        }
    }

    #[test]
    fn strict_mode_accepts_correctly_grouped_input() {
        let pattern = parse_pattern("#,##0.###").unwrap();
        let symbols = NumberSymbols::default();
        let v = parse_number("1,234,567.89", &pattern, &symbols, ParseOptions { strict: true }).unwrap();
        assert_eq!(v, decimal("1234567.89"));
    }

    #[test]
    fn strict_mode_rejects_illegal_group_position_with_two_suggestions() {
        // "1,09,98" groups as 1 / 09 / 98 -- none of which is a legal
        // 3-digit primary group for "#,##0.###".
        let pattern = parse_pattern("#,##0.###").unwrap();
        let symbols = NumberSymbols::default();
        let err = parse_number("1,09,98", &pattern, &symbols, ParseOptions { strict: true }).unwrap_err();
        match err {
            NumberParseError::StrictMismatch { regrouped, decimal_only, .. } => {
                assert_eq!(regrouped.as_deref(), Some("10,998"));
                assert_eq!(decimal_only.as_deref(), Some("10998"));
            }
            other => panic!("expected StrictMismatch, got {other:?}"),
        }
    }

    #[test]
    fn strict_mode_rejects_doubled_separator() {
        let pattern = parse_pattern("#,##0.###").unwrap();
        let symbols = NumberSymbols::default();
        assert!(parse_number("1,,234", &pattern, &symbols, ParseOptions { strict: true }).is_err());
    }

    #[test]
    fn strict_mode_rejects_grouping_against_ungrouped_pattern() {
        let pattern = parse_pattern("0.###").unwrap();
        let symbols = NumberSymbols::default();
        let err = parse_number("1,234", &pattern, &symbols, ParseOptions { strict: true }).unwrap_err();
        assert!(matches!(err, NumberParseError::StrictMismatch { .. }));
    }

    #[test]
    fn german_grouping_is_legal_in_strict_mode() {
        // "de": group='.', decimal=',' -- same primary/secondary grouping
        // as en, just different separator glyphs. "1.099,98" groups as a
        // single 3-digit primary group, so strict mode accepts it exactly
        // as it would accept "1,099.98" for en.
        let pattern = parse_pattern("#,##0.###").unwrap();
        let mut symbols = NumberSymbols::default();
        symbols.group = ".".to_string();
        symbols.decimal = ",".to_string();
        let v = parse_number("1.099,98", &pattern, &symbols, ParseOptions { strict: true }).unwrap();
        assert_eq!(v, decimal("1099.98"));
    }

    #[test]
    fn german_illegal_grouping_is_rejected_in_strict_mode() {
        // "1.09.98" groups as 1 / 09 / 98 -- the rightmost group has 2
        // digits, not the 3 "#,##0.###" requires, so this is illegal
        // regardless of which glyph the locale uses for grouping.
        let pattern = parse_pattern("#,##0.###").unwrap();
        let mut symbols = NumberSymbols::default();
        symbols.group = ".".to_string();
        symbols.decimal = ",".to_string();
        let err = parse_number("1.09.98", &pattern, &symbols, ParseOptions { strict: true }).unwrap_err();
        match err {
            NumberParseError::StrictMismatch { regrouped, decimal_only, .. } => {
                assert_eq!(regrouped.as_deref(), Some("10.998"));
                assert_eq!(decimal_only.as_deref(), Some("10998"));
            }
            other => panic!("expected StrictMismatch, got {other:?}"),
        }
    }
}
