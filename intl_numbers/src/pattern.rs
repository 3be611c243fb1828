//! CLDR number pattern grammar (spec component C4): a hand-written
//! tokenizer rather than a combinator grammar, since the pattern language
//! is a small positional mini-DSL (prefix / digit-body / suffix) rather
//! than a recursive one.
//!
//! ```text
//! pattern      := subpattern (';' subpattern)?
//! subpattern   := prefix number-body suffix
//! number-body  := integer-part ('.' fraction-part)? exponent?
//! integer-part := '#'* grouping? '0'* ('@' '@'* '#'*)?
//! fraction-part:= '0'* '#'*
//! exponent     := 'E' '+'? '0'+
//! ```

use crate::error::PatternSyntaxError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    None,
    Percent,
    Permille,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentSpec {
    pub sign_required: bool,
    pub min_digits: usize,
    /// Count of `0`/`#` digit positions before the decimal point, e.g. 1 for
    /// `#E0` (standard scientific, one mantissa digit) or 3 for `##0E0`
    /// (engineering notation, exponent quantized to multiples of 3).
    pub mantissa_width: usize,
}

#[derive(Debug, Clone, Default)]
pub struct AffixPair {
    pub prefix: String,
    pub suffix: String,
}

#[derive(Debug, Clone)]
pub struct NumberPattern {
    pub positive: AffixPair,
    pub negative: AffixPair,
    pub min_integer_digits: usize,
    pub grouping_primary: usize,
    pub grouping_secondary: usize,
    pub min_fraction_digits: usize,
    pub max_fraction_digits: usize,
    pub min_significant_digits: Option<usize>,
    pub max_significant_digits: Option<usize>,
    pub exponent: Option<ExponentSpec>,
    pub scale: Scale,
    pub has_currency: bool,
}

impl NumberPattern {
    pub fn uses_grouping(&self) -> bool {
        self.grouping_primary > 0
    }
}

struct SubPattern {
    affix: AffixPair,
    body: Vec<char>,
}

fn split_top_level(s: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quote = false;
    let mut start = 0;
    let mut chars = s.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if ch == '\'' {
            in_quote = !in_quote;
        } else if ch == sep && !in_quote {
            parts.push(&s[start..idx]);
            start = idx + ch.len_utf8();
        }
    }
    parts.push(&s[start..]);
    parts
}

fn parse_subpattern(s: &str) -> Result<SubPattern, PatternSyntaxError> {
    #[derive(PartialEq)]
    enum Phase {
        Prefix,
        Body,
        Suffix,
    }
    let mut phase = Phase::Prefix;
    let mut prefix = String::new();
    let mut suffix = String::new();
    let mut body = Vec::new();
    let mut in_quote = false;
    let mut chars = s.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\'' {
            if chars.peek() == Some(&'\'') {
                chars.next();
                match phase {
                    Phase::Prefix => prefix.push('\''),
                    _ => suffix.push('\''),
                }
                continue;
            }
            in_quote = !in_quote;
            continue;
        }
        if !in_quote && matches!(ch, '#' | '0' | '@' | ',' | '.' | 'E') {
            phase = Phase::Body;
            body.push(ch);
            continue;
        }
        if phase == Phase::Body {
            phase = Phase::Suffix;
        }
        match phase {
            Phase::Prefix => prefix.push(ch),
            Phase::Suffix => suffix.push(ch),
            Phase::Body => unreachable!("body chars are consumed above"),
        }
    }

    Ok(SubPattern {
        affix: AffixPair { prefix, suffix },
        body,
    })
}

fn count(chars: &[char], target: char) -> usize {
    chars.iter().filter(|&&c| c == target).count()
}

/// Parses the shared digit/grouping/significant-digit/exponent spec out of
/// a subpattern body. Only the positive subpattern's body is consulted;
/// CLDR patterns share one digit spec across both subpatterns in practice.
fn parse_body(body: &[char], raw: &str) -> Result<NumberBodySpec, PatternSyntaxError> {
    if body.is_empty() {
        return Err(PatternSyntaxError::NoDigits(raw.to_string()));
    }

    let e_index = body.iter().position(|&c| c == 'E');
    let (int_frac, exponent) = match e_index {
        Some(idx) => (&body[..idx], Some(&body[idx + 1..])),
        None => (&body[..], None),
    };

    let dot_positions: Vec<usize> = int_frac
        .iter()
        .enumerate()
        .filter(|(_, &c)| c == '.')
        .map(|(i, _)| i)
        .collect();
    if dot_positions.len() > 1 {
        return Err(PatternSyntaxError::MultipleDecimalPoints(raw.to_string()));
    }
    let (integer_part, fraction_part): (&[char], &[char]) = match dot_positions.first() {
        Some(&dot) => (&int_frac[..dot], &int_frac[dot + 1..]),
        None => (int_frac, &[]),
    };

    if count(integer_part, '0') == 0
        && count(integer_part, '#') == 0
        && count(integer_part, '@') == 0
    {
        return Err(PatternSyntaxError::NoDigits(raw.to_string()));
    }

    let commas: Vec<usize> = integer_part
        .iter()
        .enumerate()
        .filter(|(_, &c)| c == ',')
        .map(|(i, _)| i)
        .collect();
    let digits_between = |from: usize, to: usize| -> usize {
        integer_part[from..to]
            .iter()
            .filter(|&&c| c == '0' || c == '#')
            .count()
    };
    let (grouping_primary, grouping_secondary) = match commas.len() {
        0 => (0, 0),
        1 => {
            let primary = digits_between(commas[0] + 1, integer_part.len());
            (primary, primary)
        }
        _ => {
            let last = commas[commas.len() - 1];
            let second_last = commas[commas.len() - 2];
            let primary = digits_between(last + 1, integer_part.len());
            let secondary = digits_between(second_last + 1, last);
            (primary, secondary)
        }
    };

    let min_integer_digits = count(integer_part, '0');
    let at_count = count(integer_part, '@');
    let (min_significant_digits, max_significant_digits) = if at_count > 0 {
        let last_at = integer_part.iter().rposition(|&c| c == '@').unwrap();
        let trailing_hash = integer_part[last_at + 1..]
            .iter()
            .filter(|&&c| c == '#')
            .count();
        (Some(at_count), Some(at_count + trailing_hash))
    } else {
        (None, None)
    };

    let min_fraction_digits = count(fraction_part, '0');
    let max_fraction_digits = min_fraction_digits + count(fraction_part, '#');

    let exponent_spec = match exponent {
        Some(chars) if chars.is_empty() => {
            return Err(PatternSyntaxError::MalformedExponent(raw.to_string()));
        }
        Some(chars) => {
            let sign_required = chars[0] == '+';
            let digit_chars = if sign_required { &chars[1..] } else { chars };
            if digit_chars.is_empty() || digit_chars.iter().any(|&c| c != '0') {
                return Err(PatternSyntaxError::MalformedExponent(raw.to_string()));
            }
            let mantissa_width = integer_part
                .iter()
                .filter(|&&c| c == '0' || c == '#')
                .count()
                .max(1);
            Some(ExponentSpec {
                sign_required,
                min_digits: digit_chars.len(),
                mantissa_width,
            })
        }
        None => None,
    };

    Ok(NumberBodySpec {
        min_integer_digits,
        grouping_primary,
        grouping_secondary,
        min_fraction_digits,
        max_fraction_digits,
        min_significant_digits,
        max_significant_digits,
        exponent: exponent_spec,
    })
}

struct NumberBodySpec {
    min_integer_digits: usize,
    grouping_primary: usize,
    grouping_secondary: usize,
    min_fraction_digits: usize,
    max_fraction_digits: usize,
    min_significant_digits: Option<usize>,
    max_significant_digits: Option<usize>,
    exponent: Option<ExponentSpec>,
}

fn detect_scale(affix: &AffixPair) -> Scale {
    if affix.prefix.contains('%') || affix.suffix.contains('%') {
        Scale::Percent
    } else if affix.prefix.contains('\u{2030}') || affix.suffix.contains('\u{2030}') {
        Scale::Permille
    } else {
        Scale::None
    }
}

fn has_currency_marker(affix: &AffixPair) -> bool {
    affix.prefix.contains('\u{A4}') || affix.suffix.contains('\u{A4}')
}

/// Parses a full `;`-separated CLDR number pattern into its numeric spec
/// plus positive/negative affix pairs.
pub fn parse_pattern(pattern: &str) -> Result<NumberPattern, PatternSyntaxError> {
    if pattern.is_empty() {
        return Err(PatternSyntaxError::Empty);
    }
    let parts = split_top_level(pattern, ';');
    if parts.len() > 2 {
        return Err(PatternSyntaxError::TooManySubpatterns(pattern.to_string()));
    }

    let positive = parse_subpattern(parts[0])?;
    let spec = parse_body(&positive.body, parts[0])?;
    let scale = detect_scale(&positive.affix);
    let has_currency = has_currency_marker(&positive.affix);

    let negative = match parts.get(1) {
        Some(raw) => parse_subpattern(raw)?.affix,
        None => AffixPair {
            prefix: format!("-{}", positive.affix.prefix),
            suffix: positive.affix.suffix.clone(),
        },
    };

    Ok(NumberPattern {
        positive: positive.affix,
        negative,
        min_integer_digits: spec.min_integer_digits,
        grouping_primary: spec.grouping_primary,
        grouping_secondary: spec.grouping_secondary,
        min_fraction_digits: spec.min_fraction_digits,
        max_fraction_digits: spec.max_fraction_digits,
        min_significant_digits: spec.min_significant_digits,
        max_significant_digits: spec.max_significant_digits,
        exponent: spec.exponent,
        scale,
        has_currency,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_decimal_pattern() {
        let p = parse_pattern("#,##0.###").unwrap();
        assert_eq!(p.grouping_primary, 3);
        assert_eq!(p.grouping_secondary, 3);
        assert_eq!(p.min_integer_digits, 1);
        assert_eq!(p.max_fraction_digits, 3);
        assert_eq!(p.min_fraction_digits, 0);
        assert_eq!(p.scale, Scale::None);
    }

    #[test]
    fn parses_explicit_negative_subpattern() {
        let p = parse_pattern("#,##0.00;(#,##0.00)").unwrap();
        assert_eq!(p.negative.prefix, "(");
        assert_eq!(p.negative.suffix, ")");
    }

    #[test]
    fn derives_negative_from_positive_when_absent() {
        let p = parse_pattern("#,##0.00").unwrap();
        assert_eq!(p.negative.prefix, "-");
        assert_eq!(p.negative.suffix, "");
    }

    #[test]
    fn detects_percent_and_currency_markers() {
        let percent = parse_pattern("#,##0%").unwrap();
        assert_eq!(percent.scale, Scale::Percent);

        let currency = parse_pattern("\u{A4}#,##0.00").unwrap();
        assert!(currency.has_currency);
    }

    #[test]
    fn parses_indian_style_secondary_grouping() {
        let p = parse_pattern("#,##,##0.###").unwrap();
        assert_eq!(p.grouping_primary, 3);
        assert_eq!(p.grouping_secondary, 2);
    }

    #[test]
    fn parses_significant_digit_pattern() {
        let p = parse_pattern("@@##").unwrap();
        assert_eq!(p.min_significant_digits, Some(2));
        assert_eq!(p.max_significant_digits, Some(4));
    }

    #[test]
    fn parses_scientific_exponent() {
        let p = parse_pattern("#E0").unwrap();
        let exp = p.exponent.unwrap();
        assert_eq!(exp.min_digits, 1);
        assert!(!exp.sign_required);
        assert_eq!(exp.mantissa_width, 1);
    }

    #[test]
    fn rejects_empty_pattern() {
        assert!(parse_pattern("").is_err());
    }

    #[test]
    fn rejects_pattern_without_digits() {
        assert!(parse_pattern("abc").is_err());
    }
}
