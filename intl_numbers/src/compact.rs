//! Compact decimal formatting ("1.2K", "3M"): bucket selection by
//! magnitude, mantissa derivation, and plural-category-driven pattern
//! substitution (spec component C4, short/long compact number patterns).

use std::collections::HashMap;

use rust_decimal::{Decimal, MathematicalOps};

use intl_pluralrules::{PluralOperands, PluralRuleSet};

use crate::error::NumberFormatError;
use crate::format::{format_number, FormatOptions, Number};
use crate::pattern::{NumberPattern, Scale};
use crate::rounding::round_to_significant_digits;
use crate::symbols::NumberSymbols;

/// One magnitude bucket (`10^magnitude`) with its per-plural-category
/// pattern, e.g. `{"other": "0K", "one": "0K"}` at `magnitude = 3`.
#[derive(Debug, Clone)]
pub struct CompactEntry {
    pub magnitude: u32,
    pub patterns: HashMap<String, String>,
}

#[derive(Debug, Clone, Default)]
pub struct CompactData {
    /// Ascending by magnitude.
    pub entries: Vec<CompactEntry>,
}

impl CompactData {
    fn select(&self, abs_value: Decimal) -> Option<&CompactEntry> {
        let ten = Decimal::from(10);
        self.entries
            .iter()
            .filter(|entry| {
                let threshold = ten.powi(entry.magnitude as i64);
                abs_value >= threshold
            })
            .max_by_key(|entry| entry.magnitude)
    }
}

fn split_zero_run(pattern: &str) -> (String, usize, String) {
    let mut prefix = String::new();
    let mut zeros = 0usize;
    let mut suffix = String::new();
    let mut seen_zero = false;
    let mut done_zero = false;
    for ch in pattern.chars() {
        if ch == '0' && !done_zero {
            zeros += 1;
            seen_zero = true;
            continue;
        }
        if seen_zero {
            done_zero = true;
        }
        if done_zero {
            suffix.push(ch);
        } else {
            prefix.push(ch);
        }
    }
    (prefix, zeros, suffix)
}

/// Renders `value` using the compact pattern whose magnitude bucket it
/// falls into, or plain `number_pattern` formatting when no bucket
/// applies (value too small, or the bucket's pattern is the literal `"0"`
/// sentinel CLDR uses for "no compact form here").
pub fn format_compact(
    value: Decimal,
    compact: &CompactData,
    cardinal_rules: &PluralRuleSet,
    number_pattern: &NumberPattern,
    symbols: &NumberSymbols,
    options: &FormatOptions,
) -> Result<String, NumberFormatError> {
    let abs_value = value.abs();
    let Some(entry) = compact.select(abs_value) else {
        return format_number(&Number::Finite(value), number_pattern, symbols, options);
    };

    let divisor = Decimal::from(10).powi(entry.magnitude as i64);
    let mantissa = value / divisor;

    let operands = PluralOperands::from_decimal(mantissa.abs().normalize(), 0);
    let category = cardinal_rules.select(&operands);
    let pattern_str = entry
        .patterns
        .get(category.as_str())
        .or_else(|| entry.patterns.get("other"))
        .cloned()
        .unwrap_or_else(|| "0".to_string());

    let (prefix, zero_count, suffix) = split_zero_run(&pattern_str);
    if zero_count == 0 {
        return format_number(&Number::Finite(value), number_pattern, symbols, options);
    }

    let significant = zero_count.max(1);
    let rounded = round_to_significant_digits(mantissa, significant);

    let mut mantissa_pattern = number_pattern.clone();
    mantissa_pattern.scale = Scale::None;
    mantissa_pattern.min_integer_digits = 1;
    mantissa_pattern.max_significant_digits = Some(significant);
    mantissa_pattern.min_significant_digits = Some(1);

    let body = format_number(&Number::Finite(rounded), &mantissa_pattern, symbols, options)?;
    Ok(format!("{prefix}{body}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::parse_pattern;
    use indexmap::IndexMap;
    use intl_pluralrules::category::PluralRuleType;
    use std::str::FromStr;

    fn other_only(pattern: &str) -> CompactEntry {
        let mut patterns = HashMap::new();
        patterns.insert("other".to_string(), pattern.to_string());
        CompactEntry { magnitude: 3, patterns }
    }

    #[test]
    fn falls_back_below_smallest_bucket() {
        let data = CompactData { entries: vec![other_only("0K")] };
        let rules = PluralRuleSet::compile(PluralRuleType::Cardinal, &IndexMap::new()).unwrap();
        let pattern = parse_pattern("#,##0.###").unwrap();
        let symbols = NumberSymbols::default();
        let out = format_compact(
            Decimal::from_str("42").unwrap(),
            &data,
            &rules,
            &pattern,
            &symbols,
            &FormatOptions::default(),
        )
        .unwrap();
        assert_eq!(out, "42");
    }

    #[test]
    fn formats_thousands_bucket() {
        let data = CompactData {
            entries: vec![CompactEntry { magnitude: 3, patterns: HashMap::from([("other".to_string(), "0K".to_string())]) }],
        };
        let rules = PluralRuleSet::compile(PluralRuleType::Cardinal, &IndexMap::new()).unwrap();
        let pattern = parse_pattern("#,##0.###").unwrap();
        let symbols = NumberSymbols::default();
        let out = format_compact(
            Decimal::from_str("1200").unwrap(),
            &data,
            &rules,
            &pattern,
            &symbols,
            &FormatOptions::default(),
        )
        .unwrap();
        assert_eq!(out, "1K");
    }
}
