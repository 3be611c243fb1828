//! `format_unit` (spec §4.6): looks up the plural-category-driven unit
//! template and substitutes the formatted number in; compound units
//! ("meter-per-second") combine a numerator and denominator via
//! `compound_unit_patterns`.

use rust_decimal::Decimal;

use intl_localedata::{Data, LocaleData};
use intl_numbers::{format_number, FormatOptions, Number, NumberPattern, NumberSymbols};
use intl_pluralrules::{PluralOperands, PluralRuleSet};

use crate::error::FormatError;
use crate::template::substitute;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitLength {
    Long,
    Short,
    Narrow,
}

impl UnitLength {
    fn key(&self) -> &'static str {
        match self {
            UnitLength::Long => "long",
            UnitLength::Short => "short",
            UnitLength::Narrow => "narrow",
        }
    }
}

fn unit_template(locale_data: &LocaleData, unit_id: &str, length: UnitLength, category: &str) -> Option<String> {
    let data = locale_data.get(&["unit_patterns", unit_id, length.key()]).ok()?;
    let map = data.as_map()?;
    map.get(category)
        .or_else(|| map.get("other"))
        .and_then(Data::as_str)
        .map(str::to_string)
}

fn display_name(locale_data: &LocaleData, unit_id: &str, length: UnitLength) -> Option<String> {
    let data = locale_data.get(&["unit_patterns", unit_id, length.key(), "display_name"]).ok()?;
    data.as_str().map(str::to_string)
}

fn compound_template(locale_data: &LocaleData, length: UnitLength, key: &str) -> Option<String> {
    let data = locale_data.get(&["compound_unit_patterns", length.key(), key]).ok()?;
    data.as_str().map(str::to_string)
}

pub fn format_unit(
    value: Decimal,
    unit_id: &str,
    length: UnitLength,
    locale_data: &LocaleData,
    cardinal_rules: &PluralRuleSet,
    number_pattern: &NumberPattern,
    symbols: &NumberSymbols,
) -> Result<String, FormatError> {
    let operands = PluralOperands::from_decimal(value.abs(), 0);
    let category = cardinal_rules.select(&operands);
    let number_text = format_number(&Number::Finite(value), number_pattern, symbols, &FormatOptions::default())?;

    if let Some((numerator, denominator)) = unit_id.split_once("-per-") {
        let numerator_template = unit_template(locale_data, numerator, length, category.as_str())
            .unwrap_or_else(|| "{0} ".to_string() + numerator);
        let numerator_text = substitute(&numerator_template, &[&number_text]);
        let denominator_name = display_name(locale_data, denominator, length).unwrap_or_else(|| denominator.to_string());
        let per_template = compound_template(locale_data, length, "per")
            .unwrap_or_else(|| "{0}/{1}".to_string());
        return Ok(substitute(&per_template, &[&numerator_text, &denominator_name]));
    }

    let template = unit_template(locale_data, unit_id, length, category.as_str())
        .ok_or_else(|| FormatError::ValueError(format!("no unit pattern for {unit_id:?}")))?;
    Ok(substitute(&template, &[&number_text]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use intl_localedata::LocaleData;
    use intl_numbers::parse_pattern;
    use intl_pluralrules::category::PluralRuleType;
    use std::str::FromStr;

    fn locale_data_with(path: &[&str], leaf: &str) -> LocaleData {
        let mut value = Data::Str(leaf.to_string());
        for key in path.iter().rev() {
            let mut m = IndexMap::new();
            m.insert(key.to_string(), value);
            value = Data::Map(m);
        }
        LocaleData::new(value)
    }

    #[test]
    fn substitutes_number_into_unit_template() {
        let locale_data = locale_data_with(&["unit_patterns", "meter", "long", "other"], "{0} meters");
        let rules = PluralRuleSet::compile(PluralRuleType::Cardinal, &IndexMap::new()).unwrap();
        let pattern = parse_pattern("#,##0.###").unwrap();
        let symbols = NumberSymbols::default();
        let out = format_unit(
            Decimal::from_str("3").unwrap(),
            "meter",
            UnitLength::Long,
            &locale_data,
            &rules,
            &pattern,
            &symbols,
        )
        .unwrap();
        assert_eq!(out, "3 meters");
    }

    #[test]
    fn missing_unit_pattern_is_value_error() {
        let locale_data = LocaleData::new(Data::Map(IndexMap::new()));
        let rules = PluralRuleSet::compile(PluralRuleType::Cardinal, &IndexMap::new()).unwrap();
        let pattern = parse_pattern("#,##0.###").unwrap();
        let symbols = NumberSymbols::default();
        let err = format_unit(
            Decimal::from_str("3").unwrap(),
            "meter",
            UnitLength::Long,
            &locale_data,
            &rules,
            &pattern,
            &symbols,
        )
        .unwrap_err();
        assert!(matches!(err, FormatError::ValueError(_)));
    }
}
