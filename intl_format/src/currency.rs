//! `format_currency` (spec §4.6): standard/accounting pattern rendering
//! through the number formatter, plus the `name` variant that spells the
//! currency out in words via the plural-category-driven long name.

use rust_decimal::Decimal;

use intl_localedata::{Data, GlobalData, LocaleData};
use intl_numbers::{format_currency_value, parse_pattern, FormatOptions, Number, NumberSymbols};
use intl_pluralrules::{PluralOperands, PluralRuleSet};

use crate::error::FormatError;
use crate::template::substitute;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencyFormatType {
    Standard,
    Accounting,
    Name,
}

fn pattern_key(format_type: CurrencyFormatType) -> &'static str {
    match format_type {
        CurrencyFormatType::Standard => "standard",
        CurrencyFormatType::Accounting => "accounting",
        CurrencyFormatType::Name => "standard",
    }
}

fn currency_symbol(locale_data: &LocaleData, code: &str) -> String {
    locale_data
        .get(&["currency_symbols", code])
        .ok()
        .and_then(|d| d.as_str().map(str::to_string))
        .unwrap_or_else(|| code.to_string())
}

fn currency_display_name(
    locale_data: &LocaleData,
    code: &str,
    category: &str,
) -> Option<String> {
    let data = locale_data.get(&["currency_names_plural", code]).ok()?;
    let map = data.as_map()?;
    map.get(category)
        .or_else(|| map.get("other"))
        .and_then(Data::as_str)
        .map(str::to_string)
}

fn unit_pattern(locale_data: &LocaleData, category: &str) -> Option<String> {
    let data = locale_data.get(&["currency_unit_patterns"]).ok()?;
    let map = data.as_map()?;
    map.get(category)
        .or_else(|| map.get("other"))
        .and_then(Data::as_str)
        .map(str::to_string)
}

/// Picks the territory's preferred currency on `date` (an ISO `YYYY-MM-DD`
/// string), per spec §4.6: latest currency whose validity window covers
/// `date` and is marked tender.
pub fn default_currency_for_territory<'a>(
    global: &'a GlobalData,
    territory: &str,
    date: &str,
) -> Option<&'a str> {
    global.territory_currency_on(territory, date)
}

pub fn format_currency(
    value: Decimal,
    code: &str,
    format_type: CurrencyFormatType,
    locale_data: &LocaleData,
    global: &GlobalData,
    cardinal_rules: &PluralRuleSet,
    symbols: &NumberSymbols,
) -> Result<String, FormatError> {
    if !global.currency_fractions.contains_key(code) {
        return Err(FormatError::UnknownCurrency(code.to_string()));
    }

    let fraction = global.currency_fractions.get(code);
    let options = FormatOptions {
        fraction_digits_override: fraction.map(|f| (f.digits as u32, f.digits as u32)),
        ..FormatOptions::default()
    };

    if format_type == CurrencyFormatType::Name {
        let decimal_pattern_str = locale_data
            .get(&["number_patterns", "decimal"])
            .ok()
            .and_then(|d| d.as_str().map(str::to_string))
            .unwrap_or_else(|| "#,##0.###".to_string());
        let decimal_pattern = parse_pattern(&decimal_pattern_str)?;
        let number_text = intl_numbers::format_number(
            &Number::Finite(value),
            &decimal_pattern,
            symbols,
            &options,
        )?;

        let operands = PluralOperands::from_decimal(value.abs(), 0);
        let category = cardinal_rules.select(&operands);
        let name = currency_display_name(locale_data, code, category.as_str())
            .unwrap_or_else(|| code.to_string());
        let template = unit_pattern(locale_data, category.as_str())
            .unwrap_or_else(|| "{0} {1}".to_string());
        return Ok(substitute(&template, &[&number_text, &name]));
    }

    let pattern_str = locale_data
        .get(&["currency_formats", pattern_key(format_type)])?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| FormatError::ValueError("currency pattern is not a string".to_string()))?;
    let pattern = parse_pattern(&pattern_str)?;
    let symbol = currency_symbol(locale_data, code);
    Ok(format_currency_value(
        &Number::Finite(value),
        &pattern,
        symbols,
        &options,
        &symbol,
    )?)
}
