//! `format_list` (spec §4.6): applies a locale's `start`/`middle`/`end`/
//! `2` list patterns, following a style fallback chain when the locale
//! doesn't define the requested style directly.

use intl_localedata::{Data, LocaleData};

use crate::error::FormatError;
use crate::template::substitute;

struct ListPatterns {
    start: String,
    middle: String,
    end: String,
    pair: String,
}

fn fallback_chain(style: &str) -> Vec<String> {
    let mut chain = vec![style.to_string()];
    if let Some(family) = style.strip_suffix("-narrow") {
        chain.push(format!("{family}-short"));
        chain.push(family.to_string());
    } else if let Some(family) = style.strip_suffix("-short") {
        chain.push(family.to_string());
    }
    if style != "standard" {
        chain.push("standard".to_string());
    }
    chain
}

fn lookup_patterns(locale_data: &LocaleData, style: &str) -> Option<ListPatterns> {
    let data = locale_data.get(&["list_patterns", style]).ok()?;
    let map = data.as_map()?;
    Some(ListPatterns {
        start: map.get("start").and_then(Data::as_str)?.to_string(),
        middle: map.get("middle").and_then(Data::as_str)?.to_string(),
        end: map.get("end").and_then(Data::as_str)?.to_string(),
        pair: map.get("2").and_then(Data::as_str)?.to_string(),
    })
}

fn resolve_patterns(locale_data: &LocaleData, style: &str) -> Result<ListPatterns, FormatError> {
    fallback_chain(style)
        .iter()
        .find_map(|candidate| lookup_patterns(locale_data, candidate))
        .ok_or_else(|| FormatError::ValueError(format!("no list pattern resolves for style {style:?}")))
}

pub fn format_list(items: &[String], style: &str, locale_data: &LocaleData) -> Result<String, FormatError> {
    match items.len() {
        0 => Err(FormatError::ValueError("cannot format an empty list".to_string())),
        1 => Ok(items[0].clone()),
        _ => {
            let patterns = resolve_patterns(locale_data, style)?;
            if items.len() == 2 {
                return Ok(substitute(&patterns.pair, &[&items[0], &items[1]]));
            }
            let mut result = items[items.len() - 1].clone();
            result = substitute(&patterns.end, &[&items[items.len() - 2], &result]);
            for item in items[1..items.len() - 2].iter().rev() {
                result = substitute(&patterns.middle, &[item, &result]);
            }
            result = substitute(&patterns.start, &[&items[0], &result]);
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn locale_with_list_patterns() -> LocaleData {
        let mut style = IndexMap::new();
        style.insert("start".to_string(), Data::Str("{0}, {1}".to_string()));
        style.insert("middle".to_string(), Data::Str("{0}, {1}".to_string()));
        style.insert("end".to_string(), Data::Str("{0}, and {1}".to_string()));
        style.insert("2".to_string(), Data::Str("{0} and {1}".to_string()));
        let mut styles = IndexMap::new();
        styles.insert("standard".to_string(), Data::Map(style));
        let mut root = IndexMap::new();
        root.insert("list_patterns".to_string(), Data::Map(styles));
        LocaleData::new(Data::Map(root))
    }

    #[test]
    fn formats_three_item_list() {
        let locale_data = locale_with_list_patterns();
        let items = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let out = format_list(&items, "standard", &locale_data).unwrap();
        assert_eq!(out, "a, b, and c");
    }

    #[test]
    fn formats_pair() {
        let locale_data = locale_with_list_patterns();
        let items = vec!["a".to_string(), "b".to_string()];
        let out = format_list(&items, "standard", &locale_data).unwrap();
        assert_eq!(out, "a and b");
    }

    #[test]
    fn falls_back_through_style_chain() {
        let locale_data = locale_with_list_patterns();
        let items = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let out = format_list(&items, "unit-narrow", &locale_data).unwrap();
        assert_eq!(out, "a, b, and c");
    }

    #[test]
    fn empty_list_is_value_error() {
        let locale_data = locale_with_list_patterns();
        assert!(format_list(&[], "standard", &locale_data).is_err());
    }
}
