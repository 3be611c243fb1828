//! `common/main/<locale>.xml` → one locale's compiled data tree.
//!
//! The biggest section-by-section port of
//! `examples/original_source/scripts/import_cldr.py`: each `parse_*`
//! helper below corresponds to one of that file's `parse_locale_display_names`
//! / `parse_list_patterns` / `parse_dates` / `parse_calendar_*` /
//! `parse_number_symbols` / `parse_decimal_formats` / `parse_currency_*` /
//! `parse_unit_patterns` / `parse_date_fields` / `parse_day_period_rules`
//! (CLDR-rule-matching part only — boundary values themselves come from
//! supplemental data, see `dayperiods.rs`) / `parse_character_order` /
//! `parse_measurement_systems` functions, rebuilt against the key
//! contract this workspace's formatters already expect.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

use crate::error::ImportError;
use crate::version::extract_version_from_file;
use crate::xml::XmlNode;

pub struct LocaleParse {
    pub locale_id: String,
    pub data: Value,
    pub version: i64,
}

pub struct LocaleInputs<'a> {
    pub plural_rules: Option<&'a IndexMap<String, String>>,
    pub ordinal_rules: Option<&'a IndexMap<String, String>>,
    pub rbnf_rules: Option<&'a IndexMap<String, IndexMap<String, String>>>,
    pub day_period_rules: Option<&'a Vec<Value>>,
    pub numbering_systems: &'a HashMap<String, String>,
}

pub fn parse_locale_file(path: &Path, inputs: &LocaleInputs) -> Result<LocaleParse, ImportError> {
    let locale_id = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| ImportError::Io(path.display().to_string(), e))?;
    let version = extract_version_from_file(&content).unwrap_or(0);
    let root = crate::xml::parse_str(&content)?;

    let mut out = Map::new();

    if let Some(names) = root.find("localeDisplayNames") {
        insert_display_map(&mut out, "languages", names.child_named("languages"), "language");
        insert_display_map(&mut out, "scripts", names.child_named("scripts"), "script");
        insert_display_map(&mut out, "territories", names.child_named("territories"), "territory");
        insert_display_map(&mut out, "variants", names.child_named("variants"), "variant");
        if let Some(measurement) = names.child_named("measurementSystemNames") {
            let mut map = Map::new();
            for entry in measurement.children_named("measurementSystemName") {
                if let Some(ty) = entry.attr("type") {
                    map.insert(ty.to_string(), json!(entry.full_text()));
                }
            }
            out.insert("measurement_system_names".to_string(), Value::Object(map));
        }
    }

    if let Some(layout) = root.find("layout") {
        if let Some(order) = layout.find("characterOrder") {
            out.insert("character_order".to_string(), json!(order.full_text()));
        }
    }

    if let Some(calendar) = root.find("calendars").and_then(|c| c.children_named("calendar").find(|cal| cal.attr("type") == Some("gregorian"))) {
        parse_calendar(calendar, &mut out);
    }

    if let Some(fields) = root.find("fields") {
        let mut map = Map::new();
        for field in fields.children_named("field") {
            let Some(ty) = field.attr("type") else { continue };
            if let Some(display) = field.child_named("displayName") {
                map.insert(ty.to_string(), json!(display.full_text()));
            }
        }
        out.insert("date_fields".to_string(), Value::Object(map));
    }

    if let Some(numbers) = root.find("numbers") {
        parse_numbers(numbers, &mut out, inputs.numbering_systems);
    }

    if let Some(units) = root.find("units") {
        parse_units(units, &mut out);
    }

    if let Some(list_patterns) = root.find("listPatterns") {
        let mut map = Map::new();
        for list_pattern in list_patterns.children_named("listPattern") {
            let style = list_pattern.attr("type").unwrap_or("standard");
            let mut parts = Map::new();
            for part in list_pattern.children_named("listPatternPart") {
                let Some(ty) = part.attr("type") else { continue };
                parts.insert(ty.to_string(), json!(part.full_text()));
            }
            map.insert(style.to_string(), Value::Object(parts));
        }
        out.insert("list_patterns".to_string(), Value::Object(map));
    }

    if let Some(rules) = inputs.plural_rules {
        out.insert("plural_form".to_string(), rules_to_value(rules));
    }
    if let Some(rules) = inputs.ordinal_rules {
        out.insert("ordinal_form".to_string(), rules_to_value(rules));
    }
    if let Some(rbnf) = inputs.rbnf_rules {
        let mut map = Map::new();
        for (ruleset, rules) in rbnf {
            map.insert(ruleset.clone(), rules_to_value(rules));
        }
        out.insert("rbnf_rules".to_string(), Value::Object(map));
    }
    if let Some(rules) = inputs.day_period_rules {
        out.insert("day_period_rules".to_string(), Value::Array(rules.clone()));
    }

    Ok(LocaleParse { locale_id, data: Value::Object(out), version })
}

fn rules_to_value(rules: &IndexMap<String, String>) -> Value {
    let mut map = Map::new();
    for (category, body) in rules {
        map.insert(category.clone(), json!(body));
    }
    Value::Object(map)
}

fn insert_display_map(out: &mut Map<String, Value>, key: &str, container: Option<&XmlNode>, child_tag: &str) {
    let Some(container) = container else { return };
    let mut map = Map::new();
    for entry in container.children_named(child_tag) {
        // Skip count-qualified / alt-qualified territory display names
        // (e.g. plural-category country names) — only the plain form is
        // exposed here.
        if entry.has_attr("count") || entry.has_attr("alt") {
            continue;
        }
        let Some(ty) = entry.attr("type") else { continue };
        map.insert(ty.to_string(), json!(entry.full_text()));
    }
    out.insert(key.to_string(), Value::Object(map));
}

fn context_key(cldr_context: &str) -> &'static str {
    if cldr_context == "stand-alone" { "stand_alone" } else { "format" }
}

/// `months` / `days` / `quarters`: a `{format, stand_alone}` / width
/// tree keyed the way `intl_datetime::symbols::form_field` reads it.
fn parse_width_context(container: &XmlNode, context_tag: &str, width_tag: &str, item_tag: &str) -> Value {
    let mut contexts = Map::new();
    for context in container.children_named(context_tag) {
        let Some(cldr_context) = context.attr("type") else { continue };
        let mut widths = Map::new();
        for width in context.children_named(width_tag) {
            let Some(cldr_width) = width.attr("type") else { continue };
            let mut items: Vec<(i64, String)> = Vec::new();
            for item in width.children_named(item_tag) {
                if item.has_attr("alt") {
                    continue;
                }
                let Some(ty) = item.attr("type") else { continue };
                let index = day_or_numeric_index(ty);
                items.push((index, item.full_text()));
            }
            items.sort_by_key(|(i, _)| *i);
            let seq: Vec<Value> = items.into_iter().map(|(_, text)| json!(text)).collect();
            widths.insert(cldr_width.to_string(), Value::Array(seq));
        }
        contexts.insert(context_key(cldr_context).to_string(), Value::Object(widths));
    }
    Value::Object(contexts)
}

const WEEKDAY_ORDER: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

fn day_or_numeric_index(ty: &str) -> i64 {
    if let Some(pos) = WEEKDAY_ORDER.iter().position(|d| *d == ty) {
        return pos as i64;
    }
    ty.parse().unwrap_or(0)
}

fn parse_calendar(calendar: &XmlNode, out: &mut Map<String, Value>) {
    if let Some(months) = calendar.child_named("months") {
        out.insert("months".to_string(), parse_width_context(months, "monthContext", "monthWidth", "month"));
    }
    if let Some(days) = calendar.child_named("days") {
        out.insert("weekdays".to_string(), parse_width_context(days, "dayContext", "dayWidth", "day"));
    }
    if let Some(quarters) = calendar.child_named("quarters") {
        out.insert("quarters".to_string(), parse_width_context(quarters, "quarterContext", "quarterWidth", "quarter"));
    }
    if let Some(eras) = calendar.child_named("eras") {
        let mut map = Map::new();
        if let Some(names) = eras.child_named("eraNames") {
            map.insert("wide".to_string(), era_seq(names));
        }
        if let Some(names) = eras.child_named("eraAbbr") {
            map.insert("abbreviated".to_string(), era_seq(names));
        }
        if let Some(names) = eras.child_named("eraNarrow") {
            map.insert("narrow".to_string(), era_seq(names));
        }
        out.insert("eras".to_string(), Value::Object(map));
    }
    if let Some(periods_root) = calendar.child_named("dayPeriods") {
        let mut contexts = Map::new();
        for context in periods_root.children_named("dayPeriodContext") {
            let Some(cldr_context) = context.attr("type") else { continue };
            let mut widths = Map::new();
            for width in context.children_named("dayPeriodWidth") {
                let Some(cldr_width) = width.attr("type") else { continue };
                let mut map = Map::new();
                for period in width.children_named("dayPeriod") {
                    if period.has_attr("alt") {
                        continue;
                    }
                    let Some(ty) = period.attr("type") else { continue };
                    map.insert(ty.to_string(), json!(period.full_text()));
                }
                widths.insert(cldr_width.to_string(), Value::Object(map));
            }
            contexts.insert(context_key(cldr_context).to_string(), Value::Object(widths));
        }
        out.insert("periods".to_string(), Value::Object(contexts));
    }
    if let Some(formats) = calendar.child_named("dateFormats") {
        out.insert("date_formats".to_string(), format_lengths(formats, "dateFormatLength", "dateFormat"));
    }
    if let Some(formats) = calendar.child_named("timeFormats") {
        out.insert("time_formats".to_string(), format_lengths(formats, "timeFormatLength", "timeFormat"));
    }
    if let Some(datetime) = calendar.child_named("dateTimeFormats") {
        out.insert("datetime_formats".to_string(), format_lengths(datetime, "dateTimeFormatLength", "dateTimeFormat"));
        if let Some(available) = datetime.child_named("availableFormats") {
            let mut map = Map::new();
            for item in available.children_named("dateFormatItem") {
                let Some(id) = item.attr("id") else { continue };
                map.insert(id.to_string(), json!(item.full_text()));
            }
            out.insert("datetime_skeletons".to_string(), Value::Object(map));
        }
        if let Some(interval) = datetime.child_named("intervalFormats") {
            let mut map = Map::new();
            if let Some(fallback) = interval.child_named("intervalFormatFallback") {
                map.insert("fallback".to_string(), json!(fallback.full_text()));
            }
            let mut items = Map::new();
            for item in interval.children_named("intervalFormatItem") {
                let Some(id) = item.attr("id") else { continue };
                let mut per_field = Map::new();
                for greatest in item.children_named("greatestDifference") {
                    let Some(field) = greatest.attr("id") else { continue };
                    per_field.insert(field.to_string(), json!(greatest.full_text()));
                }
                items.insert(id.to_string(), Value::Object(per_field));
            }
            map.insert("by_skeleton".to_string(), Value::Object(items));
            out.insert("interval_formats".to_string(), Value::Object(map));
        }
    }
}

fn era_seq(container: &XmlNode) -> Value {
    let mut items: Vec<(i64, String)> = Vec::new();
    for era in container.children_named("era") {
        if era.has_attr("alt") {
            continue;
        }
        let Some(ty) = era.attr("type") else { continue };
        items.push((ty.parse().unwrap_or(0), era.full_text()));
    }
    items.sort_by_key(|(i, _)| *i);
    Value::Array(items.into_iter().map(|(_, t)| json!(t)).collect())
}

fn format_lengths(container: &XmlNode, length_tag: &str, pattern_tag: &str) -> Value {
    let mut map = Map::new();
    for length in container.children_named(length_tag) {
        let cldr_width = length.attr("type").unwrap_or("default");
        if let Some(format) = length.child_named(pattern_tag) {
            if let Some(pattern) = format.child_named("pattern") {
                map.insert(cldr_width.to_string(), json!(pattern.full_text()));
            }
        }
    }
    Value::Object(map)
}

fn parse_numbers(numbers: &XmlNode, out: &mut Map<String, Value>, numbering_systems: &HashMap<String, String>) {
    let default_system = numbers
        .child_named("defaultNumberingSystem")
        .map(|n| n.full_text())
        .unwrap_or_else(|| "latn".to_string());

    let symbols_node = numbers
        .children_named("symbols")
        .find(|s| s.attr("numberSystem") == Some(default_system.as_str()))
        .or_else(|| numbers.child_named("symbols"));
    let mut symbols = Map::new();
    symbols.insert("numbering_system".to_string(), json!(default_system));
    if let Some(digits) = numbering_systems.get(&default_system) {
        symbols.insert("digits".to_string(), json!(digits));
    }
    if let Some(node) = symbols_node {
        for (tag, key) in [
            ("decimal", "decimal"),
            ("group", "group"),
            ("plusSign", "plus_sign"),
            ("minusSign", "minus_sign"),
            ("exponential", "exponential"),
            ("percentSign", "percent_sign"),
            ("perMille", "permille_sign"),
            ("infinity", "infinity"),
            ("nan", "nan"),
        ] {
            if let Some(child) = node.child_named(tag) {
                symbols.insert(key.to_string(), json!(child.full_text()));
            }
        }
    }
    out.insert("symbols".to_string(), Value::Object(symbols));

    let mut patterns = Map::new();
    if let Some(pattern) = find_numbered_pattern(numbers, "decimalFormats", "decimalFormatLength", "decimalFormat", &default_system) {
        patterns.insert("decimal".to_string(), json!(pattern));
    }
    if let Some(pattern) = find_numbered_pattern(numbers, "percentFormats", "percentFormatLength", "percentFormat", &default_system) {
        patterns.insert("percent".to_string(), json!(pattern));
    }
    if let Some(pattern) = find_numbered_pattern(numbers, "scientificFormats", "scientificFormatLength", "scientificFormat", &default_system) {
        patterns.insert("scientific".to_string(), json!(pattern));
    }
    out.insert("number_patterns".to_string(), Value::Object(patterns));

    if let Some(currency_formats) = numbers
        .children_named("currencyFormats")
        .find(|c| c.attr("numberSystem") == Some(default_system.as_str()))
        .or_else(|| numbers.child_named("currencyFormats"))
    {
        let mut formats = Map::new();
        for length in currency_formats.children_named("currencyFormatLength") {
            if length.has_attr("type") {
                continue;
            }
            for format in length.children_named("currencyFormat") {
                let kind = format.attr("type").unwrap_or("standard");
                if let Some(pattern) = format.child_named("pattern") {
                    formats.insert(kind.to_string(), json!(pattern.full_text()));
                }
            }
        }
        out.insert("currency_formats".to_string(), Value::Object(formats));

        let mut unit_patterns = Map::new();
        for pattern in currency_formats.children_named("unitPattern") {
            let Some(count) = pattern.attr("count") else { continue };
            unit_patterns.insert(count.to_string(), json!(pattern.full_text()));
        }
        out.insert("currency_unit_patterns".to_string(), Value::Object(unit_patterns));
    }

    if let Some(currencies) = numbers.child_named("currencies") {
        let mut symbols_map = Map::new();
        let mut names_plural = Map::new();
        let mut names = Map::new();
        for currency in currencies.children_named("currency") {
            let Some(code) = currency.attr("type") else { continue };
            if let Some(symbol) = currency.children_named("symbol").find(|s| !s.has_attr("alt")) {
                symbols_map.insert(code.to_string(), json!(symbol.full_text()));
            }
            let mut plural = Map::new();
            for display in currency.children_named("displayName") {
                match display.attr("count") {
                    Some(count) => {
                        plural.insert(count.to_string(), json!(display.full_text()));
                    }
                    None => {
                        names.insert(code.to_string(), json!(display.full_text()));
                    }
                }
            }
            if !plural.is_empty() {
                names_plural.insert(code.to_string(), Value::Object(plural));
            }
        }
        out.insert("currency_symbols".to_string(), Value::Object(symbols_map));
        out.insert("currency_names_plural".to_string(), Value::Object(names_plural));
        out.insert("currency_names".to_string(), Value::Object(names));
    }
}

fn find_numbered_pattern(numbers: &XmlNode, section: &str, length_tag: &str, pattern_tag: &str, system: &str) -> Option<String> {
    let section_node = numbers
        .children_named(section)
        .find(|s| s.attr("numberSystem") == Some(system))
        .or_else(|| numbers.child_named(section))?;
    let length = section_node.child_named(length_tag)?;
    let format = length.child_named(pattern_tag)?;
    let pattern = format.child_named("pattern")?;
    Some(pattern.full_text())
}

fn parse_units(units: &XmlNode, out: &mut Map<String, Value>) {
    let mut unit_patterns = Map::new();
    let mut compound_unit_patterns = Map::new();
    for unit_length in units.children_named("unitLength") {
        let Some(length) = unit_length.attr("type") else { continue };
        for unit in unit_length.children_named("unit") {
            let Some(raw_id) = unit.attr("type") else { continue };
            let unit_id = strip_unit_prefix(raw_id);
            let mut entry = Map::new();
            for pattern in unit.children_named("unitPattern") {
                let Some(count) = pattern.attr("count") else { continue };
                entry.insert(count.to_string(), json!(pattern.full_text()));
            }
            if let Some(per) = unit.child_named("perUnitPattern") {
                entry.insert("per".to_string(), json!(per.full_text()));
            }
            if let Some(display) = unit.child_named("displayName") {
                entry.insert("display_name".to_string(), json!(display.full_text()));
            }
            unit_patterns
                .entry(unit_id.clone())
                .or_insert_with(|| Value::Object(Map::new()))
                .as_object_mut()
                .expect("inserted as object")
                .insert(length.to_string(), Value::Object(entry));
        }
        for compound in unit_length.children_named("compoundUnit") {
            let Some(key) = compound.attr("type") else { continue };
            if let Some(pattern) = compound.child_named("compoundUnitPattern") {
                compound_unit_patterns
                    .entry(length.to_string())
                    .or_insert_with(|| Value::Object(Map::new()))
                    .as_object_mut()
                    .expect("inserted as object")
                    .insert(key.to_string(), json!(pattern.full_text()));
            }
        }
    }
    out.insert("unit_patterns".to_string(), Value::Object(unit_patterns));
    out.insert("compound_unit_patterns".to_string(), Value::Object(compound_unit_patterns));
}

/// CLDR unit ids carry a category prefix (`length-meter`, `duration-day`)
/// that the consumer's compound-unit splitting (`"meter-per-second"`)
/// doesn't expect; strip it the way a display-facing unit catalog would.
fn strip_unit_prefix(unit_id: &str) -> String {
    match unit_id.split_once('-') {
        Some((prefix, rest)) if is_category_prefix(prefix) => rest.to_string(),
        _ => unit_id.to_string(),
    }
}

fn is_category_prefix(prefix: &str) -> bool {
    matches!(
        prefix,
        "length" | "mass" | "duration" | "volume" | "area" | "speed" | "temperature" | "digital"
            | "energy" | "power" | "pressure" | "angle" | "consumption" | "frequency"
            | "acceleration" | "concentr" | "torque" | "light" | "graphics" | "force"
    )
}
