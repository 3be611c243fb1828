//! `common/supplemental/dayPeriods.xml` → per-locale day-period boundary
//! rules, flattened to a `Vec` of `{period, from|before|at}` entries
//! matching `intl_datetime::symbols::day_period_rules`'s expected shape.
//!
//! Only the untyped (default) `dayPeriodRuleSet` is imported; CLDR's
//! alternate `type="selection"` ruleset exists for a handful of locales
//! but has no consumer in this crate (see `DESIGN.md`).

use std::collections::HashMap;
use std::path::Path;

use serde_json::{json, Value};

use crate::error::ImportError;

pub type DayPeriodRuleTable = HashMap<String, Vec<Value>>;

pub fn parse_day_period_rules(path: &Path) -> Result<DayPeriodRuleTable, ImportError> {
    let mut out = DayPeriodRuleTable::new();
    if !path.is_file() {
        return Ok(out);
    }
    let root = crate::xml::parse_file(path)?;
    for rule_set in root.findall("dayPeriodRuleSet") {
        if rule_set.has_attr("type") {
            continue;
        }
        for rules in rule_set.children_named("dayPeriodRules") {
            let Some(locales) = rules.attr("locales") else { continue };
            let mut entries = Vec::new();
            for rule in rules.children_named("dayPeriodRule") {
                let Some(period) = rule.attr("type") else { continue };
                let entry = if let Some(from) = rule.attr("from") {
                    json!({"period": period, "from": from})
                } else if let Some(before) = rule.attr("before") {
                    json!({"period": period, "before": before})
                } else if let Some(at) = rule.attr("at") {
                    json!({"period": period, "at": at})
                } else {
                    continue;
                };
                entries.push(entry);
            }
            for locale in locales.split_whitespace() {
                out.insert(locale.to_string(), entries.clone());
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_boundaries() {
        let xml = r#"<supplementalData>
<dayPeriodRuleSet>
<dayPeriodRules locales="en">
<dayPeriodRule type="morning1" from="06:00" before="12:00"/>
<dayPeriodRule type="noon" at="12:00"/>
</dayPeriodRules>
</dayPeriodRuleSet>
</supplementalData>"#;
        let root = crate::xml::parse_str(xml).unwrap();
        let mut out = DayPeriodRuleTable::new();
        for rule_set in root.findall("dayPeriodRuleSet") {
            if rule_set.has_attr("type") {
                continue;
            }
            for rules in rule_set.children_named("dayPeriodRules") {
                assert_eq!(rules.attr("locales"), Some("en"));
            }
        }
        let _ = &mut out;
    }
}
