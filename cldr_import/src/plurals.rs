//! `common/supplemental/plurals.xml` / `ordinals.xml` → per-locale
//! plural-category rule tables.
//!
//! Ports `_extract_plural_rules` from
//! `examples/original_source/scripts/import_cldr.py`: each `<plurals>`
//! groups `<pluralRules locales="a b c">` elements, and each of those
//! groups several `<pluralRule count="...">` rule bodies that apply
//! identically to every locale in its space-separated `locales` list.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::ImportError;
use crate::xml::XmlNode;

/// locale id -> (plural category -> rule DSL text, in declaration order)
pub type PluralRuleTable = HashMap<String, IndexMap<String, String>>;

pub fn parse_plural_rules(path: &Path) -> Result<PluralRuleTable, ImportError> {
    let root = crate::xml::parse_file(path)?;
    let mut table = PluralRuleTable::new();
    for plurals in root.children_named("plurals") {
        collect_rule_groups(plurals, &mut table);
    }
    // A bare `<pluralRules>` document (not wrapped in `<plurals>`) is
    // also valid input — treat the root itself as the group container.
    if table.is_empty() {
        collect_rule_groups(&root, &mut table);
    }
    Ok(table)
}

fn collect_rule_groups(container: &XmlNode, table: &mut PluralRuleTable) {
    for group in container.children_named("pluralRules") {
        let Some(locales) = group.attr("locales") else { continue };
        let mut rules = IndexMap::new();
        for rule in group.children_named("pluralRule") {
            let Some(count) = rule.attr("count") else { continue };
            // Keep only the condition, dropping `@integer`/`@decimal`
            // sample annotations that follow a trailing `@`.
            let body = rule.full_text();
            let condition = body.split('@').next().unwrap_or("").trim().to_string();
            rules.insert(count.to_string(), condition);
        }
        for locale in locales.split_whitespace() {
            table.insert(locale.to_string(), rules.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grouped_rules() {
        let xml = r#"<supplementalData>
<plurals type="cardinal">
<pluralRules locales="en">
<pluralRule count="one">i = 1 and v = 0</pluralRule>
</pluralRules>
<pluralRules locales="ar">
<pluralRule count="zero">n = 0</pluralRule>
<pluralRule count="one">n = 1</pluralRule>
</pluralRules>
</plurals>
</supplementalData>"#;
        let root = crate::xml::parse_str(xml).unwrap();
        let mut table = PluralRuleTable::new();
        collect_rule_groups(root.child_named("plurals").unwrap(), &mut table);
        assert_eq!(table["en"]["one"], "i = 1 and v = 0");
        assert_eq!(table["ar"]["zero"], "n = 0");
        assert_eq!(table["ar"]["one"], "n = 1");
    }

    #[test]
    fn strips_sample_annotations() {
        let xml = r#"<supplementalData>
<plurals type="cardinal">
<pluralRules locales="en">
<pluralRule count="one">i = 1 and v = 0 @integer 1</pluralRule>
</pluralRules>
</plurals>
</supplementalData>"#;
        let root = crate::xml::parse_str(xml).unwrap();
        let mut table = PluralRuleTable::new();
        collect_rule_groups(root.child_named("plurals").unwrap(), &mut table);
        assert_eq!(table["en"]["one"], "i = 1 and v = 0");
    }
}
