//! `common/rbnf/<locale>.xml` → per-locale, per-ruleset rule tables
//! consumed by `intl_rbnf::RuleSet::compile`.
//!
//! CLDR's RBNF files group rulesets under a `<rulesetGrouping type="…">`
//! (SpelloutRules / OrdinalRules / NumberingSystemRules), but the
//! grouping itself carries no information intl_rbnf needs — rule bodies
//! only ever get looked up by ruleset name (e.g.
//! `spellout-numbering`, `spellout-cardinal-masculine`,
//! `digits-ordinal`), so groupings are flattened away here, the same
//! way `examples/original_source/babel/rbnf.py`'s rule-set lookups
//! ignore grouping and work on ruleset name alone.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::ImportError;

/// ruleset name -> (rule key -> rule body), in declaration order
pub type RulesetTable = IndexMap<String, IndexMap<String, String>>;

pub fn parse_rbnf_dir(dir: &Path) -> Result<HashMap<String, RulesetTable>, ImportError> {
    let mut out = HashMap::new();
    if !dir.is_dir() {
        return Ok(out);
    }
    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| ImportError::Io(dir.display().to_string(), e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension() == Some(OsStr::new("xml")))
        .collect();
    entries.sort();

    for path in entries {
        let locale_id = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
        let root = crate::xml::parse_file(&path)?;
        let Some(rbnf) = root.find("rbnf") else { continue };
        let mut rulesets = RulesetTable::new();
        for grouping in rbnf.children_named("rulesetGrouping") {
            for ruleset in grouping.children_named("ruleset") {
                let Some(name) = ruleset.attr("type") else { continue };
                let mut rules = IndexMap::new();
                for rule in ruleset.children_named("rbnfrule") {
                    let Some(value) = rule.attr("value") else { continue };
                    rules.insert(value.to_string(), rule.full_text());
                }
                rulesets.insert(name.to_string(), rules);
            }
        }
        if !rulesets.is_empty() {
            out.insert(locale_id, rulesets);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_groupings_by_ruleset_name() {
        let xml = r#"<ldml>
<identity><language type="en"/></identity>
<rbnf>
<rulesetGrouping type="SpelloutRules">
<ruleset type="spellout-numbering">
<rbnfrule value="0">zero;</rbnfrule>
<rbnfrule value="1">one;</rbnfrule>
</ruleset>
</rulesetGrouping>
<rulesetGrouping type="OrdinalRules">
<ruleset type="digits-ordinal">
<rbnfrule value="0">=#,##0=th;</rbnfrule>
</ruleset>
</rulesetGrouping>
</rbnf>
</ldml>"#;
        let root = crate::xml::parse_str(xml).unwrap();
        let rbnf = root.find("rbnf").unwrap();
        let mut rulesets = RulesetTable::new();
        for grouping in rbnf.children_named("rulesetGrouping") {
            for ruleset in grouping.children_named("ruleset") {
                let name = ruleset.attr("type").unwrap();
                let mut rules = IndexMap::new();
                for rule in ruleset.children_named("rbnfrule") {
                    rules.insert(rule.attr("value").unwrap().to_string(), rule.full_text());
                }
                rulesets.insert(name.to_string(), rules);
            }
        }
        assert_eq!(rulesets["spellout-numbering"]["1"], "one;");
        assert_eq!(rulesets["digits-ordinal"]["0"], "=#,##0=th;");
    }
}
