//! A single RBNF ruleset: an ordered list of numbered rules plus the
//! special rules keyed by base-value marker (spec §3 "RBNF ruleset").

use indexmap::IndexMap;

use crate::rule::{BaseValue, Rule};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSetKind {
    /// Used for the integer part of a value; rules are keyed by base
    /// value and picked by the binary-search-plus-exception rule.
    Normal,
    /// Used recursively for the fractional part; rules are keyed by
    /// candidate denominator and picked by the closest-match rule.
    Fraction,
}

#[derive(Debug, Clone)]
pub struct RuleSet {
    pub name: String,
    pub kind: RuleSetKind,
    /// Numbered rules, sorted ascending by base value.
    pub rules: Vec<Rule>,
    pub negative: Option<Rule>,
    pub improper_fraction: Option<Rule>,
    pub proper_fraction: Option<Rule>,
    pub master: Option<Rule>,
    pub infinity: Option<Rule>,
    pub nan: Option<Rule>,
}

impl RuleSet {
    /// Compiles every rule in `raw` (declaration order, see
    /// `SPEC_FULL.md`'s note on `indexmap`/`preserve_order` wiring);
    /// per spec §9's open question on undocumented RBNF syntax, a rule
    /// body that fails to tokenize is logged and skipped rather than
    /// failing the whole ruleset.
    pub fn compile(name: &str, raw: &IndexMap<String, String>) -> RuleSet {
        let mut numbered = Vec::new();
        let mut negative = None;
        let mut improper_fraction = None;
        let mut proper_fraction = None;
        let mut master = None;
        let mut infinity = None;
        let mut nan = None;
        for (key, body) in raw {
            match Rule::parse(key, body) {
                Ok(rule) => match rule.base {
                    BaseValue::Number(_) => numbered.push(rule),
                    BaseValue::Negative => negative = Some(rule),
                    BaseValue::ImproperFraction => improper_fraction = Some(rule),
                    BaseValue::ProperFraction => proper_fraction = Some(rule),
                    BaseValue::Master => master = Some(rule),
                    BaseValue::Infinity => infinity = Some(rule),
                    BaseValue::NotANumber => nan = Some(rule),
                },
                Err(err) => {
                    log::warn!("skipping unparseable rbnf rule {name}:{key:?}: {err}");
                }
            }
        }
        numbered.sort_by_key(Rule::base_number);
        let kind = if name.contains("fraction") {
            RuleSetKind::Fraction
        } else {
            RuleSetKind::Normal
        };
        RuleSet {
            name: name.to_string(),
            kind,
            rules: numbered,
            negative,
            improper_fraction,
            proper_fraction,
            master,
            infinity,
            nan,
        }
    }

    /// Binary search for the rule whose base value is the greatest `<=
    /// value`; falls back to the preceding rule per the exception in
    /// spec §4.7 (two substitutions, base not a multiple of its own
    /// divisor, value *is* a multiple of that divisor).
    pub fn select_numbered(&self, value: i64) -> Option<&Rule> {
        let idx = self.rules.partition_point(|r| r.base_number() <= value);
        if idx == 0 {
            return None;
        }
        let mut idx = idx - 1;
        let rule = &self.rules[idx];
        if rule.has_quotient_and_remainder() {
            let divisor = rule.divisor();
            if rule.base_number() % divisor != 0 && value % divisor == 0 && idx > 0 {
                idx -= 1;
            }
        }
        Some(&self.rules[idx])
    }

    /// The rule declared immediately before `rule` in this ruleset,
    /// backing the `→→→` previous-rule back-reference.
    pub fn rule_before(&self, rule: &Rule) -> Option<&Rule> {
        let idx = self.rules.iter().position(|r| std::ptr::eq(r, rule))?;
        if idx == 0 {
            None
        } else {
            Some(&self.rules[idx - 1])
        }
    }

    /// Fraction-ruleset rule selection (spec §4.7): minimize
    /// `|round(value*base) - value*base|` over numbered rules (`base` is
    /// the candidate denominator), tie-breaking toward the later rule
    /// as long as its numerator isn't 1 (CLDR uses this to pick the
    /// plural-friendly surface form rather than freezing on the first
    /// exact match).
    pub fn select_fraction(&self, value: f64) -> Option<&Rule> {
        let mut best_idx = None;
        let mut best_diff = f64::INFINITY;
        for (idx, rule) in self.rules.iter().enumerate() {
            let base = rule.base_number() as f64;
            let candidate = value * base;
            let numerator = candidate.round();
            let diff = (numerator - candidate).abs();
            if diff < best_diff || (diff == best_diff && numerator != 1.0) {
                best_diff = diff;
                best_idx = Some(idx);
            }
        }
        best_idx.map(|idx| &self.rules[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn selects_greatest_base_leq_value() {
        let rs = RuleSet::compile(
            "spellout-numbering",
            &raw(&[
                ("0", "zero;"),
                ("1", "one;"),
                ("20", "twenty[-→→];"),
                ("100", "←←hundred[ →→];"),
            ]),
        );
        assert_eq!(rs.select_numbered(0).unwrap().base_number(), 0);
        assert_eq!(rs.select_numbered(23).unwrap().base_number(), 20);
        assert_eq!(rs.select_numbered(123).unwrap().base_number(), 100);
    }

    #[test]
    fn clean_multiple_base_never_falls_back() {
        let rs = RuleSet::compile(
            "spellout-numbering",
            &raw(&[("0", "zero;"), ("1", "one;"), ("100", "←←hundred[ →→];")]),
        );
        // 100's base (100) is a clean multiple of its own divisor (100),
        // so the spec §4.7 exception never triggers here.
        assert_eq!(rs.select_numbered(150).unwrap().base_number(), 100);
    }

    #[test]
    fn uneven_base_falls_back_to_preceding_rule_on_exact_multiple() {
        // 101's divisor is still 100 (radix^floor(log10(101))), but 101
        // isn't a multiple of 100; a value that *is* an exact multiple
        // of 100 (e.g. 200) should therefore resolve via the 1 rule's
        // successor chain rather than land on the ill-fitting 101 rule.
        let rs = RuleSet::compile(
            "spellout-numbering",
            &raw(&[
                ("1", "one;"),
                ("101", "←←oneoh-one[ →→];"),
            ]),
        );
        assert_eq!(rs.select_numbered(200).unwrap().base_number(), 1);
    }
}
