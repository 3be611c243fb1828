//! A compiled, ordered set of CLDR plural rules for one locale and one
//! `PluralRuleType` (cardinal or ordinal).

use indexmap::IndexMap;
use thiserror::Error;

use cldr_pluralrules_parser::Condition;
use unic_langid::LanguageIdentifier;

use crate::category::{PluralCategory, PluralRuleType};
use crate::eval::Evaluate;
use crate::operands::PluralOperands;

#[derive(Debug, Error)]
pub enum PluralRuleError {
    #[error("could not parse plural rule for category {category:?}: {message}")]
    Syntax { category: String, message: String },
}

/// Rules in CLDR declaration order; `other` is never stored explicitly —
/// it is the implicit fallback spec §4.3 describes.
#[derive(Debug, Clone)]
pub struct PluralRuleSet {
    pub rule_type: PluralRuleType,
    pub rules: Vec<(PluralCategory, Condition)>,
}

impl PluralRuleSet {
    /// Compile a raw `category -> CLDR DSL string` map (as read from the
    /// locale data's `plural_form` / `ordinal_form` key) in the order it
    /// was declared.
    pub fn compile(
        rule_type: PluralRuleType,
        raw: &IndexMap<String, String>,
    ) -> Result<PluralRuleSet, PluralRuleError> {
        let mut rules = Vec::new();
        for (category_str, dsl) in raw {
            if category_str == "other" {
                continue;
            }
            let category = category_str
                .parse::<PluralCategory>()
                .map_err(|_| PluralRuleError::Syntax {
                    category: category_str.clone(),
                    message: "unknown plural category".to_string(),
                })?;
            let condition = cldr_pluralrules_parser::parse_condition(dsl)
                .map(|(_, c)| c)
                .map_err(|e| PluralRuleError::Syntax {
                    category: category_str.clone(),
                    message: e.to_string(),
                })?;
            rules.push((category, condition));
        }
        Ok(PluralRuleSet { rule_type, rules })
    }

    /// Evaluate in declaration order; the first matching category wins,
    /// `OTHER` otherwise.
    pub fn select(&self, ops: &PluralOperands) -> PluralCategory {
        for (category, condition) in &self.rules {
            if condition.eval(ops) {
                return *category;
            }
        }
        PluralCategory::OTHER
    }

    pub fn categories(&self) -> Vec<PluralCategory> {
        let mut cats: Vec<PluralCategory> = self.rules.iter().map(|(c, _)| *c).collect();
        cats.push(PluralCategory::OTHER);
        cats
    }
}

/// Convenience pairing of a locale with its compiled rule set, mirroring
/// the `(LanguageIdentifier, PluralRule)` table shape this crate has
/// historically exposed.
#[derive(Debug, Clone)]
pub struct PluralRules {
    pub locale: LanguageIdentifier,
    pub rule_set: PluralRuleSet,
}

impl PluralRules {
    pub fn select(&self, ops: &PluralOperands) -> PluralCategory {
        self.rule_set.select(ops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn english_cardinal() {
        let raw = rules(&[("one", "i = 1 and v = 0")]);
        let set = PluralRuleSet::compile(PluralRuleType::Cardinal, &raw).unwrap();
        assert_eq!(set.select(&PluralOperands::from_integer(1)), PluralCategory::ONE);
        assert_eq!(set.select(&PluralOperands::from_integer(2)), PluralCategory::OTHER);
    }

    #[test]
    fn russian_cardinal_one_few_many() {
        let raw = rules(&[
            ("one", "v = 0 and i % 10 = 1 and i % 100 != 11"),
            (
                "few",
                "v = 0 and i % 10 = 2..4 and i % 100 != 12..14",
            ),
            (
                "many",
                "v = 0 and i % 10 = 0 or v = 0 and i % 10 = 5..9 or v = 0 and i % 100 = 11..14",
            ),
        ]);
        let set = PluralRuleSet::compile(PluralRuleType::Cardinal, &raw).unwrap();
        assert_eq!(set.select(&PluralOperands::from_integer(21)), PluralCategory::ONE);
        assert_eq!(set.select(&PluralOperands::from_integer(22)), PluralCategory::FEW);
        assert_eq!(set.select(&PluralOperands::from_integer(5)), PluralCategory::MANY);
    }
}
