//! Rule-based number format interpreter (component C7): tokenizes the
//! ICU/CLDR spellout DSL and evaluates it by recursive ruleset descent,
//! delegating plural-category selection to `intl_pluralrules` and
//! decimal-pattern substitutions to `intl_numbers`.

pub mod error;
pub mod interpreter;
pub mod rule;
pub mod ruleset;
pub mod token;

pub use error::RbnfError;
pub use interpreter::{RbnfContext, RbnfRules, SpellOptions};
pub use rule::{BaseValue, Rule};
pub use ruleset::{RuleSet, RuleSetKind};
pub use token::{tokenize, Descriptor, PluralKeyword, Token};

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use intl_numbers::{Number, NumberSymbols};
    use intl_pluralrules::{PluralRuleSet, PluralRuleType};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn english_rules() -> RbnfRules {
        let ones = [
            ("0", "zero"),
            ("1", "one"),
            ("2", "two"),
            ("3", "three"),
            ("4", "four"),
            ("5", "five"),
            ("6", "six"),
            ("7", "seven"),
            ("8", "eight"),
            ("9", "nine"),
            ("10", "ten"),
            ("11", "eleven"),
            ("12", "twelve"),
            ("13", "thirteen"),
            ("14", "fourteen"),
            ("15", "fifteen"),
            ("16", "sixteen"),
            ("17", "seventeen"),
            ("18", "eighteen"),
            ("19", "nineteen"),
            ("20", "twenty[-→→]"),
            ("30", "thirty[-→→]"),
            ("40", "forty[-→→]"),
            ("50", "fifty[-→→]"),
            ("60", "sixty[-→→]"),
            ("70", "seventy[-→→]"),
            ("80", "eighty[-→→]"),
            ("90", "ninety[-→→]"),
            ("100", "←← hundred[ →→]"),
            ("1000", "←← thousand[ →→]"),
            ("1000000", "←← million[ →→]"),
        ];
        let mut raw: IndexMap<String, String> = ones
            .iter()
            .map(|(k, v)| (k.to_string(), format!("{v};")))
            .collect();
        raw.insert("-x".to_string(), "minus →→;".to_string());
        raw.insert("x.x".to_string(), "←← point →→;".to_string());

        let mut ordinal_raw: IndexMap<String, String> = ones
            .iter()
            .map(|(k, v)| (k.to_string(), format!("{v};")))
            .collect();
        ordinal_raw.insert("1".to_string(), "first;".to_string());
        ordinal_raw.insert("2".to_string(), "second;".to_string());
        ordinal_raw.insert("3".to_string(), "third;".to_string());
        ordinal_raw.insert("20".to_string(), "twentieth;".to_string());
        ordinal_raw.insert("23".to_string(), "twenty-third;".to_string());

        let mut rulesets = IndexMap::new();
        rulesets.insert(
            "spellout-numbering".to_string(),
            RuleSet::compile("spellout-numbering", &raw),
        );
        rulesets.insert(
            "spellout-ordinal".to_string(),
            RuleSet::compile("spellout-ordinal", &ordinal_raw),
        );
        RbnfRules::from_rulesets(rulesets)
    }

    fn english_cardinal_plurals() -> PluralRuleSet {
        let mut raw = IndexMap::new();
        raw.insert("one".to_string(), "i = 1 and v = 0".to_string());
        PluralRuleSet::compile(PluralRuleType::Cardinal, &raw).unwrap()
    }

    #[test]
    fn spells_one_hundred_twenty_three() {
        let rules = english_rules();
        let cardinal = english_cardinal_plurals();
        let ordinal = english_cardinal_plurals();
        let symbols = NumberSymbols::default();
        let ctx = RbnfContext {
            cardinal: &cardinal,
            ordinal: &ordinal,
            symbols: &symbols,
        };
        let text = rules
            .spell(
                Number::Finite(Decimal::from_str("123").unwrap()),
                SpellOptions::default(),
                &ctx,
            )
            .unwrap();
        assert_eq!(text, "one hundred twenty-three");
    }

    #[test]
    fn even_hundred_omits_optional_remainder() {
        let rules = english_rules();
        let cardinal = english_cardinal_plurals();
        let ordinal = english_cardinal_plurals();
        let symbols = NumberSymbols::default();
        let ctx = RbnfContext {
            cardinal: &cardinal,
            ordinal: &ordinal,
            symbols: &symbols,
        };
        let text = rules
            .spell(
                Number::Finite(Decimal::from_str("200").unwrap()),
                SpellOptions::default(),
                &ctx,
            )
            .unwrap();
        assert_eq!(text, "two hundred");
    }

    #[test]
    fn negative_values_use_the_dash_x_rule() {
        let rules = english_rules();
        let cardinal = english_cardinal_plurals();
        let ordinal = english_cardinal_plurals();
        let symbols = NumberSymbols::default();
        let ctx = RbnfContext {
            cardinal: &cardinal,
            ordinal: &ordinal,
            symbols: &symbols,
        };
        let text = rules
            .spell(
                Number::Finite(Decimal::from_str("-5").unwrap()),
                SpellOptions::default(),
                &ctx,
            )
            .unwrap();
        assert_eq!(text, "minus five");
    }

    #[test]
    fn ordinal_entry_point_uses_ordinal_ruleset() {
        let rules = english_rules();
        let cardinal = english_cardinal_plurals();
        let ordinal = english_cardinal_plurals();
        let symbols = NumberSymbols::default();
        let ctx = RbnfContext {
            cardinal: &cardinal,
            ordinal: &ordinal,
            symbols: &symbols,
        };
        let text = rules
            .spell(
                Number::Finite(Decimal::from_str("23").unwrap()),
                SpellOptions { ordinal: true, year: false },
                &ctx,
            )
            .unwrap();
        assert_eq!(text, "twenty-third");
    }

    #[test]
    fn ordinal_and_year_together_is_an_error() {
        let rules = english_rules();
        let opts = SpellOptions { ordinal: true, year: true };
        assert!(matches!(rules.entry_point(opts), Err(RbnfError::ConflictingEntryPoint)));
    }

    #[test]
    fn unknown_entry_point_surfaces_ruleset_not_found() {
        let rules = english_rules();
        let cardinal = english_cardinal_plurals();
        let ordinal = english_cardinal_plurals();
        let symbols = NumberSymbols::default();
        let ctx = RbnfContext {
            cardinal: &cardinal,
            ordinal: &ordinal,
            symbols: &symbols,
        };
        let err = rules
            .format_named("spellout-numbering-year", Number::Finite(Decimal::from(2000)), &ctx)
            .unwrap_err();
        assert!(matches!(err, RbnfError::RulesetNotFound(_)));
    }
}
