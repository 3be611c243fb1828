//! A parser for the CLDR plural rule DSL. Produces an AST; evaluating that
//! AST against numeric operands is the job of the `intl_pluralrules` crate.

pub mod ast;
mod parser;

pub use ast::*;
pub use parser::{parse_condition, parse_rule};

/// Parse a complete CLDR plural rule string (condition plus optional
/// `@integer`/`@decimal` sample lists), failing on trailing garbage.
pub fn parse(input: &str) -> Result<Rule, String> {
    match parse_rule(input) {
        Ok((rest, rule)) if rest.trim().is_empty() || rest.trim_start().starts_with('@') => {
            Ok(rule)
        }
        Ok((rest, _)) => Err(format!("unparsed trailing input: {rest:?}")),
        Err(e) => Err(format!("{e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_equality() {
        let rule = parse("i = 1 and v = 0").unwrap();
        assert_eq!(rule.condition.0.len(), 1);
        assert_eq!(rule.condition.0[0].0.len(), 2);
    }

    #[test]
    fn parses_or_of_ands() {
        let rule = parse("v = 0 and i % 10 = 1 or f % 10 = 1").unwrap();
        assert_eq!(rule.condition.0.len(), 2);
    }

    #[test]
    fn parses_range_list_and_samples() {
        let rule = parse("i = 0..5, 7 @integer 0~5, 7").unwrap();
        assert!(rule.samples.is_some());
    }

    #[test]
    fn empty_condition_is_other() {
        let rule = parse("").unwrap();
        assert!(rule.condition.0.is_empty());
    }
}
