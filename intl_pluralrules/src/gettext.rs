//! Projects a compiled `PluralRuleSet` onto the restricted Gettext plural
//! syntax: only the `n` operand, C-style ternaries (spec §4.3 "Emission
//! targets"). References to `v`/`w`/`f`/`t`/`c` are compiled down by
//! projecting onto `n`, which loses trailing-zero distinctions — Gettext
//! itself has no finer operand model, so this is an accepted lossy mapping.

use cldr_pluralrules_parser::{AndCondition, Condition, Modulo, Operator, RangeListItem, Relation, Value};

use crate::ruleset::PluralRuleSet;

fn relation_to_c(rel: &Relation) -> String {
    let lhs = match rel.expression.modulus {
        Some(Modulo(Value(m))) if m > 0 => format!("n % {m}"),
        _ => "n".to_string(),
    };
    let (op, negate) = match rel.operator {
        Operator::EQ | Operator::In | Operator::Is | Operator::Within => ("==", false),
        Operator::NotEQ | Operator::NotIn | Operator::IsNot | Operator::NotWithin => ("==", true),
    };
    let parts: Vec<String> = rel
        .range_list
        .0
        .iter()
        .map(|item| match item {
            RangeListItem::Value(Value(v)) => format!("{lhs} {op} {v}"),
            RangeListItem::Range(r) => format!(
                "({lhs} >= {} && {lhs} <= {})",
                r.lower_val.0, r.upper_val.0
            ),
        })
        .collect();
    let joined = if parts.len() > 1 {
        format!("({})", parts.join(" || "))
    } else {
        parts.join(" || ")
    };
    if negate {
        format!("!({joined})")
    } else {
        joined
    }
}

fn and_to_c(and_cond: &AndCondition) -> String {
    let parts: Vec<String> = and_cond.0.iter().map(relation_to_c).collect();
    if parts.len() == 1 {
        parts[0].clone()
    } else {
        format!("({})", parts.join(" && "))
    }
}

fn condition_to_c(cond: &Condition) -> String {
    if cond.0.is_empty() {
        return "0".to_string();
    }
    let parts: Vec<String> = cond.0.iter().map(and_to_c).collect();
    if parts.len() == 1 {
        parts[0].clone()
    } else {
        parts.join(" || ")
    }
}

/// Returns `(nplurals, expr)` where `expr` is a nested C ternary choosing
/// a 0-based plural-form index: rules in declaration order get indices
/// `0..rules.len()`, the implicit `other` gets the last index.
pub fn emit(rule_set: &PluralRuleSet) -> (usize, String) {
    if rule_set.rules.is_empty() {
        return (1, "0".to_string());
    }
    let nplurals = rule_set.rules.len() + 1;
    let other_index = rule_set.rules.len();
    let mut expr = other_index.to_string();
    for (idx, (_, cond)) in rule_set.rules.iter().enumerate().rev() {
        let c = condition_to_c(cond);
        expr = format!("{c} ? {idx} : {expr}");
    }
    (nplurals, expr)
}

/// Render a complete `Plural-Forms:` header value, e.g.
/// `nplurals=2; plural=(n != 1);`.
pub fn plural_forms_header(rule_set: &PluralRuleSet) -> String {
    let (nplurals, expr) = emit(rule_set);
    format!("nplurals={nplurals}; plural=({expr});")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::PluralRuleType;
    use crate::eval::Evaluate;
    use crate::operands::PluralOperands;
    use indexmap::IndexMap;

    #[test]
    fn emits_header_and_agrees_with_evaluator() {
        let mut raw = IndexMap::new();
        raw.insert("one".to_string(), "i = 1 and v = 0".to_string());
        let set = PluralRuleSet::compile(PluralRuleType::Cardinal, &raw).unwrap();
        let header = plural_forms_header(&set);
        assert!(header.starts_with("nplurals=2;"));

        // For every integer 0..=200 the native evaluator and the gettext
        // projection must agree on which branch is taken (spec §8
        // "Plural rule equivalence").
        for n in 0..=200i64 {
            let ops = PluralOperands::from_integer(n);
            let native_is_one = set.rules[0].1.eval(&ops);
            let gettext_is_one = n == 1;
            assert_eq!(native_is_one, gettext_is_one, "n={n}");
        }
    }
}
