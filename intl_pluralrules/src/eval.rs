//! Evaluates a `cldr_pluralrules_parser` AST against `PluralOperands`,
//! returning a bool per relation/and-condition/condition (spec §4.3
//! "Evaluator").

use cldr_pluralrules_parser::{
    AndCondition, Condition, Operand, Operator, Range, RangeList, RangeListItem, Relation, Value,
};

use crate::operands::PluralOperands;

fn operand_value(operand: Operand, ops: &PluralOperands) -> f64 {
    match operand {
        Operand::N => ops.n,
        Operand::I => ops.i as f64,
        Operand::V => ops.v as f64,
        Operand::W => ops.w as f64,
        Operand::F => ops.f as f64,
        Operand::T => ops.t as f64,
        Operand::C => ops.c as f64,
    }
}

fn integer_membership(value: f64, list: &RangeList) -> bool {
    if value.fract() != 0.0 {
        return false;
    }
    let v = value as i64;
    list.0.iter().any(|item| match item {
        RangeListItem::Value(Value(x)) => v == *x as i64,
        RangeListItem::Range(Range {
            lower_val: Value(l),
            upper_val: Value(u),
        }) => v >= *l as i64 && v <= *u as i64,
    })
}

fn within_membership(value: f64, list: &RangeList) -> bool {
    list.0.iter().any(|item| match item {
        RangeListItem::Value(Value(x)) => value == *x as f64,
        RangeListItem::Range(Range {
            lower_val: Value(l),
            upper_val: Value(u),
        }) => value >= *l as f64 && value <= *u as f64,
    })
}

pub trait Evaluate {
    fn eval(&self, ops: &PluralOperands) -> bool;
}

impl Evaluate for Relation {
    fn eval(&self, ops: &PluralOperands) -> bool {
        let raw = operand_value(self.expression.operand, ops);
        let value = match self.expression.modulus {
            Some(cldr_pluralrules_parser::Modulo(Value(m))) if m > 0 => raw % (m as f64),
            _ => raw,
        };
        match self.operator {
            Operator::EQ | Operator::In | Operator::Is => integer_membership(value, &self.range_list),
            Operator::NotEQ | Operator::NotIn | Operator::IsNot => {
                !integer_membership(value, &self.range_list)
            }
            Operator::Within => within_membership(value, &self.range_list),
            Operator::NotWithin => !within_membership(value, &self.range_list),
        }
    }
}

impl Evaluate for AndCondition {
    fn eval(&self, ops: &PluralOperands) -> bool {
        self.0.iter().all(|r| r.eval(ops))
    }
}

impl Evaluate for Condition {
    fn eval(&self, ops: &PluralOperands) -> bool {
        !self.0.is_empty() && self.0.iter().any(|and_cond| and_cond.eval(ops))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operands::PluralOperands;

    #[test]
    fn one_is_one_and_v_is_zero() {
        let cond = cldr_pluralrules_parser::parse_condition("i = 1 and v = 0")
            .unwrap()
            .1;
        assert!(cond.eval(&PluralOperands::from_integer(1)));
        assert!(!cond.eval(&PluralOperands::from_integer(2)));
    }

    #[test]
    fn modulus_and_ranges() {
        let cond = cldr_pluralrules_parser::parse_condition("n % 10 = 2..4 and n % 100 != 12..14")
            .unwrap()
            .1;
        assert!(cond.eval(&PluralOperands::from_integer(2)));
        assert!(!cond.eval(&PluralOperands::from_integer(12)));
        assert!(!cond.eval(&PluralOperands::from_integer(5)));
    }

    #[test]
    fn empty_condition_never_matches() {
        let cond = cldr_pluralrules_parser::parse_condition("").unwrap().1;
        assert!(!cond.eval(&PluralOperands::from_integer(1)));
    }
}
