//! AST for the CLDR plural rule DSL (spec §4.3):
//!
//! ```text
//! rule     := relation (('and'|'or') relation)*
//! relation := operand ('is'|'is not'|'='|'!=') rangeList
//!           | operand ('in'|'not in'|'within'|'not within') rangeList
//! rangeList := range (',' range)*
//! range    := int | int '..' int
//! ```

/// A bare non-negative integer literal appearing in a range or modulus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Value(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub lower_val: Value,
    pub upper_val: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeListItem {
    Range(Range),
    Value(Value),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeList(pub Vec<RangeListItem>);

/// The six CLDR plural operands, plus the compact-decimal exponent (`c`,
/// aliased `e`) that the distilled grammar above does not parse but the
/// evaluator (in `intl_pluralrules`) still needs to represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    N,
    I,
    V,
    W,
    F,
    T,
    C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modulo(pub Value);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expression {
    pub operand: Operand,
    pub modulus: Option<Modulo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    EQ,
    NotEQ,
    Is,
    IsNot,
    In,
    NotIn,
    Within,
    NotWithin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub expression: Expression,
    pub operator: Operator,
    pub range_list: RangeList,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndCondition(pub Vec<Relation>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition(pub Vec<AndCondition>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalValue {
    pub integer: Value,
    pub decimal: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRange {
    pub lower_val: DecimalValue,
    pub upper_val: Option<DecimalValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleList {
    pub sample_ranges: Vec<SampleRange>,
    pub ellipsis: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Samples {
    pub integer: Option<SampleList>,
    pub decimal: Option<SampleList>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub condition: Condition,
    pub samples: Option<Samples>,
}
