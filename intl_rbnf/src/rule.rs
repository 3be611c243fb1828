//! A single RBNF rule: its base-value key (spec §3 "specials": `-x`,
//! `x.x`, `0.x`, `x.0`, `Inf`, `NaN`, or an integer/`base/radix` pair) and
//! its tokenized body.

use crate::error::RbnfError;
use crate::token::{tokenize, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseValue {
    Number(i64),
    Negative,
    ImproperFraction,
    ProperFraction,
    Master,
    Infinity,
    NotANumber,
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub base: BaseValue,
    pub radix: i64,
    pub tokens: Vec<Token>,
}

impl Rule {
    pub fn parse(key: &str, body: &str) -> Result<Rule, RbnfError> {
        let body = body.trim().trim_end_matches(';');
        let tokens = tokenize(body)?;
        let (base, radix) = parse_key(key)?;
        Ok(Rule { base, radix, tokens })
    }

    pub fn base_number(&self) -> i64 {
        match self.base {
            BaseValue::Number(n) => n,
            _ => 0,
        }
    }

    /// `radix ^ floor(log_radix(base))`, with divisor 1 for base <= 0
    /// (spec §4.7 "Divisor").
    pub fn divisor(&self) -> i64 {
        divisor_for(self.base_number(), self.radix)
    }

    /// True when the rule body both divides (`←`/quotient) and takes a
    /// remainder (`→`, `→→→`) — the shape the "rule exception" in spec
    /// §4.7 cares about. Looks inside optional groups and plural
    /// branches since the remainder substitution is typically itself
    /// wrapped in `[...]`.
    pub fn has_quotient_and_remainder(&self) -> bool {
        has_token(&self.tokens, &|t| matches!(t, Token::Quotient(_)))
            && has_token(&self.tokens, &|t| {
                matches!(t, Token::Remainder(_) | Token::PreviousRule)
            })
    }
}

fn has_token(tokens: &[Token], pred: &dyn Fn(&Token) -> bool) -> bool {
    tokens.iter().any(|t| {
        pred(t)
            || match t {
                Token::Optional(inner) => has_token(inner, pred),
                Token::Plural { branches, .. } => branches.iter().any(|(_, b)| has_token(b, pred)),
                _ => false,
            }
    })
}

pub fn divisor_for(base: i64, radix: i64) -> i64 {
    if base <= 0 || radix <= 1 {
        return 1;
    }
    let mut divisor = 1i64;
    let mut remaining = base;
    while remaining >= radix {
        remaining /= radix;
        divisor *= radix;
    }
    divisor
}

fn parse_key(key: &str) -> Result<(BaseValue, i64), RbnfError> {
    match key {
        "-x" => return Ok((BaseValue::Negative, 10)),
        "x.x" => return Ok((BaseValue::ImproperFraction, 10)),
        "0.x" => return Ok((BaseValue::ProperFraction, 10)),
        "x.0" => return Ok((BaseValue::Master, 10)),
        "Inf" => return Ok((BaseValue::Infinity, 10)),
        "NaN" => return Ok((BaseValue::NotANumber, 10)),
        _ => {}
    }
    if let Some((base_str, radix_str)) = key.split_once('/') {
        let base = base_str
            .parse::<i64>()
            .map_err(|_| RbnfError::Tokenization(key.to_string()))?;
        let radix = radix_str
            .parse::<i64>()
            .map_err(|_| RbnfError::Tokenization(key.to_string()))?;
        return Ok((BaseValue::Number(base), radix));
    }
    let base = key
        .parse::<i64>()
        .map_err(|_| RbnfError::Tokenization(key.to_string()))?;
    Ok((BaseValue::Number(base), 10))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divisor_matches_power_of_radix_below_base() {
        assert_eq!(divisor_for(123, 10), 100);
        assert_eq!(divisor_for(100, 10), 100);
        assert_eq!(divisor_for(9, 10), 1);
        assert_eq!(divisor_for(0, 10), 1);
    }

    #[test]
    fn parses_value_radix_key() {
        let rule = Rule::parse("1/20", "←←[-→→];").unwrap();
        assert_eq!(rule.base, BaseValue::Number(1));
        assert_eq!(rule.radix, 20);
    }

    #[test]
    fn parses_special_keys() {
        assert_eq!(Rule::parse("-x", "minus →→;").unwrap().base, BaseValue::Negative);
        assert_eq!(Rule::parse("x.x", "←←point→→;").unwrap().base, BaseValue::ImproperFraction);
    }
}
