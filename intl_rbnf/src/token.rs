//! Tokenizer for an RBNF rule body (spec §3 "RBNF ruleset", §4.7 "Rule
//! body execution"): literals, the four substitution forms, optional
//! groups, and the previous-rule back-reference.
//!
//! Substitution descriptors name what should format the substituted
//! value: empty for the current ruleset ("internal"), `%%name` for a
//! private ruleset, `%name` for a public one, or a leading `0`/`#` for a
//! decimal pattern fed straight to the number formatter.

use crate::error::RbnfError;

#[derive(Debug, Clone, PartialEq)]
pub enum Descriptor {
    CurrentRuleset,
    Ruleset(String),
    DecimalPattern(String),
}

impl Descriptor {
    fn parse(raw: &str) -> Descriptor {
        if raw.is_empty() {
            Descriptor::CurrentRuleset
        } else if raw.starts_with('0') || raw.starts_with('#') {
            Descriptor::DecimalPattern(raw.to_string())
        } else {
            Descriptor::Ruleset(raw.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralKeyword {
    Cardinal,
    Ordinal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Literal(String),
    /// `←…←`: value divided by the rule's divisor, formatted recursively.
    Quotient(Descriptor),
    /// `→…→`: value modulo the rule's divisor, formatted recursively.
    Remainder(Descriptor),
    /// `=…=`: the value itself, formatted via a named ruleset/pattern.
    SameValue(Descriptor),
    /// `→→→`: the remainder, formatted by the immediately preceding rule,
    /// bypassing this ruleset's normal rule selection.
    PreviousRule,
    /// `$(cardinal|ordinal,keyword{…}…)$`.
    Plural {
        keyword: PluralKeyword,
        branches: Vec<(String, Vec<Token>)>,
    },
    /// `[…]`: included only when the rule's divisor does not evenly
    /// divide the value (spec §4.7; see `intl_rbnf::interpreter` for the
    /// concrete-scenario-driven reading of this clause).
    Optional(Vec<Token>),
}

pub fn tokenize(body: &str) -> Result<Vec<Token>, RbnfError> {
    let chars: Vec<char> = body.chars().collect();
    let (tokens, consumed) = tokenize_run(&chars, 0, None)?;
    if consumed != chars.len() {
        return Err(RbnfError::Tokenization(body.to_string()));
    }
    Ok(tokens)
}

/// Tokenizes from `start` until either end of input or the matching
/// `terminator` (used for `[...]`, `{...}` bodies). Returns the tokens and
/// the index just past whatever was consumed, including the terminator.
fn tokenize_run(
    chars: &[char],
    start: usize,
    terminator: Option<char>,
) -> Result<(Vec<Token>, usize), RbnfError> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut i = start;

    while i < chars.len() {
        let c = chars[i];
        if terminator == Some(c) {
            flush(&mut literal, &mut tokens);
            return Ok((tokens, i + 1));
        }
        match c {
            '[' => {
                flush(&mut literal, &mut tokens);
                let (inner, next) = tokenize_run(chars, i + 1, Some(']'))?;
                tokens.push(Token::Optional(inner));
                i = next;
            }
            '←' => {
                flush(&mut literal, &mut tokens);
                let (descriptor, next) = scan_descriptor(chars, i + 1, '←')?;
                tokens.push(Token::Quotient(descriptor));
                i = next;
            }
            '→' if chars.get(i + 1) == Some(&'→') && chars.get(i + 2) == Some(&'→') => {
                flush(&mut literal, &mut tokens);
                tokens.push(Token::PreviousRule);
                i += 3;
            }
            '→' => {
                flush(&mut literal, &mut tokens);
                let (descriptor, next) = scan_descriptor(chars, i + 1, '→')?;
                tokens.push(Token::Remainder(descriptor));
                i = next;
            }
            '=' => {
                flush(&mut literal, &mut tokens);
                let (descriptor, next) = scan_descriptor(chars, i + 1, '=')?;
                tokens.push(Token::SameValue(descriptor));
                i = next;
            }
            '$' if chars.get(i + 1) == Some(&'(') => {
                flush(&mut literal, &mut tokens);
                let (plural, next) = scan_plural(chars, i + 2)?;
                tokens.push(plural);
                i = next;
            }
            '\'' if chars.get(i + 1) == Some(&'\'') => {
                literal.push('\'');
                i += 2;
            }
            '\'' => {
                i += 1;
                loop {
                    match chars.get(i) {
                        Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                            literal.push('\'');
                            i += 2;
                        }
                        Some('\'') => {
                            i += 1;
                            break;
                        }
                        Some(other) => {
                            literal.push(*other);
                            i += 1;
                        }
                        None => return Err(err(chars)),
                    }
                }
            }
            other => {
                literal.push(other);
                i += 1;
            }
        }
    }
    if terminator.is_some() {
        return Err(err(chars));
    }
    flush(&mut literal, &mut tokens);
    Ok((tokens, i))
}

fn flush(literal: &mut String, tokens: &mut Vec<Token>) {
    if !literal.is_empty() {
        tokens.push(Token::Literal(std::mem::take(literal)));
    }
}

fn err(chars: &[char]) -> RbnfError {
    RbnfError::Tokenization(chars.iter().collect())
}

fn scan_descriptor(
    chars: &[char],
    start: usize,
    delim: char,
) -> Result<(Descriptor, usize), RbnfError> {
    let mut i = start;
    let mut text = String::new();
    while i < chars.len() {
        if chars[i] == delim {
            return Ok((Descriptor::parse(&text), i + 1));
        }
        text.push(chars[i]);
        i += 1;
    }
    Err(err(chars))
}

fn scan_plural(chars: &[char], start: usize) -> Result<(Token, usize), RbnfError> {
    let mut i = start;
    let mut keyword_text = String::new();
    while i < chars.len() && chars[i] != ',' {
        keyword_text.push(chars[i]);
        i += 1;
    }
    let keyword = match keyword_text.as_str() {
        "cardinal" => PluralKeyword::Cardinal,
        "ordinal" => PluralKeyword::Ordinal,
        _ => return Err(err(chars)),
    };
    i += 1;
    let mut branches = Vec::new();
    loop {
        let mut category = String::new();
        while i < chars.len() && chars[i] != '{' {
            category.push(chars[i]);
            i += 1;
        }
        if i >= chars.len() {
            return Err(err(chars));
        }
        i += 1;
        let (inner, next) = tokenize_run(chars, i, Some('}'))?;
        branches.push((category, inner));
        i = next;
        if chars.get(i) == Some(&')') && chars.get(i + 1) == Some(&'$') {
            i += 2;
            break;
        }
        if i >= chars.len() {
            return Err(err(chars));
        }
    }
    Ok((Token::Plural { keyword, branches }, i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_only() {
        let tokens = tokenize("minus ").unwrap();
        assert_eq!(tokens, vec![Token::Literal("minus ".to_string())]);
    }

    #[test]
    fn quotient_and_remainder_with_optional() {
        let tokens = tokenize("←←hundred[ →→]").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Quotient(Descriptor::CurrentRuleset),
                Token::Literal("hundred".to_string()),
                Token::Optional(vec![
                    Token::Literal(" ".to_string()),
                    Token::Remainder(Descriptor::CurrentRuleset),
                ]),
            ]
        );
    }

    #[test]
    fn previous_rule_backreference() {
        let tokens = tokenize("and →→→").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Literal("and ".to_string()), Token::PreviousRule]
        );
    }

    #[test]
    fn named_public_and_private_descriptors() {
        let tokens = tokenize("←%spellout-cardinal-feminine← →%%and-two-digits→").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Quotient(Descriptor::Ruleset("%spellout-cardinal-feminine".to_string())),
                Token::Literal(" ".to_string()),
                Token::Remainder(Descriptor::Ruleset("%%and-two-digits".to_string())),
            ]
        );
    }

    #[test]
    fn decimal_pattern_descriptor() {
        let tokens = tokenize("=#,##0=").unwrap();
        assert_eq!(
            tokens,
            vec![Token::SameValue(Descriptor::DecimalPattern("#,##0".to_string()))]
        );
    }

    #[test]
    fn plural_substitution() {
        let tokens = tokenize("$(cardinal,one{year}other{years})$").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Plural {
                keyword: PluralKeyword::Cardinal,
                branches: vec![
                    ("one".to_string(), vec![Token::Literal("year".to_string())]),
                    ("other".to_string(), vec![Token::Literal("years".to_string())]),
                ],
            }]
        );
    }

    #[test]
    fn quoted_literal_apostrophe() {
        let tokens = tokenize("o''clock").unwrap();
        assert_eq!(tokens, vec![Token::Literal("o'clock".to_string())]);
    }
}
