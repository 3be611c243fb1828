//! Entry-point selection and recursive rule-body execution (spec §4.7
//! "RBNF interpreter"): the part that actually walks a rule's tokens and
//! produces text.

use indexmap::IndexMap;
use rust_decimal::Decimal;

use intl_localedata::{LocaleData, LocaleDataError};
use intl_numbers::{Number, NumberSymbols};
use intl_pluralrules::{PluralOperands, PluralRuleSet};

use crate::error::RbnfError;
use crate::rule::Rule;
use crate::ruleset::{RuleSet, RuleSetKind};
use crate::token::{Descriptor, PluralKeyword, Token};

/// The plural rule sets and number symbols a ruleset's substitutions may
/// need (cardinal/ordinal for `$(…)$`, symbols for bare decimal-pattern
/// substitutions like `=#,##0=`).
pub struct RbnfContext<'a> {
    pub cardinal: &'a PluralRuleSet,
    pub ordinal: &'a PluralRuleSet,
    pub symbols: &'a NumberSymbols,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SpellOptions {
    pub ordinal: bool,
    pub year: bool,
}

/// All the rulesets compiled for one locale (spec §3 "RBNF ruleset" /
/// §6 "Locale data file format" — `rbnf_rules`).
pub struct RbnfRules {
    rulesets: IndexMap<String, RuleSet>,
}

impl RbnfRules {
    /// Compiles every ruleset under the locale's `rbnf_rules` key.
    /// Ruleset names are stored without their leading `%`/`%%` marker;
    /// the marker only matters for disambiguating *references* to
    /// public vs. private rulesets at parse time, not for storage.
    pub fn compile(locale_data: &LocaleData) -> Result<RbnfRules, LocaleDataError> {
        let root = locale_data.get(&["rbnf_rules"])?;
        let mut rulesets = IndexMap::new();
        if let Some(map) = root.as_map() {
            for (name, rules_data) in map {
                let Some(rules_map) = rules_data.as_map() else {
                    continue;
                };
                let mut raw = IndexMap::new();
                for (key, body) in rules_map {
                    if let Some(s) = body.as_str() {
                        raw.insert(key.clone(), s.to_string());
                    }
                }
                let stored_name = name.trim_start_matches('%').to_string();
                rulesets.insert(stored_name.clone(), RuleSet::compile(&stored_name, &raw));
            }
        }
        Ok(RbnfRules { rulesets })
    }

    /// Builds a rule table directly from already-compiled rulesets,
    /// bypassing `LocaleData`. Used by tests that exercise the
    /// interpreter against a small hand-written rule table.
    pub fn from_rulesets(rulesets: IndexMap<String, RuleSet>) -> RbnfRules {
        RbnfRules { rulesets }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rulesets.contains_key(name.trim_start_matches('%'))
    }

    fn lookup(&self, raw: &str) -> Result<&RuleSet, RbnfError> {
        let key = raw.trim_start_matches('%');
        self.rulesets
            .get(key)
            .ok_or_else(|| RbnfError::RulesetNotFound(raw.to_string()))
    }

    /// Entry-point selection per spec §4.7: `spellout-numbering` by
    /// default, `spellout-ordinal` (or the first `spellout-ordinal-*`,
    /// with a warning) when `ordinal`, `spellout-numbering-year` when
    /// `year`. Requesting both is an error.
    pub fn entry_point(&self, opts: SpellOptions) -> Result<&str, RbnfError> {
        if opts.ordinal && opts.year {
            return Err(RbnfError::ConflictingEntryPoint);
        }
        if opts.year {
            return Ok("spellout-numbering-year");
        }
        if opts.ordinal {
            if self.rulesets.contains_key("spellout-ordinal") {
                return Ok("spellout-ordinal");
            }
            if let Some(name) = self
                .rulesets
                .keys()
                .find(|k| k.starts_with("spellout-ordinal-"))
            {
                log::warn!("locale has no `spellout-ordinal` ruleset, falling back to {name:?}");
                return Ok(name.as_str());
            }
            return Err(RbnfError::RulesetNotFound("spellout-ordinal".to_string()));
        }
        Ok("spellout-numbering")
    }

    pub fn spell(
        &self,
        value: Number,
        opts: SpellOptions,
        ctx: &RbnfContext,
    ) -> Result<String, RbnfError> {
        let entry = self.entry_point(opts)?.to_string();
        self.format_named(&entry, value, ctx)
    }

    pub fn format_named(
        &self,
        name: &str,
        value: Number,
        ctx: &RbnfContext,
    ) -> Result<String, RbnfError> {
        let ruleset = self.lookup(name)?;
        match value {
            Number::NaN => {
                let rule = ruleset
                    .nan
                    .as_ref()
                    .ok_or_else(|| RbnfError::RuleNotFound(ruleset.name.clone()))?;
                self.execute(rule, ruleset, Decimal::ZERO, ctx)
            }
            Number::Infinity { .. } => {
                let rule = ruleset
                    .infinity
                    .as_ref()
                    .ok_or_else(|| RbnfError::RuleNotFound(ruleset.name.clone()))?;
                self.execute(rule, ruleset, Decimal::ZERO, ctx)
            }
            Number::Finite(decimal) => self.format_value_in(ruleset, decimal, ctx),
        }
    }

    fn format_value_in(
        &self,
        ruleset: &RuleSet,
        value: Decimal,
        ctx: &RbnfContext,
    ) -> Result<String, RbnfError> {
        match ruleset.kind {
            RuleSetKind::Fraction => self.format_fraction(ruleset, value, ctx),
            RuleSetKind::Normal => self.format_normal(ruleset, value, ctx),
        }
    }

    fn format_normal(
        &self,
        ruleset: &RuleSet,
        value: Decimal,
        ctx: &RbnfContext,
    ) -> Result<String, RbnfError> {
        let value = if value.is_sign_negative() && !value.is_zero() {
            if let Some(rule) = &ruleset.negative {
                return self.execute(rule, ruleset, value.abs(), ctx);
            }
            value.abs()
        } else {
            value
        };
        if !value.fract().is_zero() {
            let int_part = value.trunc();
            if int_part.is_zero() {
                if let Some(rule) = &ruleset.proper_fraction {
                    return self.execute(rule, ruleset, value, ctx);
                }
            } else if let Some(rule) = &ruleset.improper_fraction {
                return self.execute(rule, ruleset, value, ctx);
            }
        }
        let int_value: i64 = value
            .trunc()
            .to_string()
            .parse()
            .map_err(|_| RbnfError::RuleNotFound(ruleset.name.clone()))?;
        let rule = ruleset
            .select_numbered(int_value)
            .ok_or_else(|| RbnfError::RuleNotFound(ruleset.name.clone()))?;
        self.execute(rule, ruleset, value, ctx)
    }

    fn format_fraction(
        &self,
        ruleset: &RuleSet,
        value: Decimal,
        ctx: &RbnfContext,
    ) -> Result<String, RbnfError> {
        let as_f64: f64 = value.to_string().parse().unwrap_or(0.0);
        let rule = ruleset
            .select_fraction(as_f64)
            .ok_or_else(|| RbnfError::RuleNotFound(ruleset.name.clone()))?;
        self.execute(rule, ruleset, value, ctx)
    }

    fn execute(
        &self,
        rule: &Rule,
        ruleset: &RuleSet,
        value: Decimal,
        ctx: &RbnfContext,
    ) -> Result<String, RbnfError> {
        let mode = SubMode::for_rule(rule);
        let prev_rule = ruleset.rule_before(rule);
        let mut out = String::new();
        self.execute_tokens(&rule.tokens, ruleset, value, &mode, prev_rule, ctx, &mut out)?;
        Ok(out)
    }

    #[allow(clippy::too_many_arguments)]
    fn execute_tokens(
        &self,
        tokens: &[Token],
        ruleset: &RuleSet,
        value: Decimal,
        mode: &SubMode,
        prev_rule: Option<&Rule>,
        ctx: &RbnfContext,
        out: &mut String,
    ) -> Result<(), RbnfError> {
        for token in tokens {
            match token {
                Token::Literal(s) => out.push_str(s),
                Token::Optional(inner) => {
                    // Spec §4.7 frames this as "process contents only if
                    // the rule's divisor evenly divides the value"; the
                    // concrete scenario in spec §8 (`123` -> "one hundred
                    // twenty-three") only holds if the optional remainder
                    // text is included when the divisor does *not* evenly
                    // divide the value (a nonzero remainder to express),
                    // so that reading governs here.
                    let include = match mode {
                        SubMode::Divisor(divisor) => !(value % *divisor).is_zero(),
                        _ => true,
                    };
                    if include {
                        self.execute_tokens(inner, ruleset, value, mode, prev_rule, ctx, out)?;
                    }
                }
                Token::Quotient(descriptor) => {
                    let quotient = mode.quotient(value);
                    let text = self.format_descriptor(descriptor, ruleset, quotient, ctx)?;
                    out.push_str(&text);
                }
                Token::Remainder(descriptor) => match mode {
                    SubMode::FractionParts => {
                        out.push_str(&self.format_fraction_digits(descriptor, ruleset, value, ctx)?);
                    }
                    _ => {
                        let remainder = mode.remainder(value);
                        out.push_str(&self.format_descriptor(descriptor, ruleset, remainder, ctx)?);
                    }
                },
                Token::SameValue(descriptor) => {
                    out.push_str(&self.format_descriptor(descriptor, ruleset, value, ctx)?);
                }
                Token::PreviousRule => {
                    let remainder = mode.remainder(value);
                    let rule = prev_rule.ok_or_else(|| RbnfError::RuleNotFound(ruleset.name.clone()))?;
                    out.push_str(&self.execute(rule, ruleset, remainder, ctx)?);
                }
                Token::Plural { keyword, branches } => {
                    let projected = mode.quotient(value);
                    let category = self.plural_category(*keyword, projected, ctx);
                    let branch = branches
                        .iter()
                        .find(|(cat, _)| cat == category)
                        .or_else(|| branches.iter().find(|(cat, _)| cat == "other"))
                        .ok_or_else(|| RbnfError::RuleNotFound(ruleset.name.clone()))?;
                    self.execute_tokens(&branch.1, ruleset, value, mode, prev_rule, ctx, out)?;
                }
            }
        }
        Ok(())
    }

    fn plural_category(&self, keyword: PluralKeyword, value: Decimal, ctx: &RbnfContext) -> &'static str {
        let operands = PluralOperands::from_decimal(value, 0);
        let rules = match keyword {
            PluralKeyword::Cardinal => ctx.cardinal,
            PluralKeyword::Ordinal => ctx.ordinal,
        };
        rules.select(&operands).as_str()
    }

    fn format_descriptor(
        &self,
        descriptor: &Descriptor,
        current: &RuleSet,
        value: Decimal,
        ctx: &RbnfContext,
    ) -> Result<String, RbnfError> {
        match descriptor {
            Descriptor::CurrentRuleset => self.format_value_in(current, value, ctx),
            Descriptor::Ruleset(name) => {
                let target = self.lookup(name)?;
                self.format_value_in(target, value, ctx)
            }
            Descriptor::DecimalPattern(pattern_str) => self.format_decimal_pattern(pattern_str, value, ctx),
        }
    }

    fn format_decimal_pattern(
        &self,
        pattern_str: &str,
        value: Decimal,
        ctx: &RbnfContext,
    ) -> Result<String, RbnfError> {
        let pattern = intl_numbers::parse_pattern(pattern_str)?;
        let text = intl_numbers::format_number(
            &Number::Finite(value),
            &pattern,
            ctx.symbols,
            &intl_numbers::FormatOptions::default(),
        )?;
        Ok(text)
    }

    /// Formats the fractional digits of `value` one at a time through
    /// `descriptor` (CLDR's convention for `x.x`/`0.x` remainder
    /// substitutions: "point one four", not "point fourteen"), unless
    /// the descriptor names a decimal pattern, in which case the digits
    /// are rendered as a single number.
    fn format_fraction_digits(
        &self,
        descriptor: &Descriptor,
        current: &RuleSet,
        value: Decimal,
        ctx: &RbnfContext,
    ) -> Result<String, RbnfError> {
        let text = value.to_string();
        let frac = text.split_once('.').map(|(_, f)| f).unwrap_or("");
        if let Descriptor::DecimalPattern(pattern_str) = descriptor {
            let frac_value: Decimal = format!("0.{frac}").parse().unwrap_or(Decimal::ZERO);
            let scale = Decimal::from(10u64.pow(frac.len() as u32));
            return self.format_decimal_pattern(pattern_str, frac_value * scale, ctx);
        }
        let mut parts = Vec::new();
        for ch in frac.chars() {
            let digit_value = Decimal::from(ch.to_digit(10).unwrap_or(0));
            parts.push(self.format_descriptor(descriptor, current, digit_value, ctx)?);
        }
        Ok(parts.join(" "))
    }
}

/// What a rule's `←`/`→` substitutions mean, which varies by the kind of
/// base value the rule was declared under (spec §4.7).
enum SubMode {
    /// Numbered rule: quotient = value / divisor, remainder = value % divisor.
    Divisor(Decimal),
    /// `-x`: both substitutions stand for the whole (already-absolute) value.
    WholeValue,
    /// `x.x` / `0.x` / `x.0`: quotient is the integer part; the remainder
    /// substitution is handled separately, digit by digit.
    FractionParts,
}

impl SubMode {
    fn for_rule(rule: &Rule) -> SubMode {
        use crate::rule::BaseValue;
        match rule.base {
            BaseValue::Negative => SubMode::WholeValue,
            BaseValue::ImproperFraction | BaseValue::ProperFraction | BaseValue::Master => {
                SubMode::FractionParts
            }
            _ => SubMode::Divisor(Decimal::from(rule.divisor())),
        }
    }

    fn quotient(&self, value: Decimal) -> Decimal {
        match self {
            SubMode::Divisor(d) => (value / *d).trunc(),
            SubMode::WholeValue => value,
            SubMode::FractionParts => value.trunc(),
        }
    }

    fn remainder(&self, value: Decimal) -> Decimal {
        match self {
            SubMode::Divisor(d) => value % *d,
            SubMode::WholeValue => value,
            SubMode::FractionParts => value.fract(),
        }
    }
}
