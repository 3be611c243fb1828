//! Public facade (component C9): one entry point over locale negotiation
//! (C1), compiled CLDR data (C2), plural rule selection (C3), number and
//! currency formatting (C4), date/time formatting (C5), currency/unit/list
//! composition (C6) and RBNF spellout (C7).
//!
//! Nothing here owns formatting logic of its own; it resolves a locale tag
//! to a [`LocaleData`] dictionary, compiles the handful of locale-scoped
//! objects (plural rule sets, number symbols, RBNF rulesets) once, and
//! hands calls through to the component that actually implements them.

pub mod error;

use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;

use intl_locale::{negotiate, LocaleId};
use intl_localedata::{GlobalData, LocaleData, LocaleDataStore};
use intl_numbers::{format_number as raw_format_number, parse_number, FormatOptions, Number, NumberPattern, NumberSymbols, ParseOptions};
use intl_pluralrules::{PluralCategory, PluralOperands, PluralRuleSet, PluralRuleType};
use intl_rbnf::{RbnfContext, RbnfRules, SpellOptions};

pub use intl_datetime::DateTimeFormatError;
pub use intl_format::{CurrencyFormatType, FormatError, UnitLength};
pub use intl_locale::LocaleError;
pub use intl_localedata::LocaleDataError;
pub use intl_numbers::{NumberFormatError, NumberParseError, PatternSyntaxError};
pub use intl_pluralrules::{PluralCategory, PluralRuleError, PluralRuleType};
pub use intl_rbnf::{RbnfError, SpellOptions};

use error::IntlError;

/// Number patterns a locale defines, each addressed by `NumberStyle` rather
/// than the raw `number_patterns.<key>` string (spec §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    Decimal,
    Percent,
    Scientific,
}

impl NumberStyle {
    fn key(self) -> &'static str {
        match self {
            NumberStyle::Decimal => "decimal",
            NumberStyle::Percent => "percent",
            NumberStyle::Scientific => "scientific",
        }
    }

    fn default_pattern(self) -> &'static str {
        match self {
            NumberStyle::Decimal => "#,##0.###",
            NumberStyle::Percent => "#,##0%",
            NumberStyle::Scientific => "#E0",
        }
    }
}

/// Process-wide handle onto a compiled CLDR tree: the locale data store
/// plus the global (locale-independent) alias and currency tables.
pub struct Intl {
    store: LocaleDataStore,
}

impl Intl {
    /// Open a compiled CLDR tree: `locale_dir` holds one `<id>.json` blob
    /// per locale (the `cldr_import` output directory), `global_path`
    /// points at its `_global.json` sibling.
    pub fn open(locale_dir: impl AsRef<Path>, global_path: impl AsRef<Path>) -> Result<Intl, IntlError> {
        let global = Arc::new(GlobalData::load(global_path.as_ref())?);
        let store = LocaleDataStore::from_dir(locale_dir, global);
        Ok(Intl { store })
    }

    pub fn global(&self) -> &GlobalData {
        self.store.global()
    }

    pub fn list_identifiers(&self) -> Vec<String> {
        self.store.list_identifiers()
    }

    /// Canonicalize `tag` (accepting either `-` or `_` separators) against
    /// the global alias tables, without likely-subtag expansion: CLDR's
    /// own locale ids are rarely fully maximized, so expanding here would
    /// make lookups miss files that already exist under their minimal form.
    pub fn canonicalize(&self, tag: &str) -> Result<String, IntlError> {
        let parsed = LocaleId::parse(tag, '-').or_else(|_| LocaleId::parse(tag, '_'))?;
        let global = self.global();
        let canonical = global.canonicalize(&parsed);
        Ok(canonical.to_string())
    }

    /// Pick the best available locale for a list of user preferences
    /// (spec §4.1 "negotiation"), falling back to `"root"` if none match.
    pub fn negotiate(&self, preferred: &[String]) -> String {
        let available = self.list_identifiers();
        negotiate(preferred, &available, '-').unwrap_or_else(|| "root".to_string())
    }

    /// Load and compile everything a `Formatter` needs for one locale.
    pub fn formatter(&self, locale_tag: &str) -> Result<Formatter<'_>, IntlError> {
        let canonical = self.canonicalize(locale_tag)?;
        let locale_data = self
            .store
            .load(&canonical)
            .map_err(|_| IntlError::UnknownLocale(locale_tag.to_string()))?;
        Formatter::new(self.global(), locale_data)
    }
}

/// A locale-scoped handle with every compiled per-locale object
/// (plural rule sets, number symbols, optional RBNF rulesets) built once
/// up front, so repeated formatting calls do no further locale-data work.
pub struct Formatter<'a> {
    global: &'a GlobalData,
    locale_data: Arc<LocaleData>,
    symbols: NumberSymbols,
    cardinal: PluralRuleSet,
    ordinal: PluralRuleSet,
    rbnf: Option<RbnfRules>,
}

impl<'a> Formatter<'a> {
    fn new(global: &'a GlobalData, locale_data: Arc<LocaleData>) -> Result<Formatter<'a>, IntlError> {
        let symbols = locale_data
            .get(&["symbols"])
            .map(|d| NumberSymbols::from_data(&d))
            .unwrap_or_default();

        let cardinal = compile_plural_rules(&locale_data, "plural_form", PluralRuleType::Cardinal)?;
        let ordinal = compile_plural_rules(&locale_data, "ordinal_form", PluralRuleType::Ordinal)?;
        let rbnf = RbnfRules::compile(&locale_data).ok();

        Ok(Formatter {
            global,
            locale_data,
            symbols,
            cardinal,
            ordinal,
            rbnf,
        })
    }

    pub fn locale_data(&self) -> &LocaleData {
        &self.locale_data
    }

    pub fn symbols(&self) -> &NumberSymbols {
        &self.symbols
    }

    fn number_pattern(&self, style: NumberStyle) -> Result<NumberPattern, IntlError> {
        let pattern_str = self
            .locale_data
            .get(&["number_patterns", style.key()])
            .ok()
            .and_then(|d| d.as_str().map(str::to_string))
            .unwrap_or_else(|| style.default_pattern().to_string());
        Ok(intl_numbers::parse_pattern(&pattern_str)?)
    }

    /// Render `value` through one of the locale's three number patterns
    /// (spec §4.4 "decimal / percent / scientific").
    pub fn format_number(&self, value: Decimal, style: NumberStyle) -> Result<String, IntlError> {
        let pattern = self.number_pattern(style)?;
        Ok(raw_format_number(
            &Number::Finite(value),
            &pattern,
            &self.symbols,
            &FormatOptions::default(),
        )?)
    }

    /// Parse locale-formatted input text back into an exact decimal
    /// (spec §4.4 "round-trip parsing").
    pub fn parse_number(&self, input: &str) -> Result<Decimal, IntlError> {
        let pattern = self.number_pattern(NumberStyle::Decimal)?;
        Ok(parse_number(input, &pattern, &self.symbols, ParseOptions::default())?)
    }

    /// Strict-mode parse (spec §4.4.3): rejects input whose group
    /// separators sit somewhere other than the pattern's legal grouping
    /// boundaries instead of silently tolerating them.
    pub fn parse_number_strict(&self, input: &str) -> Result<Decimal, IntlError> {
        let pattern = self.number_pattern(NumberStyle::Decimal)?;
        Ok(parse_number(input, &pattern, &self.symbols, ParseOptions { strict: true })?)
    }

    pub fn format_currency(&self, value: Decimal, code: &str, format_type: CurrencyFormatType) -> Result<String, IntlError> {
        Ok(intl_format::format_currency(
            value,
            code,
            format_type,
            &self.locale_data,
            self.global,
            &self.cardinal,
            &self.symbols,
        )?)
    }

    /// The territory's preferred tender currency on an ISO `YYYY-MM-DD`
    /// date (spec §4.6), or `None` when the territory has none on file.
    pub fn default_currency_for_territory(&self, territory: &str, date: &str) -> Option<&str> {
        intl_format::default_currency_for_territory(self.global, territory, date)
    }

    pub fn format_unit(&self, value: Decimal, unit_id: &str, length: UnitLength) -> Result<String, IntlError> {
        let pattern = self.number_pattern(NumberStyle::Decimal)?;
        Ok(intl_format::format_unit(
            value,
            unit_id,
            length,
            &self.locale_data,
            &self.cardinal,
            &pattern,
            &self.symbols,
        )?)
    }

    pub fn format_list(&self, items: &[String], style: &str) -> Result<String, IntlError> {
        Ok(intl_format::format_list(items, style, &self.locale_data)?)
    }

    /// Tokenizes `pattern` (spec §4.5 field table) and renders `dt`
    /// against it, delegating zone fields to `zone` when one is supplied.
    pub fn format_date(
        &self,
        pattern: &str,
        dt: &chrono::NaiveDateTime,
        zone: Option<&dyn intl_datetime::ZoneInfo>,
    ) -> Result<String, IntlError> {
        let tokens = intl_datetime::tokenize(pattern)?;
        let datetime_symbols = intl_datetime::DateTimeSymbols::from_locale_data(&self.locale_data);
        Ok(intl_datetime::format_tokens(&tokens, dt, &datetime_symbols, zone)?)
    }

    /// The CLDR cardinal category (spec §4.3) for `value`, with `v`/`f`
    /// operands read straight off the decimal's own scale.
    pub fn cardinal_category(&self, value: Decimal) -> PluralCategory {
        self.cardinal.select(&PluralOperands::from_decimal(value, 0))
    }

    pub fn ordinal_category(&self, value: Decimal) -> PluralCategory {
        self.ordinal.select(&PluralOperands::from_decimal(value, 0))
    }

    /// A Gettext `Plural-Forms:` header for this locale's cardinal or
    /// ordinal rule set (spec §4.3 "Emission targets").
    pub fn plural_forms_header(&self, rule_type: PluralRuleType) -> String {
        let rules = match rule_type {
            PluralRuleType::Cardinal => &self.cardinal,
            PluralRuleType::Ordinal => &self.ordinal,
        };
        intl_pluralrules::gettext::plural_forms_header(rules)
    }

    /// Spell `value` out as words via the locale's RBNF rulesets
    /// (spec §4.7), selecting the entry point per `opts`.
    pub fn spell(&self, value: Decimal, opts: SpellOptions) -> Result<String, IntlError> {
        let rbnf = self
            .rbnf
            .as_ref()
            .ok_or_else(|| IntlError::Rbnf(intl_rbnf::RbnfError::RulesetNotFound("spellout-numbering".to_string())))?;
        let ctx = RbnfContext {
            cardinal: &self.cardinal,
            ordinal: &self.ordinal,
            symbols: &self.symbols,
        };
        Ok(rbnf.spell(Number::Finite(value), opts, &ctx)?)
    }

    /// Spell `value` out using a specific named ruleset rather than the
    /// usual entry-point selection (e.g. `"spellout-cardinal-feminine"`).
    pub fn spell_named(&self, name: &str, value: Decimal) -> Result<String, IntlError> {
        let rbnf = self
            .rbnf
            .as_ref()
            .ok_or_else(|| IntlError::Rbnf(intl_rbnf::RbnfError::RulesetNotFound(name.to_string())))?;
        let ctx = RbnfContext {
            cardinal: &self.cardinal,
            ordinal: &self.ordinal,
            symbols: &self.symbols,
        };
        Ok(rbnf.format_named(name, Number::Finite(value), &ctx)?)
    }
}

fn compile_plural_rules(locale_data: &LocaleData, key: &str, rule_type: PluralRuleType) -> Result<PluralRuleSet, IntlError> {
    let mut raw = indexmap::IndexMap::new();
    if let Ok(data) = locale_data.get(&[key]) {
        if let Some(map) = data.as_map() {
            for (category, dsl) in map {
                if let Some(s) = dsl.as_str() {
                    raw.insert(category.clone(), s.to_string());
                }
            }
        }
    }
    Ok(PluralRuleSet::compile(rule_type, &raw)?)
}
