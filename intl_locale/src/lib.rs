//! Locale identifier parsing, canonicalization, likely-subtag expansion and
//! negotiation (component C1).
//!
//! This crate is a leaf: it knows nothing about compiled locale data. Callers
//! that need alias tables or likely-subtag tables (both of which live in the
//! global data blob owned by `intl_localedata`) pass them in as plain maps.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use unic_langid::subtags;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
    #[error("invalid locale identifier: {0}")]
    InvalidIdentifier(String),
}

/// A parsed locale identifier: `{language, script?, territory?, variant?, modifier?}`.
///
/// Two identifiers are equivalent (via `PartialEq`) iff all four BCP47-style
/// components match; the `modifier` is compared too, matching the spec's
/// "comparison is case-sensitive after normalization" rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocaleId {
    pub language: subtags::Language,
    pub script: Option<subtags::Script>,
    pub territory: Option<subtags::Region>,
    pub variant: Option<subtags::Variant>,
    pub modifier: Option<String>,
}

impl LocaleId {
    pub fn new(language: subtags::Language) -> Self {
        LocaleId {
            language,
            script: None,
            territory: None,
            variant: None,
            modifier: None,
        }
    }

    /// Parse a locale identifier string, e.g. `zh_Hant_TW` or `de-DE` with
    /// `sep = '-'`. A `.charset@modifier` suffix is stripped from the
    /// trailing component per the spec (e.g. `de_DE.UTF-8@euro`).
    pub fn parse(id: &str, sep: char) -> Result<LocaleId, LocaleError> {
        let err = || LocaleError::InvalidIdentifier(id.to_string());

        let (body, modifier) = match id.find('@') {
            Some(idx) => (&id[..idx], Some(id[idx + 1..].to_string())),
            None => (id, None),
        };
        let body = match body.find('.') {
            Some(idx) => &body[..idx],
            None => body,
        };
        if body.is_empty() {
            return Err(err());
        }

        let mut parts = body.split(sep);
        let lang_raw = parts.next().ok_or_else(err)?;
        if !is_alpha(lang_raw) || !(2..=3).contains(&lang_raw.len()) {
            return Err(err());
        }
        let language =
            subtags::Language::from_str(&lang_raw.to_ascii_lowercase()).map_err(|_| err())?;

        let mut locale = LocaleId::new(language);
        locale.modifier = modifier;

        for part in parts {
            if part.is_empty() {
                return Err(err());
            }
            if part.len() == 4 && is_alpha(part) {
                locale.script =
                    Some(subtags::Script::from_str(&title_case(part)).map_err(|_| err())?);
            } else if (part.len() == 2 && is_alpha(part))
                || (part.len() == 3 && part.bytes().all(|b| b.is_ascii_digit()))
            {
                locale.territory =
                    Some(subtags::Region::from_str(&part.to_ascii_uppercase()).map_err(|_| err())?);
            } else if part.bytes().all(|b| b.is_ascii_alphanumeric()) {
                locale.variant =
                    Some(subtags::Variant::from_str(&part.to_ascii_uppercase()).map_err(|_| err())?);
            } else {
                return Err(err());
            }
        }

        Ok(locale)
    }

    /// Apply alias maps: `language_aliases`, `territory_aliases` (first
    /// element of the mapped value wins), `script_aliases`, `variant_aliases`.
    pub fn canonicalize(
        &self,
        language_aliases: &std::collections::HashMap<String, String>,
        territory_aliases: &std::collections::HashMap<String, Vec<String>>,
        script_aliases: &std::collections::HashMap<String, String>,
        variant_aliases: &std::collections::HashMap<String, String>,
    ) -> LocaleId {
        let mut out = self.clone();

        if let Some(repl) = language_aliases.get(out.language.as_str()) {
            if let Ok(replaced) = LocaleId::parse(repl, '_') {
                out.language = replaced.language;
                if out.script.is_none() {
                    out.script = replaced.script;
                }
                if out.territory.is_none() {
                    out.territory = replaced.territory;
                }
            }
        }
        if let Some(territory) = out.territory {
            if let Some(repls) = territory_aliases.get(territory.as_str()) {
                if let Some(first) = repls.first() {
                    if let Ok(region) = subtags::Region::from_str(&first.to_ascii_uppercase()) {
                        out.territory = Some(region);
                    }
                }
            }
        }
        if let Some(script) = out.script {
            if let Some(repl) = script_aliases.get(script.as_str()) {
                if let Ok(s) = subtags::Script::from_str(&title_case(repl)) {
                    out.script = Some(s);
                }
            }
        }
        if let Some(variant) = out.variant {
            if let Some(repl) = variant_aliases.get(variant.as_str()) {
                if let Ok(v) = subtags::Variant::from_str(&repl.to_ascii_uppercase()) {
                    out.variant = Some(v);
                }
            }
        }
        out
    }

    /// Expand an under-specified identifier using a `min_id -> max_id`
    /// likely-subtag lookup table, trying `lang_script_region`, `lang_region`,
    /// `lang_script`, `lang` in that order and taking the first match.
    pub fn expand(&self, likely_subtags: &std::collections::HashMap<String, String>) -> LocaleId {
        if self.script.is_some() && self.territory.is_some() {
            return self.clone();
        }

        let lang = self.language.as_str();
        let script = self.script.map(|s| s.as_str().to_string());
        let territory = self.territory.map(|t| t.as_str().to_string());

        let candidates: Vec<String> = match (&script, &territory) {
            (Some(s), Some(t)) => vec![format!("{lang}_{s}_{t}")],
            (Some(s), None) => vec![format!("{lang}_{s}")],
            (None, Some(t)) => vec![format!("{lang}_{t}"), format!("{lang}")],
            (None, None) => vec![format!("{lang}")],
        };

        for key in candidates {
            if let Some(max_id) = likely_subtags.get(&key) {
                if let Ok(expanded) = LocaleId::parse(max_id, '_') {
                    let mut out = expanded;
                    // Caller-supplied fields win over the expansion.
                    if self.territory.is_some() {
                        out.territory = self.territory;
                    }
                    if self.script.is_some() {
                        out.script = self.script;
                    }
                    out.variant = self.variant;
                    out.modifier = self.modifier.clone();
                    return out;
                }
            }
        }
        self.clone()
    }

    /// The default parent: the identifier with its rightmost component
    /// stripped, or `None` if this identifier has only a language (whose
    /// parent is the `root` sentinel, handled by the locale-data store).
    pub fn parent(&self) -> Option<LocaleId> {
        if self.variant.is_some() {
            let mut p = self.clone();
            p.variant = None;
            p.modifier = None;
            return Some(p);
        }
        if self.territory.is_some() {
            let mut p = self.clone();
            p.territory = None;
            p.modifier = None;
            return Some(p);
        }
        if self.script.is_some() {
            let mut p = self.clone();
            p.script = None;
            p.modifier = None;
            return Some(p);
        }
        None
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language.as_str())?;
        if let Some(script) = self.script {
            write!(f, "_{}", script.as_str())?;
        }
        if let Some(territory) = self.territory {
            write!(f, "_{}", territory.as_str())?;
        }
        if let Some(variant) = self.variant {
            write!(f, "_{}", variant.as_str())?;
        }
        Ok(())
    }
}

fn is_alpha(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => {
            first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
        }
        None => String::new(),
    }
}

/// `no` and `nb` are treated as mutually compatible for negotiation only,
/// matching a long-standing CLDR/Babel convention (Norwegian Bokmal vs the
/// generic Norwegian macrolanguage tag).
fn compatible(a: &str, b: &str) -> bool {
    if a.eq_ignore_ascii_case(b) {
        return true;
    }
    let pair = |x: &str, y: &str| {
        (x.eq_ignore_ascii_case("no") && y.eq_ignore_ascii_case("nb"))
            || (x.eq_ignore_ascii_case("nb") && y.eq_ignore_ascii_case("no"))
    };
    pair(a, b)
}

/// Return the first element of `preferred` that matches any element of
/// `available`, either exactly (case-insensitively) or after progressively
/// dropping rightmost components.
pub fn negotiate(preferred: &[String], available: &[String], sep: char) -> Option<String> {
    for want in preferred {
        let mut candidate = want.clone();
        loop {
            if available
                .iter()
                .any(|have| compatible(have, &candidate))
            {
                return Some(candidate);
            }
            match candidate.rfind(sep) {
                Some(idx) => candidate.truncate(idx),
                None => break,
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_identifiers() {
        let id = LocaleId::parse("en_US", '_').unwrap();
        assert_eq!(id.language.as_str(), "en");
        assert_eq!(id.territory.unwrap().as_str(), "US");
        assert_eq!(id.to_string(), "en_US");
    }

    #[test]
    fn parses_script_and_territory() {
        let id = LocaleId::parse("zh_Hant_TW", '_').unwrap();
        assert_eq!(id.script.unwrap().as_str(), "Hant");
        assert_eq!(id.territory.unwrap().as_str(), "TW");
    }

    #[test]
    fn strips_charset_and_modifier() {
        let id = LocaleId::parse("de_DE.UTF-8@euro", '_').unwrap();
        assert_eq!(id.territory.unwrap().as_str(), "DE");
        assert_eq!(id.modifier.as_deref(), Some("euro"));
    }

    #[test]
    fn rejects_bad_language() {
        assert!(LocaleId::parse("1de", '_').is_err());
    }

    #[test]
    fn parent_strips_rightmost_component() {
        let id = LocaleId::parse("zh_Hant_TW", '_').unwrap();
        let p = id.parent().unwrap();
        assert_eq!(p.to_string(), "zh_Hant");
        let p2 = p.parent().unwrap();
        assert_eq!(p2.to_string(), "zh");
        assert!(p2.parent().is_none());
    }

    #[test]
    fn negotiates_exact_then_fallback() {
        let preferred = vec!["de_DE".to_string(), "en_US".to_string()];
        let available = vec!["de_DE".to_string(), "de_AT".to_string()];
        assert_eq!(negotiate(&preferred, &available, '_'), Some("de_DE".into()));

        let preferred2 = vec!["de_DE".to_string(), "en_US".to_string()];
        let available2 = vec!["en".to_string(), "de".to_string()];
        assert_eq!(negotiate(&preferred2, &available2, '_'), Some("de".into()));
    }

    #[test]
    fn no_and_nb_are_compatible() {
        let preferred = vec!["no".to_string()];
        let available = vec!["nb".to_string()];
        assert_eq!(negotiate(&preferred, &available, '_'), Some("no".into()));
    }
}
