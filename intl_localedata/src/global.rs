//! The global data file: tables enumerated in spec §3/§6 that are shared
//! across locales rather than owned by one (likely-subtags, zone aliases,
//! currency fractions, territory-language associations, parent-locale
//! exceptions, ...).

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::LocaleDataError;
use intl_locale::LocaleId;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TerritoryCurrency {
    pub code: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub tender: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CurrencyFraction {
    pub digits: u8,
    pub rounding: u32,
    pub cash_digits: u8,
    pub cash_rounding: u32,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TerritoryLanguage {
    pub language: String,
    pub population_percent: f64,
    pub official: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MetaZonePeriod {
    pub metazone: String,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct GlobalData {
    pub version: i64,
    #[serde(default)]
    pub likely_subtags: HashMap<String, String>,
    #[serde(default)]
    pub language_aliases: HashMap<String, String>,
    #[serde(default)]
    pub territory_aliases: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub script_aliases: HashMap<String, String>,
    #[serde(default)]
    pub variant_aliases: HashMap<String, String>,
    #[serde(default)]
    pub parent_exceptions: HashMap<String, String>,
    #[serde(default)]
    pub zone_aliases: HashMap<String, String>,
    #[serde(default)]
    pub zone_territories: HashMap<String, String>,
    #[serde(default)]
    pub windows_zone_mapping: HashMap<String, String>,
    #[serde(default)]
    pub meta_zones: HashMap<String, Vec<MetaZonePeriod>>,
    #[serde(default)]
    pub territory_currencies: HashMap<String, Vec<TerritoryCurrency>>,
    #[serde(default)]
    pub currency_fractions: HashMap<String, CurrencyFraction>,
    #[serde(default)]
    pub territory_languages: HashMap<String, Vec<TerritoryLanguage>>,
}

impl GlobalData {
    pub fn load(path: &Path) -> Result<GlobalData, LocaleDataError> {
        let text = std::fs::read_to_string(path)?;
        let data: GlobalData = serde_json::from_str(&text)?;
        Ok(data)
    }

    /// The parent locale id string for `id`, honoring `parent_exceptions`
    /// before falling back to the default "strip rightmost component" rule.
    /// Returns `None` when `id`'s parent is the `root` sentinel.
    pub fn parent_of(&self, id_str: &str, id: &LocaleId) -> Option<String> {
        if let Some(exception) = self.parent_exceptions.get(id_str) {
            return Some(exception.clone());
        }
        id.parent().map(|p| p.to_string())
    }

    pub fn canonicalize(&self, id: &LocaleId) -> LocaleId {
        id.canonicalize(
            &self.language_aliases,
            &self.territory_aliases,
            &self.script_aliases,
            &self.variant_aliases,
        )
    }

    pub fn expand(&self, id: &LocaleId) -> LocaleId {
        id.expand(&self.likely_subtags)
    }

    /// Select the currency valid for `territory` on `date` (an ISO-8601
    /// `YYYY-MM-DD` string, compared lexically which is safe for that
    /// format), preferring `tender = true` entries and, when two entries
    /// are both valid on that date, the first-listed one (see
    /// `SPEC_FULL.md` §4.6).
    pub fn territory_currency_on(&self, territory: &str, date: &str) -> Option<&str> {
        let entries = self.territory_currencies.get(territory)?;
        entries
            .iter()
            .filter(|c| c.tender)
            .find(|c| {
                let from_ok = c.from.as_deref().is_none_or(|from| from.as_str() <= date);
                let to_ok = c.to.as_deref().is_none_or(|to| date <= to.as_str());
                from_ok && to_ok
            })
            .map(|c| c.code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_exception_overrides_default() {
        let mut g = GlobalData::default();
        g.parent_exceptions
            .insert("zh_Hant_HK".to_string(), "zh_Hant".to_string());
        let id = LocaleId::parse("zh_Hant_HK", '_').unwrap();
        assert_eq!(g.parent_of("zh_Hant_HK", &id), Some("zh_Hant".to_string()));
    }

    #[test]
    fn default_parent_strips_rightmost() {
        let g = GlobalData::default();
        let id = LocaleId::parse("en_US", '_').unwrap();
        assert_eq!(g.parent_of("en_US", &id), Some("en".to_string()));
    }

    #[test]
    fn territory_currency_picks_latest_tender() {
        let mut g = GlobalData::default();
        g.territory_currencies.insert(
            "DE".to_string(),
            vec![
                TerritoryCurrency {
                    code: "DEM".into(),
                    from: None,
                    to: Some("1999-01-01".into()),
                    tender: true,
                },
                TerritoryCurrency {
                    code: "EUR".into(),
                    from: Some("1999-01-01".into()),
                    to: None,
                    tender: true,
                },
            ],
        );
        assert_eq!(g.territory_currency_on("DE", "2007-04-01"), Some("EUR"));
        assert_eq!(g.territory_currency_on("DE", "1990-01-01"), Some("DEM"));
    }
}
