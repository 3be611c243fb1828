//! `common/supplemental/*.xml` + `common/bcp47/timezone.xml` → the
//! shared, cross-locale `GlobalData` blob (`intl_localedata::GlobalData`).
//!
//! Ports the relevant sections of `parse_global()` in
//! `examples/original_source/scripts/import_cldr.py`, one source file at
//! a time; each section is independently optional (a CLDR checkout with
//! only a subset of `common/supplemental/` present still produces a
//! usable, if smaller, blob) since `#[serde(default)]` on every
//! `GlobalData` field tolerates missing keys.

use std::collections::HashMap;
use std::path::Path;

use serde_json::{json, Map, Value};

use crate::error::ImportError;
use crate::version::extract_version_from_file;
use crate::xml::XmlNode;

pub struct GlobalParse {
    pub data: Value,
    pub version: i64,
    /// `territoryContainment`, needed separately by `locale.rs`'s
    /// week-data resolution (not itself a `GlobalData` field).
    pub territory_containment: HashMap<String, Vec<String>>,
}

pub fn parse_global(supplemental_dir: &Path, bcp47_dir: &Path) -> Result<GlobalParse, ImportError> {
    let mut out = Map::new();
    let mut version = 0i64;

    let mut bump_version = |path: &Path| -> Result<(), ImportError> {
        let content = std::fs::read_to_string(path).map_err(|e| ImportError::Io(path.display().to_string(), e))?;
        if let Some(v) = extract_version_from_file(&content) {
            version = version.max(v);
        }
        Ok(())
    };

    let mut likely_subtags = Map::new();
    let likely_path = supplemental_dir.join("likelySubtags.xml");
    if likely_path.is_file() {
        bump_version(&likely_path)?;
        let root = crate::xml::parse_file(&likely_path)?;
        if let Some(container) = root.find("likelySubtags") {
            for entry in container.children_named("likelySubtag") {
                if let (Some(from), Some(to)) = (entry.attr("from"), entry.attr("to")) {
                    likely_subtags.insert(from.to_string(), json!(to));
                }
            }
        }
    }
    out.insert("likely_subtags".to_string(), Value::Object(likely_subtags));

    let mut language_aliases = Map::new();
    let mut territory_aliases = Map::new();
    let mut script_aliases = Map::new();
    let mut variant_aliases = Map::new();
    let metadata_path = supplemental_dir.join("supplementalMetadata.xml");
    if metadata_path.is_file() {
        bump_version(&metadata_path)?;
        let root = crate::xml::parse_file(&metadata_path)?;
        if let Some(alias) = root.find("alias") {
            for a in alias.children_named("languageAlias") {
                insert_alias_scalar(&mut language_aliases, a);
            }
            for a in alias.children_named("territoryAlias") {
                insert_alias_list(&mut territory_aliases, a);
            }
            for a in alias.children_named("scriptAlias") {
                insert_alias_scalar(&mut script_aliases, a);
            }
            for a in alias.children_named("variantAlias") {
                insert_alias_scalar(&mut variant_aliases, a);
            }
        }
    }
    out.insert("language_aliases".to_string(), Value::Object(language_aliases));
    out.insert("territory_aliases".to_string(), Value::Object(territory_aliases));
    out.insert("script_aliases".to_string(), Value::Object(script_aliases));
    out.insert("variant_aliases".to_string(), Value::Object(variant_aliases));

    let mut parent_exceptions = Map::new();
    let mut currency_fractions = Map::new();
    let mut territory_currencies = Map::new();
    let mut territory_languages = Map::new();
    let mut territory_containment = HashMap::new();
    let data_path = supplemental_dir.join("supplementalData.xml");
    if data_path.is_file() {
        bump_version(&data_path)?;
        let root = crate::xml::parse_file(&data_path)?;

        if let Some(parent_locales) = root.find("parentLocales") {
            for group in parent_locales.children_named("parentLocale") {
                let Some(parent) = group.attr("parent") else { continue };
                if let Some(locales) = group.attr("locales") {
                    for locale in locales.split_whitespace() {
                        parent_exceptions.insert(locale.to_string(), json!(parent));
                    }
                }
            }
        }

        if let Some(currency_data) = root.find("currencyData") {
            if let Some(fractions) = currency_data.child_named("fractions") {
                for info in fractions.children_named("info") {
                    let Some(code) = info.attr("iso4217") else { continue };
                    let digits = attr_u8(info, "digits", 2);
                    let rounding = attr_u32(info, "rounding", 0);
                    let cash_digits = attr_u8(info, "cashDigits", digits);
                    let cash_rounding = attr_u32(info, "cashRounding", rounding);
                    currency_fractions.insert(
                        code.to_string(),
                        json!({
                            "digits": digits,
                            "rounding": rounding,
                            "cash_digits": cash_digits,
                            "cash_rounding": cash_rounding,
                        }),
                    );
                }
            }
            for region in currency_data.children_named("region") {
                let Some(territory) = region.attr("iso3166") else { continue };
                let mut entries = Vec::new();
                for currency in region.children_named("currency") {
                    let Some(code) = currency.attr("iso4217") else { continue };
                    entries.push(json!({
                        "code": code,
                        "from": currency.attr("from"),
                        "to": currency.attr("to"),
                        "tender": currency.attr("tender") != Some("false"),
                    }));
                }
                territory_currencies.insert(territory.to_string(), Value::Array(entries));
            }
        }

        if let Some(containment) = root.find("territoryContainment") {
            for group in containment.children_named("group") {
                let (Some(parent), Some(contains)) = (group.attr("type"), group.attr("contains")) else {
                    continue;
                };
                territory_containment.insert(
                    parent.to_string(),
                    contains.split_whitespace().map(str::to_string).collect(),
                );
            }
        }

        if let Some(territory_info) = root.find("territoryInfo") {
            for territory in territory_info.children_named("territory") {
                let Some(code) = territory.attr("type") else { continue };
                let mut langs = Vec::new();
                for lang in territory.children_named("languagePopulation") {
                    let Some(language) = lang.attr("type") else { continue };
                    langs.push(json!({
                        "language": language,
                        "population_percent": lang.attr("populationPercent").and_then(|s| s.parse::<f64>().ok()).unwrap_or(0.0),
                        "official": matches!(lang.attr("officialStatus"), Some("official") | Some("de_facto_official")),
                    }));
                }
                if !langs.is_empty() {
                    territory_languages.insert(code.to_string(), Value::Array(langs));
                }
            }
        }
    }
    out.insert("parent_exceptions".to_string(), Value::Object(parent_exceptions));
    out.insert("currency_fractions".to_string(), Value::Object(currency_fractions));
    out.insert("territory_currencies".to_string(), Value::Object(territory_currencies));
    out.insert("territory_languages".to_string(), Value::Object(territory_languages));

    let mut meta_zones = Map::new();
    let mut zone_territories = Map::new();
    let meta_zones_path = supplemental_dir.join("metaZones.xml");
    if meta_zones_path.is_file() {
        bump_version(&meta_zones_path)?;
        let root = crate::xml::parse_file(&meta_zones_path)?;
        if let Some(info) = root.find("metaZones") {
            if let Some(map_timezones) = info.child_named("mapTimezones") {
                for map_zone in map_timezones.children_named("mapZone") {
                    let (Some(tzid), Some(metazone)) = (map_zone.attr("type"), map_zone.attr("other")) else {
                        continue;
                    };
                    let territory = map_zone.attr("territory").unwrap_or("001");
                    if territory == "001" {
                        zone_territories.entry(tzid.to_string()).or_insert_with(|| json!(territory));
                    } else {
                        zone_territories.insert(tzid.to_string(), json!(territory));
                    }
                    let entry = json!({
                        "metazone": metazone,
                        "from": map_zone.attr("from"),
                        "to": map_zone.attr("to"),
                    });
                    meta_zones
                        .entry(tzid.to_string())
                        .or_insert_with(|| Value::Array(Vec::new()))
                        .as_array_mut()
                        .expect("inserted as array")
                        .push(entry);
                }
            }
        }
    }

    let mut windows_zone_mapping = Map::new();
    let windows_zones_path = supplemental_dir.join("windowsZones.xml");
    if windows_zones_path.is_file() {
        bump_version(&windows_zones_path)?;
        let root = crate::xml::parse_file(&windows_zones_path)?;
        if let Some(info) = root.find("windowsZones") {
            if let Some(map_timezones) = info.child_named("mapTimezones") {
                for map_zone in map_timezones.children_named("mapZone") {
                    if map_zone.attr("territory") != Some("001") {
                        continue;
                    }
                    let (Some(windows_name), Some(tzid)) = (map_zone.attr("other"), map_zone.attr("type")) else {
                        continue;
                    };
                    // `type` may list several space-separated IANA ids; the
                    // first is the canonical representative.
                    let canonical = tzid.split_whitespace().next().unwrap_or(tzid);
                    windows_zone_mapping.insert(windows_name.to_string(), json!(canonical));
                }
            }
        }
    }
    out.insert("windows_zone_mapping".to_string(), Value::Object(windows_zone_mapping));

    let mut zone_aliases = Map::new();
    let timezone_path = bcp47_dir.join("timezone.xml");
    if timezone_path.is_file() {
        bump_version(&timezone_path)?;
        let root = crate::xml::parse_file(&timezone_path)?;
        if let Some(keyword) = root.find("keyword") {
            for key in keyword.children_named("key") {
                if key.attr("name") != Some("tz") {
                    continue;
                }
                for ty in key.children_named("type") {
                    let Some(names) = ty.attr("alias") else { continue };
                    let mut parts = names.split_whitespace();
                    let Some(canonical) = parts.next() else { continue };
                    for alias in parts {
                        zone_aliases.insert(alias.to_string(), json!(canonical));
                    }
                }
            }
        }
    }
    out.insert("zone_aliases".to_string(), Value::Object(zone_aliases));
    out.insert("meta_zones".to_string(), Value::Object(meta_zones));
    out.insert("zone_territories".to_string(), Value::Object(zone_territories));
    out.insert("version".to_string(), json!(version));

    Ok(GlobalParse { data: Value::Object(out), version, territory_containment })
}

fn insert_alias_scalar(map: &mut Map<String, Value>, node: &XmlNode) {
    if let (Some(ty), Some(replacement)) = (node.attr("type"), node.attr("replacement")) {
        // Multiple replacements separated by space: keep the first, as
        // the original importer does for language/script/variant aliases.
        let first = replacement.split_whitespace().next().unwrap_or(replacement);
        for ty in ty.split_whitespace() {
            map.insert(ty.to_string(), json!(first));
        }
    }
}

fn insert_alias_list(map: &mut Map<String, Value>, node: &XmlNode) {
    if let (Some(ty), Some(replacement)) = (node.attr("type"), node.attr("replacement")) {
        let list: Vec<Value> = replacement.split_whitespace().map(|s| json!(s)).collect();
        for ty in ty.split_whitespace() {
            map.insert(ty.to_string(), Value::Array(list.clone()));
        }
    }
}

fn attr_u8(node: &XmlNode, name: &str, default: u8) -> u8 {
    node.attr(name).and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn attr_u32(node: &XmlNode, name: &str, default: u32) -> u32 {
    node.attr(name).and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// `common/supplemental/numberingSystems.xml` → numbering system id
/// (`"latn"`, `"arab"`, ...) -> its ten decimal digits, for `type="numeric"`
/// systems only (algorithmic systems like `"roman"` are out of scope, per
/// the spec's non-goal on algorithmic numbering — see `DESIGN.md`).
pub fn parse_numbering_systems(supplemental_dir: &Path) -> Result<HashMap<String, String>, ImportError> {
    let mut out = HashMap::new();
    let path = supplemental_dir.join("numberingSystems.xml");
    if !path.is_file() {
        return Ok(out);
    }
    let root = crate::xml::parse_file(&path)?;
    if let Some(container) = root.find("numberingSystems") {
        for system in container.children_named("numberingSystem") {
            if system.attr("type") != Some("numeric") {
                continue;
            }
            let (Some(id), Some(digits)) = (system.attr("id"), system.attr("digits")) else { continue };
            out.insert(id.to_string(), digits.to_string());
        }
    }
    Ok(out)
}
