//! The dynamic-typed locale data tree: a tagged union with `Map`, `Seq`,
//! `Str`, `Int`, `Pattern`, `PluralRule`, `Alias` and `NoInherit` variants
//! (see `SPEC_FULL.md` §9 "Dynamic-typed dictionaries → tagged union").

use indexmap::IndexMap;

/// Reserved key under which an `Alias` can sit *alongside* literal sibling
/// entries in the same map node (see `resolve_node` in `store.rs`). A bare
/// alias with no siblings is instead represented directly as `Data::Alias`.
pub const ALIAS_MARKER_KEY: &str = "$alias";

/// The sentinel JSON string that decodes to `Data::NoInherit`.
pub const NO_INHERIT_SENTINEL: &str = "$no-inherit";

#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    Str(String),
    Int(i64),
    /// A parsed-but-not-yet-interpreted CLDR pattern string (number, date,
    /// or skeleton pattern). Interpretation happens in `intl_numbers` /
    /// `intl_datetime`; this crate never parses pattern syntax.
    Pattern(String),
    /// A raw CLDR plural-rule DSL string (`n = 1` etc), interpreted by
    /// `cldr_pluralrules_parser` / `intl_pluralrules`.
    PluralRule(String),
    Seq(Vec<Data>),
    Map(IndexMap<String, Data>),
    /// Redirects lookups to another path, possibly within the same locale.
    Alias(Vec<String>),
    /// "Treat this key as absent even though a parent defines it." Must
    /// never leak into end-user output; `merge` deletes the key entirely
    /// when it sees this on the child side.
    NoInherit,
}

impl Data {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Data::Str(s) | Data::Pattern(s) | Data::PluralRule(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Data::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Data>> {
        match self {
            Data::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Data]> {
        match self {
            Data::Seq(s) => Some(s),
            _ => None,
        }
    }

    pub fn from_json(value: serde_json::Value) -> Data {
        use serde_json::Value;
        match value {
            Value::Null => Data::NoInherit,
            Value::Bool(b) => Data::Str(b.to_string()),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Data::Int(i)
                } else {
                    Data::Str(n.to_string())
                }
            }
            Value::String(s) if s == NO_INHERIT_SENTINEL => Data::NoInherit,
            Value::String(s) => Data::Str(s),
            Value::Array(items) => Data::Seq(items.into_iter().map(Data::from_json).collect()),
            Value::Object(map) => {
                if let Some(Value::Array(path)) = map.get("$alias") {
                    let alias_path: Vec<String> = path
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect();
                    if map.len() == 1 {
                        return Data::Alias(alias_path);
                    }
                    let mut out = IndexMap::new();
                    out.insert(
                        ALIAS_MARKER_KEY.to_string(),
                        Data::Alias(alias_path),
                    );
                    for (k, v) in map {
                        if k == "$alias" {
                            continue;
                        }
                        out.insert(k, Data::from_json(v));
                    }
                    return Data::Map(out);
                }
                let mut out = IndexMap::new();
                for (k, v) in map {
                    out.insert(k, Data::from_json(v));
                }
                Data::Map(out)
            }
        }
    }
}

/// Deep-merge `child` into `parent`: for each key in `child`, if both
/// values are maps recurse; else `child`'s value replaces `parent`'s. A
/// `Data::NoInherit` on the child side deletes the key.
pub fn merge(parent: &Data, child: &Data) -> Data {
    match (parent, child) {
        (Data::Map(p), Data::Map(c)) => {
            let mut out = p.clone();
            for (key, child_value) in c {
                match child_value {
                    Data::NoInherit => {
                        out.shift_remove(key);
                    }
                    _ => {
                        let merged = match out.get(key) {
                            Some(parent_value) => merge(parent_value, child_value),
                            None => child_value.clone(),
                        };
                        out.insert(key.clone(), merged);
                    }
                }
            }
            Data::Map(out)
        }
        (_, Data::NoInherit) => Data::NoInherit,
        (_, child_value) => child_value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_child_wins_on_scalars() {
        let parent = Data::Str("parent".into());
        let child = Data::Str("child".into());
        assert_eq!(merge(&parent, &child), Data::Str("child".into()));
    }

    #[test]
    fn merge_recurses_into_maps() {
        let mut p = IndexMap::new();
        p.insert("a".to_string(), Data::Str("1".into()));
        p.insert("b".to_string(), Data::Str("2".into()));
        let mut c = IndexMap::new();
        c.insert("b".to_string(), Data::Str("override".into()));
        let merged = merge(&Data::Map(p), &Data::Map(c));
        let m = merged.as_map().unwrap();
        assert_eq!(m.get("a").unwrap().as_str(), Some("1"));
        assert_eq!(m.get("b").unwrap().as_str(), Some("override"));
    }

    #[test]
    fn no_inherit_deletes_key() {
        let mut p = IndexMap::new();
        p.insert("a".to_string(), Data::Str("1".into()));
        let mut c = IndexMap::new();
        c.insert("a".to_string(), Data::NoInherit);
        let merged = merge(&Data::Map(p), &Data::Map(c));
        assert!(merged.as_map().unwrap().get("a").is_none());
    }

    #[test]
    fn from_json_detects_bare_alias() {
        let v: serde_json::Value = serde_json::json!({"$alias": ["months", "format"]});
        match Data::from_json(v) {
            Data::Alias(p) => assert_eq!(p, vec!["months".to_string(), "format".to_string()]),
            other => panic!("expected alias, got {other:?}"),
        }
    }

    #[test]
    fn from_json_keeps_alias_siblings() {
        let v: serde_json::Value =
            serde_json::json!({"$alias": ["months", "format"], "wide": {"1": "Jan"}});
        let data = Data::from_json(v);
        let m = data.as_map().unwrap();
        assert!(matches!(m.get(ALIAS_MARKER_KEY), Some(Data::Alias(_))));
        assert!(m.get("wide").is_some());
    }
}
