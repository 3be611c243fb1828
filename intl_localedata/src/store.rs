//! The locale-data store (C2): loads compiled per-locale blobs, computes
//! parent chains, merges them child-wins, and resolves aliases on lookup.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::LocaleDataError;
use crate::global::GlobalData;
use crate::value::{merge, Data, ALIAS_MARKER_KEY};
use intl_locale::LocaleId;

/// A single locale's fully merged, read-only dictionary.
#[derive(Debug, Clone)]
pub struct LocaleData {
    root: Data,
}

impl LocaleData {
    pub fn new(root: Data) -> Self {
        LocaleData { root }
    }

    /// Traverse `path`, transparently following any `Alias` encountered
    /// along the way (bounded by cycle detection) and merging resolved
    /// alias content *under* any sibling entries already present at that
    /// node, per spec §4.2.
    pub fn get(&self, path: &[&str]) -> Result<Data, LocaleDataError> {
        self.get_with_visited(&self.root, path, &mut Vec::new())
    }

    fn get_with_visited(
        &self,
        root: &Data,
        path: &[&str],
        visited: &mut Vec<Vec<String>>,
    ) -> Result<Data, LocaleDataError> {
        let mut current = root.clone();
        for key in path {
            current = self.resolve_node(current, visited)?;
            let next = match &current {
                Data::Map(m) => m.get(*key).cloned(),
                _ => None,
            };
            current = next.ok_or_else(|| {
                LocaleDataError::Missing(path.iter().map(|s| s.to_string()).collect())
            })?;
        }
        self.resolve_node(current, visited)
    }

    fn resolve_node(&self, node: Data, visited: &mut Vec<Vec<String>>) -> Result<Data, LocaleDataError> {
        match node {
            Data::Alias(path) => {
                if visited.contains(&path) {
                    return Err(LocaleDataError::MalformedData(format!(
                        "alias cycle at {path:?}"
                    )));
                }
                visited.push(path.clone());
                let refs: Vec<&str> = path.iter().map(String::as_str).collect();
                let root = self.root.clone();
                self.get_with_visited(&root, &refs, visited)
            }
            Data::Map(mut m) => {
                if let Some(Data::Alias(path)) = m.shift_remove(ALIAS_MARKER_KEY) {
                    if visited.contains(&path) {
                        return Err(LocaleDataError::MalformedData(format!(
                            "alias cycle at {path:?}"
                        )));
                    }
                    visited.push(path.clone());
                    let refs: Vec<&str> = path.iter().map(String::as_str).collect();
                    let root = self.root.clone();
                    let base = self.get_with_visited(&root, &refs, visited)?;
                    return Ok(merge(&base, &Data::Map(m)));
                }
                Ok(Data::Map(m))
            }
            other => Ok(other),
        }
    }
}

/// The two interfaces the core consumes from the external CLDR-import
/// world: a source of per-locale raw (unmerged) dictionaries.
pub trait LocaleDataSource: Send + Sync {
    fn load_raw(&self, id: &str) -> Result<Data, LocaleDataError>;
    fn exists(&self, id: &str) -> bool;
    fn list_identifiers(&self) -> Vec<String>;
}

/// Reads one compiled-JSON blob per locale from a directory, named
/// `<locale-id>.json` (`root.json` for the root locale).
pub struct FsLocaleDataSource {
    dir: PathBuf,
}

impl FsLocaleDataSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FsLocaleDataSource { dir: dir.into() }
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

impl LocaleDataSource for FsLocaleDataSource {
    fn load_raw(&self, id: &str) -> Result<Data, LocaleDataError> {
        let path = self.path_for(id);
        let text = std::fs::read_to_string(&path)
            .map_err(|_| LocaleDataError::UnknownLocale(id.to_string()))?;
        let json: serde_json::Value = serde_json::from_str(&text)?;
        Ok(Data::from_json(json))
    }

    fn exists(&self, id: &str) -> bool {
        self.path_for(id).exists()
    }

    fn list_identifiers(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        entries
            .filter_map(|e| e.ok())
            .filter_map(|e| {
                let path = e.path();
                if path.extension().and_then(|s| s.to_str()) != Some("json") {
                    return None;
                }
                let stem = path.file_stem()?.to_str()?.to_string();
                if stem == "root" {
                    None
                } else {
                    Some(stem)
                }
            })
            .collect()
    }
}

/// Process-wide, lazily-populated locale data cache. First-time loads for a
/// given id are serialized with a reentrant-by-construction lock (loading a
/// child recursively loads its parent on the same call stack before the
/// lock is released); steady-state reads clone an `Arc` with no contention.
pub struct LocaleDataStore {
    source: Box<dyn LocaleDataSource>,
    global: Arc<GlobalData>,
    cache: Mutex<HashMap<String, Arc<LocaleData>>>,
}

impl LocaleDataStore {
    pub fn new(source: Box<dyn LocaleDataSource>, global: Arc<GlobalData>) -> Self {
        LocaleDataStore {
            source,
            global,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_dir(dir: impl AsRef<Path>, global: Arc<GlobalData>) -> Self {
        Self::new(Box::new(FsLocaleDataSource::new(dir.as_ref())), global)
    }

    pub fn global(&self) -> &GlobalData {
        &self.global
    }

    pub fn exists(&self, id: &str) -> bool {
        id == "root" || self.source.exists(id)
    }

    pub fn list_identifiers(&self) -> Vec<String> {
        self.source.list_identifiers()
    }

    /// Load the merged, read-only dictionary for `id`, computing the
    /// parent chain and deep-merging child over parent.
    pub fn load(&self, id: &str) -> Result<Arc<LocaleData>, LocaleDataError> {
        {
            let cache = self.cache.lock().unwrap();
            if let Some(hit) = cache.get(id) {
                return Ok(hit.clone());
            }
        }

        let merged_root = if id == "root" {
            self.source.load_raw("root")?
        } else {
            let parsed = LocaleId::parse(id, '_')
                .map_err(|_| LocaleDataError::UnknownLocale(id.to_string()))?;
            let parent_id = self.global.parent_of(id, &parsed).unwrap_or_else(|| "root".to_string());
            let parent_data = self.load(&parent_id)?;
            let own = self.source.load_raw(id)?;
            merge(&parent_data.root, &own)
        };

        let locale_data = Arc::new(LocaleData::new(merged_root));
        let mut cache = self.cache.lock().unwrap();
        let entry = cache.entry(id.to_string()).or_insert(locale_data);
        Ok(entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    struct MapSource(HashMap<String, Data>);

    impl LocaleDataSource for MapSource {
        fn load_raw(&self, id: &str) -> Result<Data, LocaleDataError> {
            self.0
                .get(id)
                .cloned()
                .ok_or_else(|| LocaleDataError::UnknownLocale(id.to_string()))
        }
        fn exists(&self, id: &str) -> bool {
            self.0.contains_key(id)
        }
        fn list_identifiers(&self) -> Vec<String> {
            self.0.keys().cloned().collect()
        }
    }

    fn map_data(pairs: Vec<(&str, Data)>) -> Data {
        let mut m = IndexMap::new();
        for (k, v) in pairs {
            m.insert(k.to_string(), v);
        }
        Data::Map(m)
    }

    #[test]
    fn inheritance_merges_child_over_parent() {
        let mut raw = HashMap::new();
        raw.insert(
            "root".to_string(),
            map_data(vec![("decimal", Data::Str("#,##0.###".into()))]),
        );
        raw.insert(
            "de".to_string(),
            map_data(vec![("decimal", Data::Str("#,##0.###;-#".into()))]),
        );
        raw.insert("de_DE".to_string(), map_data(vec![]));

        let store = LocaleDataStore::new(Box::new(MapSource(raw)), Arc::new(GlobalData::default()));
        let data = store.load("de_DE").unwrap();
        assert_eq!(
            data.get(&["decimal"]).unwrap().as_str(),
            Some("#,##0.###;-#")
        );
    }

    #[test]
    fn alias_resolves_transparently() {
        let mut raw = HashMap::new();
        raw.insert(
            "root".to_string(),
            map_data(vec![
                ("format", map_data(vec![("wide", Data::Str("Format".into()))])),
                ("stand-alone", Data::Alias(vec!["format".into()])),
            ]),
        );
        let store = LocaleDataStore::new(Box::new(MapSource(raw)), Arc::new(GlobalData::default()));
        let data = store.load("root").unwrap();
        assert_eq!(
            data.get(&["stand-alone", "wide"]).unwrap().as_str(),
            Some("Format")
        );
    }

    #[test]
    fn no_inherit_marker_removes_key() {
        let mut raw = HashMap::new();
        raw.insert(
            "root".to_string(),
            map_data(vec![("x", Data::Str("present".into()))]),
        );
        raw.insert("en".to_string(), map_data(vec![("x", Data::NoInherit)]));
        let store = LocaleDataStore::new(Box::new(MapSource(raw)), Arc::new(GlobalData::default()));
        let data = store.load("en").unwrap();
        assert!(data.get(&["x"]).is_err());
    }
}
