use std::collections::HashMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::utils::normalize_locale;

/// Short and full form of a locale's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleName {
    pub short: String,
    pub full: String,
}

impl LocaleName {
    pub fn new(short: impl Into<String>, full: impl Into<String>) -> Self {
        Self { short: short.into(), full: full.into() }
    }
}

/// Metadata for one known locale. Identity is `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleInfo {
    /// Canonical casing, e.g. `zh-CHS`
    pub code: String,
    pub display_name: LocaleName,
    pub native_name: LocaleName,
}

/// Catalog entry as stored on disk:
/// `{ code, name: { short, full, native: { short, full } } }`
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub code: String,
    pub name: CatalogName,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogName {
    pub short: String,
    pub full: String,
    pub native: LocaleName,
}

impl From<CatalogEntry> for LocaleInfo {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            code: entry.code,
            display_name: LocaleName { short: entry.name.short, full: entry.name.full },
            native_name: entry.name.native,
        }
    }
}

/// Locales enabled for one routing configuration, in first-seen order.
///
/// Built once at configuration time and shared read-only with every request.
#[derive(Debug, Clone, Default)]
pub struct AvailableLocales {
    locales: Vec<LocaleInfo>,
    by_key: HashMap<String, usize>,
}

impl AvailableLocales {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `info` unless a locale with the same normalized code is present.
    pub(crate) fn insert(&mut self, info: LocaleInfo) -> bool {
        let key = normalize_locale(&info.code);
        if self.by_key.contains_key(&key) {
            return false;
        }
        self.by_key.insert(key, self.locales.len());
        self.locales.push(info);
        true
    }

    pub fn lookup(&self, code: &str) -> Option<&LocaleInfo> {
        self.by_key.get(&normalize_locale(code)).map(|&idx| &self.locales[idx])
    }

    pub fn contains(&self, code: &str) -> bool {
        self.by_key.contains_key(&normalize_locale(code))
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocaleInfo> {
        self.locales.iter()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.locales.iter().map(|info| info.code.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}

impl Serialize for AvailableLocales {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.locales)
    }
}
