//! Locale registry: immutable map from normalized code to locale metadata.
//!
//! The built-in catalog is process-wide and built on first access. Custom
//! catalogs can be loaded from JSON in the same shape as the built-in one;
//! adding a locale is a data change only.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;

use crate::models::{CatalogEntry, LocaleInfo, LocaleName};
use crate::utils::{LocaleError, LocaleResult, UNIVERSAL_DEFAULT_LOCALE, normalize_locale};

static BUILTIN: Lazy<LocaleRegistry> = Lazy::new(|| LocaleRegistry::index(builtin_catalog()));

#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    locales: Vec<LocaleInfo>,
    by_key: HashMap<String, usize>,
}

impl LocaleRegistry {
    /// Registry seeded from the built-in catalog.
    pub fn builtin() -> &'static LocaleRegistry {
        &BUILTIN
    }

    /// Build a registry from catalog entries.
    ///
    /// Fails on duplicate codes (compared case-insensitively) and when the
    /// universal fallback locale is absent.
    pub fn from_entries(entries: Vec<CatalogEntry>) -> LocaleResult<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(normalize_locale(&entry.code)) {
                return Err(LocaleError::DuplicateLocale { code: entry.code.clone() });
            }
        }

        if !seen.contains(UNIVERSAL_DEFAULT_LOCALE) {
            return Err(LocaleError::MissingFallbackLocale {
                code: UNIVERSAL_DEFAULT_LOCALE.to_string(),
            });
        }

        Ok(Self::index(entries.into_iter().map(LocaleInfo::from).collect()))
    }

    /// Parse a JSON array of catalog entries.
    pub fn from_json(json: &str) -> LocaleResult<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn from_file(path: impl AsRef<Path>) -> LocaleResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let registry = Self::from_json(&content)?;
        tracing::info!("Loaded {} locales from catalog {}", registry.len(), path.display());
        Ok(registry)
    }

    fn index(locales: Vec<LocaleInfo>) -> Self {
        let by_key = locales
            .iter()
            .enumerate()
            .map(|(idx, info)| (normalize_locale(&info.code), idx))
            .collect();
        Self { locales, by_key }
    }

    /// Case-insensitive lookup. Absence is a normal outcome.
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

fn locale(
    code: &str,
    short: &str,
    full: &str,
    native_short: &str,
    native_full: &str,
) -> LocaleInfo {
    LocaleInfo {
        code: code.to_string(),
        display_name: LocaleName::new(short, full),
        native_name: LocaleName::new(native_short, native_full),
    }
}

/// Built-in ISO 639 / IETF locales. `en` must stay: it is the universal default.
fn builtin_catalog() -> Vec<LocaleInfo> {
    vec![
        locale("en", "en", "English", "en", "English"),
        locale("en-GB", "en (GB)", "English (GB)", "en (GB)", "English (GB)"),
        locale("en-US", "en (US)", "English (US)", "en (US)", "English (US)"),
        locale("ru", "ru", "Russian", "рус", "Русский"),
        locale("ru-RU", "ru (RU)", "Russian (Russia)", "рус (Рос)", "Русский (Россия)"),
        locale("zh", "zh", "Chinese", "中文", "中文"),
        locale("zh-CHS", "zh-CHS", "Chinese (Simplified)", "简体中文", "中文（简体）"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_returns_singleton() {
        let registry1 = LocaleRegistry::builtin();
        let registry2 = LocaleRegistry::builtin();
        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_builtin_contains_universal_default() {
        let en = LocaleRegistry::builtin().lookup(UNIVERSAL_DEFAULT_LOCALE).unwrap();
        assert_eq!(en.code, "en");
        assert_eq!(en.display_name.full, "English");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = LocaleRegistry::builtin();
        for code in ["zh-CHS", "zh-chs", "ZH-CHS", " zh-Chs "] {
            assert_eq!(registry.lookup(code).unwrap().code, "zh-CHS");
        }
        assert_eq!(registry.lookup("RU-ru").unwrap().code, "ru-RU");
    }

    #[test]
    fn test_lookup_unknown() {
        let registry = LocaleRegistry::builtin();
        assert!(registry.lookup("xx").is_none());
        assert!(registry.lookup("").is_none());
        assert!(registry.lookup("ru_RU").is_none());
        assert!(!registry.contains("xx-YY"));
    }

    #[test]
    fn test_builtin_codes() {
        assert_eq!(
            LocaleRegistry::builtin().codes(),
            vec!["en", "en-GB", "en-US", "ru", "ru-RU", "zh", "zh-CHS"]
        );
    }

    #[test]
    fn test_from_json() {
        let registry = LocaleRegistry::from_json(
            r#"[
                { "code": "en", "name": { "short": "en", "full": "English",
                  "native": { "short": "en", "full": "English" } } },
                { "code": "de-AT", "name": { "short": "de (AT)", "full": "German (Austria)",
                  "native": { "short": "de (AT)", "full": "Deutsch (Österreich)" } } }
            ]"#,
        )
        .unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.lookup("de-at").unwrap().native_name.full, "Deutsch (Österreich)");
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let result = LocaleRegistry::from_json(
            r#"[
                { "code": "en", "name": { "short": "en", "full": "English",
                  "native": { "short": "en", "full": "English" } } },
                { "code": "EN", "name": { "short": "en", "full": "English",
                  "native": { "short": "en", "full": "English" } } }
            ]"#,
        );
        assert!(matches!(result, Err(LocaleError::DuplicateLocale { code }) if code == "EN"));
    }

    #[test]
    fn test_from_json_requires_fallback() {
        let result = LocaleRegistry::from_json(
            r#"[
                { "code": "ru", "name": { "short": "ru", "full": "Russian",
                  "native": { "short": "рус", "full": "Русский" } } }
            ]"#,
        );
        assert!(matches!(result, Err(LocaleError::MissingFallbackLocale { .. })));
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(LocaleRegistry::from_json("{"), Err(LocaleError::CatalogParse(_))));
    }

    #[test]
    fn test_from_file_missing() {
        let result = LocaleRegistry::from_file("/nonexistent/locales.json");
        assert!(matches!(result, Err(LocaleError::CatalogIo(_))));
    }

    #[test]
    fn test_from_file_sample_catalog() {
        let registry =
            LocaleRegistry::from_file(concat!(env!("CARGO_MANIFEST_DIR"), "/conf/locales.json")).unwrap();
        assert_eq!(registry.codes(), vec!["en", "de", "ru", "ru-RU"]);
        assert!(registry.lookup("zh-CHS").is_none());
    }
}
