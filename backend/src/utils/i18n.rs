//! Locale code canonicalization and URL prefix parsing
//!
//! Every lookup key in the registry and in the available set goes through
//! [`normalize_locale`]. The URL prefix grammar is the one the middleware is
//! mounted with: an optional two-character language segment followed by an
//! optional culture suffix (`-` or `_` plus two or three characters).

use once_cell::sync::Lazy;
use regex::Regex;

/// Locale used when no default is configured. Every catalog must carry it.
pub const UNIVERSAL_DEFAULT_LOCALE: &str = "en";

static PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/(?P<lang>[A-Za-z0-9_]{2})(?P<cult>[-_][A-Za-z0-9_]{2,3})?(?P<rest>/.*)?$")
        .expect("locale prefix pattern is valid")
});

/// Canonical lookup key for a locale code: trimmed and lowercased.
/// Accepts: "en", "EN", " ru-RU ", "zh-chs" ...
pub fn normalize_locale(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Locale-shaped prefix found at the start of a request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalePrefix<'a> {
    /// Two-character language segment, as written in the URL.
    pub lang: &'a str,
    /// Culture suffix including its separator (e.g. `-RU`, `_chs`).
    pub cult: Option<&'a str>,
    /// Remainder of the path after the prefix, always starting with `/`.
    pub rest: &'a str,
}

impl LocalePrefix<'_> {
    /// Candidate locale code: language and culture concatenated.
    pub fn candidate(&self) -> String {
        match self.cult {
            Some(cult) => format!("{}{}", self.lang, cult),
            None => self.lang.to_string(),
        }
    }
}

/// Parse the outermost locale-shaped prefix of `path`.
///
/// Only the first segment is considered; `/en/ru/page` yields `en` with
/// `/ru/page` as the remainder.
pub fn parse_locale_prefix(path: &str) -> Option<LocalePrefix<'_>> {
    let caps = PREFIX_REGEX.captures(path)?;
    let lang = caps.name("lang")?.as_str();
    let cult = caps.name("cult").map(|m| m.as_str());
    let rest = caps.name("rest").map(|m| m.as_str()).unwrap_or("/");

    Some(LocalePrefix { lang, cult, rest })
}

/// Whether `code` written as a URL prefix parses back to exactly `code`.
///
/// Catalog codes outside the prefix grammar (`zh-Hans`, `es-419x`) can be
/// made available but no request path resolves to them.
pub fn is_routable_code(code: &str) -> bool {
    parse_locale_prefix(&format!("/{}", code))
        .is_some_and(|prefix| prefix.rest == "/" && prefix.candidate() == code)
}
