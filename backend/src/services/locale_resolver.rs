//! URL locale extractor
//!
//! Decides, from the request path alone, which locale a request uses and
//! which path downstream routing should see.

use crate::models::LocaleInfo;
use crate::services::RoutingConfig;
use crate::utils::parse_locale_prefix;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixOutcome {
    /// No locale-shaped prefix
    Default,
    /// Prefix names an available locale and was stripped
    Localized,
    /// Prefix looks like a locale but is not available; path left intact
    Unrecognized { candidate: String },
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub locale: LocaleInfo,
    pub using_default: bool,
    pub outcome: PrefixOutcome,
    pub routed_path: String,
}

impl Resolution {
    pub fn is_localized(&self) -> bool {
        self.outcome == PrefixOutcome::Localized
    }
}

/// Resolve the locale of `path` against the available set of `config`.
///
/// Only the outermost prefix is consumed. An unavailable prefix never fails
/// the request: the default locale is used and the full path is kept so the
/// segment routes as ordinary content.
pub fn resolve_path(config: &RoutingConfig, path: &str) -> Resolution {
    let (candidate, using_default, routed_path) = match parse_locale_prefix(path) {
        None => (config.default_code().to_string(), true, path),
        Some(prefix) => (prefix.candidate(), false, prefix.rest),
    };

    match config.available().lookup(&candidate) {
        Some(locale) => Resolution {
            locale: locale.clone(),
            using_default,
            outcome: if using_default { PrefixOutcome::Default } else { PrefixOutcome::Localized },
            routed_path: routed_path.to_string(),
        },
        None => {
            tracing::debug!(
                "Prefix '{}' is not an available locale, keeping path {} with default locale {}",
                candidate,
                path,
                config.default_code()
            );
            Resolution {
                locale: config.default_locale().clone(),
                using_default: true,
                outcome: PrefixOutcome::Unrecognized { candidate },
                routed_path: path.to_string(),
            }
        },
    }
}
