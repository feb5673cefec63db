use std::fmt;
use std::sync::Arc;

use axum::http::{Extensions, Method, Uri};

use crate::models::{AvailableLocales, LocaleInfo, localized_path};
use crate::services::LocaleRegistry;
use crate::utils::{LocaleError, LocaleResult, UNIVERSAL_DEFAULT_LOCALE, is_routable_code};

/// Request as seen by the locale callback.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    /// URI before any prefix was stripped
    pub original_uri: Uri,
    /// Path handed to downstream routing
    pub routed_path: String,
}

type LocaleCallback = dyn Fn(&str, &RequestContext, Option<&mut Extensions>) + Send + Sync;

/// Hook fired whenever a request's locale is finalized or switched.
///
/// When the locale is first resolved the hook gets the request's extensions
/// and may insert per-request data for handlers. Switches made later through
/// `set_locale` pass `None`. The default is a no-op.
#[derive(Clone)]
pub struct OnLocaleResolved(Option<Arc<LocaleCallback>>);

impl OnLocaleResolved {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&str, &RequestContext, Option<&mut Extensions>) + Send + Sync + 'static,
    {
        Self(Some(Arc::new(callback)))
    }

    pub fn noop() -> Self {
        Self(None)
    }

    pub fn call(&self, code: &str, request: &RequestContext, extensions: Option<&mut Extensions>) {
        if let Some(callback) = &self.0 {
            callback(code, request, extensions);
        }
    }
}

impl Default for OnLocaleResolved {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for OnLocaleResolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.0.is_some() { "OnLocaleResolved(callback)" } else { "OnLocaleResolved(noop)" })
    }
}

/// Frozen locale routing configuration for one middleware instance.
///
/// Invariant: the default locale is a member of the available set.
#[derive(Debug)]
pub struct RoutingConfig {
    default_locale: LocaleInfo,
    available: Arc<AvailableLocales>,
    on_locale_resolved: OnLocaleResolved,
}

impl RoutingConfig {
    /// Validate the default locale and build the available set.
    ///
    /// An empty `default_language` means the universal default. A non-empty
    /// code missing from the registry is a configuration error. Unknown
    /// entries of `available_languages` are dropped with a warning.
    pub fn configure<I, S>(
        registry: &LocaleRegistry,
        default_language: &str,
        available_languages: I,
        on_locale_resolved: OnLocaleResolved,
    ) -> LocaleResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested = match default_language.trim() {
            "" => UNIVERSAL_DEFAULT_LOCALE,
            code => code,
        };

        let default_locale = registry.lookup(requested).cloned().ok_or_else(|| {
            tracing::error!("Unknown default language: {}", requested);
            LocaleError::unknown_default(requested)
        })?;

        let mut available = AvailableLocales::new();
        for code in available_languages {
            let code = code.as_ref();
            match registry.lookup(code) {
                Some(info) => {
                    available.insert(info.clone());
                },
                None => tracing::warn!("Unknown language in available list: {}", code),
            }
        }
        available.insert(default_locale.clone());

        // the default is reached without a prefix, every other code needs one
        for info in available.iter().filter(|info| info.code != default_locale.code) {
            if !is_routable_code(&info.code) {
                tracing::warn!("Locale {} does not fit the URL prefix pattern and is unreachable by URL", info.code);
            }
        }

        tracing::debug!(
            "Locale routing configured: default={}, available={:?}",
            default_locale.code,
            available.codes()
        );

        Ok(Self { default_locale, available: Arc::new(available), on_locale_resolved })
    }

    /// Built-in registry, no callback.
    pub fn with_defaults<I, S>(default_language: &str, available_languages: I) -> LocaleResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::configure(
            LocaleRegistry::builtin(),
            default_language,
            available_languages,
            OnLocaleResolved::noop(),
        )
    }

    pub fn default_locale(&self) -> &LocaleInfo {
        &self.default_locale
    }

    pub fn default_code(&self) -> &str {
        &self.default_locale.code
    }

    pub fn available(&self) -> &Arc<AvailableLocales> {
        &self.available
    }

    pub fn on_locale_resolved(&self) -> &OnLocaleResolved {
        &self.on_locale_resolved
    }

    /// Link builder outside of a request; `None` means the default locale.
    pub fn route_to(&self, local_path: &str, code: Option<&str>) -> String {
        let code = code.unwrap_or(self.default_code());
        localized_path(&self.available, self.default_code(), code, local_path)
    }
}
