use std::sync::Arc;

use axum::http::Extensions;
use parking_lot::RwLock;

use crate::models::{AvailableLocales, LocaleName, ResolvedLocale};
use crate::services::{RequestContext, Resolution, RoutingConfig};
use crate::utils::{LocaleError, LocaleResult};

#[derive(Debug)]
struct HandleInner {
    locale: RwLock<ResolvedLocale>,
    config: Arc<RoutingConfig>,
    request: RequestContext,
}

/// Shared reference to a request's resolved locale.
///
/// The middleware puts clones of one handle on the request and on the
/// response, so a change made through either view is seen by the other.
/// Handles are never shared between requests.
///
/// Accessors copy values out and never hand out a lock guard, so calling
/// `set_locale` from a handler cannot block on its own read.
#[derive(Debug, Clone)]
pub struct LocaleHandle {
    inner: Arc<HandleInner>,
}

impl LocaleHandle {
    /// Build the per-request locale from a resolution and fire the
    /// `on_locale_resolved` callback once, with the request's extensions.
    pub fn attach(
        config: Arc<RoutingConfig>,
        resolution: &Resolution,
        request: RequestContext,
        extensions: &mut Extensions,
    ) -> Self {
        let locale = ResolvedLocale::new(
            &resolution.locale,
            config.default_code(),
            Arc::clone(config.available()),
            resolution.using_default,
        );

        let handle =
            Self { inner: Arc::new(HandleInner { locale: RwLock::new(locale), config, request }) };
        handle.notify(&resolution.locale.code, Some(extensions));
        handle
    }

    /// Switch this request to another available locale, in place.
    ///
    /// Fails with `LocaleNotFound` when `code` is not available; the current
    /// locale is left untouched in that case.
    pub fn set_locale(&self, code: &str) -> LocaleResult<()> {
        let info = self
            .inner
            .config
            .available()
            .lookup(code)
            .cloned()
            .ok_or_else(|| LocaleError::not_found(code))?;

        self.inner.locale.write().assign(&info);
        tracing::debug!(
            "Locale switched to {} for {} {}",
            info.code,
            self.inner.request.method,
            self.inner.request.original_uri
        );

        // the request is already dispatched, its extensions are out of reach
        self.notify(&info.code, None);
        Ok(())
    }

    fn notify(&self, code: &str, extensions: Option<&mut Extensions>) {
        self.inner.config.on_locale_resolved().call(code, &self.inner.request, extensions);
    }

    pub fn route_to(&self, local_path: &str, code: Option<&str>) -> String {
        self.inner.locale.read().route_to(local_path, code)
    }

    pub fn snapshot(&self) -> ResolvedLocale {
        self.inner.locale.read().clone()
    }

    pub fn code(&self) -> String {
        self.inner.locale.read().code.clone()
    }

    pub fn display_name(&self) -> LocaleName {
        self.inner.locale.read().display_name.clone()
    }

    pub fn native_name(&self) -> LocaleName {
        self.inner.locale.read().native_name.clone()
    }

    pub fn using_default(&self) -> bool {
        self.inner.locale.read().using_default
    }

    pub fn default_locale(&self) -> &str {
        self.inner.config.default_code()
    }

    pub fn available(&self) -> &Arc<AvailableLocales> {
        self.inner.config.available()
    }

    pub fn request(&self) -> &RequestContext {
        &self.inner.request
    }

    /// Whether both handles point at the same per-request locale.
    pub fn ptr_eq(&self, other: &LocaleHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
