//! Locale routing middleware
//!
//! Resolves the locale from the URL prefix, strips a recognized prefix
//! before route dispatch and exposes the resolved locale to handlers.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Router,
    extract::{FromRequestParts, OriginalUri, Request, State},
    http::{
        request::Parts,
        uri::{PathAndQuery, Uri},
    },
    middleware::{self, Next},
    response::Response,
};
use tower::Layer;

use crate::models::AvailableLocales;
use crate::services::{LocaleHandle, PrefixOutcome, RequestContext, RoutingConfig, resolve_path};
use crate::utils::LocaleError;

/// Locale routing for one configuration; mount it around an application.
#[derive(Debug, Clone)]
pub struct LocaleRouting {
    config: Arc<RoutingConfig>,
}

impl LocaleRouting {
    pub fn new(config: RoutingConfig) -> Self {
        Self { config: Arc::new(config) }
    }

    pub fn config(&self) -> &Arc<RoutingConfig> {
        &self.config
    }

    pub fn default_locale(&self) -> &str {
        self.config.default_code()
    }

    pub fn available(&self) -> &Arc<AvailableLocales> {
        self.config.available()
    }

    /// Run every request of `app` through the locale middleware.
    ///
    /// axum dispatches routes before layered middleware runs, so the
    /// middleware wraps the whole router and the result becomes the fallback
    /// of an outer router. The prefix is therefore stripped before `app`
    /// matches its routes.
    pub fn mount(&self, app: Router) -> Router {
        let layer = middleware::from_fn_with_state(Arc::clone(&self.config), locale_middleware);
        Router::new().fallback_service(layer.layer(app))
    }
}

/// Middleware resolving the locale of the request path
pub async fn locale_middleware(
    State(config): State<Arc<RoutingConfig>>,
    mut req: Request,
    next: Next,
) -> Response {
    let original_uri = req.uri().clone();
    let resolution = resolve_path(&config, original_uri.path());

    if req.extensions().get::<OriginalUri>().is_none() {
        req.extensions_mut().insert(OriginalUri(original_uri.clone()));
    }

    if resolution.outcome == PrefixOutcome::Localized {
        match rewrite_path(&original_uri, &resolution.routed_path) {
            Ok(uri) => *req.uri_mut() = uri,
            Err(err) => {
                tracing::warn!("Failed to strip locale prefix from {}: {}", original_uri, err)
            },
        }
    }

    tracing::debug!(
        "Locale {} for {} {} (outcome: {:?}, routed: {})",
        resolution.locale.code,
        req.method(),
        original_uri,
        resolution.outcome,
        req.uri().path()
    );

    let context = RequestContext {
        method: req.method().clone(),
        original_uri,
        routed_path: req.uri().path().to_string(),
    };
    let handle = LocaleHandle::attach(config, &resolution, context, req.extensions_mut());
    req.extensions_mut().insert(handle.clone());

    let mut response = next.run(req).await;
    response.extensions_mut().insert(handle);
    response
}

/// Replace the path of `uri`, keeping its query.
fn rewrite_path(uri: &Uri, path: &str) -> Result<Uri, axum::http::Error> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
    Ok(Uri::from_parts(parts)?)
}

#[async_trait]
impl<S> FromRequestParts<S> for LocaleHandle
where
    S: Send + Sync,
{
    type Rejection = LocaleError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<LocaleHandle>().cloned().ok_or(LocaleError::MissingContext)
    }
}
