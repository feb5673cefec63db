//! URL-prefix locale routing for axum
//!
//! Requests like `/ru/article/12` or `/zh-chs/article/12` are served by the
//! routes of `/article/12` with the locale resolved from the prefix. Requests
//! without a prefix use the configured default locale. A prefix that only
//! looks like a locale (`/vk/auth`) is left in place and routed as is.
//!
//! ```rust,ignore
//! let config = RoutingConfig::with_defaults("en", ["en", "ru", "zh-CHS"])?;
//! let routing = LocaleRouting::new(config);
//! let app = routing.mount(Router::new().route("/code", get(handler)));
//!
//! async fn handler(locale: LocaleHandle) -> String {
//!     locale.route_to("/article/12", None)
//! }
//! ```

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use middleware::LocaleRouting;
pub use models::{AvailableLocales, LocaleInfo, LocaleName, ResolvedLocale};
pub use services::{LocaleHandle, LocaleRegistry, OnLocaleResolved, RequestContext, RoutingConfig};
pub use utils::{LocaleError, LocaleResult};

/// Demo application: locale endpoints behind the locale routing.
pub fn build_app(routing: &LocaleRouting) -> Router {
    let app = Router::new()
        .route("/", get(handlers::current_locale))
        .route("/locales", get(handlers::list_locales))
        .route("/locale/:code", post(handlers::switch_locale));

    routing.mount(app).layer(TraceLayer::new_for_http())
}
