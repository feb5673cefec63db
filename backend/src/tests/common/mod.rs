// Common test utilities and helpers

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::{OriginalUri, Path, Query, Request, State},
    http::{Method, StatusCode},
    routing::{get, post},
};
use parking_lot::Mutex;
use serde::Deserialize;
use tower::ServiceExt;

use crate::middleware::LocaleRouting;
use crate::services::{LocaleHandle, OnLocaleResolved, RoutingConfig};

pub const RESP_NO_LANG: &str = "looks like a lang";
pub const RESP_VK: &str = "vk response";

/// Handles captured by `/capture`, for identity checks
pub type Captured = Arc<Mutex<Vec<LocaleHandle>>>;

pub fn create_routing(default_language: &str, available: &[&str]) -> LocaleRouting {
    create_routing_with_callback(default_language, available, OnLocaleResolved::noop())
}

pub fn create_routing_with_callback(
    default_language: &str,
    available: &[&str],
    callback: OnLocaleResolved,
) -> LocaleRouting {
    let config = RoutingConfig::configure(
        crate::services::LocaleRegistry::builtin(),
        default_language,
        available,
        callback,
    )
    .expect("Failed to configure locale routing");
    LocaleRouting::new(config)
}

#[derive(Debug, Deserialize)]
struct RouteToQuery {
    path: String,
    lang: Option<String>,
}

async fn code(locale: LocaleHandle) -> String {
    locale.code()
}

async fn default_code(locale: LocaleHandle) -> String {
    locale.default_locale().to_string()
}

async fn using_default(locale: LocaleHandle) -> String {
    locale.using_default().to_string()
}

async fn available(locale: LocaleHandle) -> String {
    let mut codes: Vec<String> =
        locale.available().codes().into_iter().map(str::to_string).collect();
    codes.sort();
    codes.iter().map(|code| format!("{},", code)).collect()
}

async fn route_to(locale: LocaleHandle, Query(query): Query<RouteToQuery>) -> String {
    locale.route_to(&query.path, query.lang.as_deref())
}

async fn echo(OriginalUri(original): OriginalUri, req: Request) -> String {
    format!("{} {}", original, req.uri())
}

async fn switch(locale: LocaleHandle, Path(code): Path<String>) -> Result<String, StatusCode> {
    locale.set_locale(&code).map_err(|_| StatusCode::NOT_FOUND)?;
    Ok(locale.code())
}

async fn capture(State(captured): State<Captured>, locale: LocaleHandle) -> String {
    captured.lock().push(locale.clone());
    locale.code()
}

/// Application routes mirroring a site behind the locale routing.
pub fn create_test_app(routing: &LocaleRouting, captured: Captured) -> Router {
    let app = Router::new()
        .route("/code", get(code))
        .route("/default", get(default_code))
        .route("/using-default", get(using_default))
        .route("/any-path", get(available))
        .route("/routeTo/", get(route_to))
        .route("/echo", get(echo))
        .route("/switch/:code", get(switch))
        .route("/xx-YY/looks-like-lang-but-no", get(|| async { RESP_NO_LANG }))
        .route("/vk/auth", post(|| async { RESP_VK }))
        .route("/ru-ru/code-def-unavail-lang", get(code))
        .route("/zh/code-def-unavail-lang", get(code))
        .merge(Router::new().route("/capture", get(capture)).with_state(captured));

    routing.mount(app)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
    pub locale: Option<LocaleHandle>,
}

pub async fn send(app: &Router, method: Method, uri: &str) -> TestResponse {
    let request = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request");

    let response = app.clone().oneshot(request).await.expect("Router is infallible");
    let status = response.status();
    let locale = response.extensions().get::<LocaleHandle>().cloned();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("Failed to read body");

    TestResponse { status, body: String::from_utf8_lossy(&bytes).into_owned(), locale }
}

/// In-memory sink for formatted log lines, for asserting on diagnostics.
#[derive(Debug, Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn make_writer(&self) -> impl Fn() -> LogCapture + Send + Sync + 'static {
        let capture = self.clone();
        move || capture.clone()
    }

    /// Subscriber writing every level to this capture, for `with_default`.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(self.make_writer())
            .finish()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub async fn get_text(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = send(app, Method::GET, uri).await;
    (response.status, response.body)
}
