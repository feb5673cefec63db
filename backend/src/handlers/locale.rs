use axum::{Json, extract::Path};
use serde::Serialize;

use crate::models::{LocaleName, ResolvedLocale};
use crate::services::LocaleHandle;
use crate::utils::LocaleResult;

#[derive(Debug, Serialize)]
pub struct CurrentLocaleResponse {
    #[serde(flatten)]
    pub locale: ResolvedLocale,
    /// Home page link in the current locale
    pub home: String,
}

impl From<&LocaleHandle> for CurrentLocaleResponse {
    fn from(handle: &LocaleHandle) -> Self {
        Self { locale: handle.snapshot(), home: handle.route_to("/", None) }
    }
}

#[derive(Debug, Serialize)]
pub struct LocaleLink {
    pub code: String,
    pub display_name: LocaleName,
    pub native_name: LocaleName,
    pub href: String,
    pub active: bool,
}

/// Resolved locale of the current request
pub async fn current_locale(locale: LocaleHandle) -> Json<CurrentLocaleResponse> {
    Json(CurrentLocaleResponse::from(&locale))
}

/// Available locales with links switching the home page to each of them
pub async fn list_locales(locale: LocaleHandle) -> Json<Vec<LocaleLink>> {
    let current = locale.snapshot();
    let links = current
        .available_locales
        .iter()
        .map(|info| LocaleLink {
            code: info.code.clone(),
            display_name: info.display_name.clone(),
            native_name: info.native_name.clone(),
            href: current.route_to("/", Some(&info.code)),
            active: info.code == current.code,
        })
        .collect();
    Json(links)
}

/// Switch the locale of the current request
pub async fn switch_locale(
    locale: LocaleHandle,
    Path(code): Path<String>,
) -> LocaleResult<Json<CurrentLocaleResponse>> {
    tracing::debug!("Switching locale from {} to {}", locale.code(), code);
    locale.set_locale(&code)?;
    Ok(Json(CurrentLocaleResponse::from(&locale)))
}
