use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Locale routing error
///
/// Configuration-time variants abort setup; `LocaleNotFound` is raised by
/// handler-initiated locale switches; `MissingContext` means the middleware
/// was not mounted in front of the handler that asked for the locale.
#[derive(Error, Debug)]
pub enum LocaleError {
    // Configuration errors 1xxx
    #[error("Unknown defaultLanguage: [{code}]")]
    UnknownDefaultLocale { code: String },

    // Catalog errors 2xxx
    #[error("Duplicate locale in catalog: {code}")]
    DuplicateLocale { code: String },

    #[error("Locale catalog must contain the fallback locale '{code}'")]
    MissingFallbackLocale { code: String },

    #[error("Failed to parse locale catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),

    #[error("Failed to read locale catalog: {0}")]
    CatalogIo(#[from] std::io::Error),

    // Lookup errors 3xxx
    #[error("Locale not found: {code}")]
    LocaleNotFound { code: String },

    // Internal errors 5xxx
    #[error("Locale context is missing, is the locale middleware mounted?")]
    MissingContext,
}

impl LocaleError {
    /// Helper to create unknown default locale error
    pub fn unknown_default(code: impl Into<String>) -> Self {
        Self::UnknownDefaultLocale { code: code.into() }
    }

    /// Helper to create locale not found error
    pub fn not_found(code: impl Into<String>) -> Self {
        Self::LocaleNotFound { code: code.into() }
    }

    pub fn error_code(&self) -> i32 {
        match self {
            Self::UnknownDefaultLocale { .. } => 1001,

            Self::DuplicateLocale { .. } => 2001,
            Self::MissingFallbackLocale { .. } => 2002,
            Self::CatalogParse(_) => 2003,
            Self::CatalogIo(_) => 2004,

            Self::LocaleNotFound { .. } => 3001,

            Self::MissingContext => 5001,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LocaleErrorResponse {
    pub code: i32,
    pub message: String,
}

impl IntoResponse for LocaleError {
    fn into_response(self) -> Response {
        let code = self.error_code();

        let status = match code {
            3000..=3999 => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Locale error surfaced to client: {}", self);
        }

        let response = LocaleErrorResponse { code, message: self.to_string() };

        (status, Json(response)).into_response()
    }
}

pub type LocaleResult<T> = Result<T, LocaleError>;
