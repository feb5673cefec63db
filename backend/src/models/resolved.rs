use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::models::{AvailableLocales, LocaleInfo, LocaleName};

/// Locale resolved for a single request.
///
/// Names are copied out of the shared configuration, so changing them here
/// never reaches the registry. `available_locales` is the shared, read-only
/// set every request of the same configuration points at.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedLocale {
    pub code: String,
    pub display_name: LocaleName,
    pub native_name: LocaleName,
    pub default_locale: String,
    #[serde(serialize_with = "serialize_shared")]
    pub available_locales: Arc<AvailableLocales>,
    pub using_default: bool,
}

impl ResolvedLocale {
    pub fn new(
        info: &LocaleInfo,
        default_locale: impl Into<String>,
        available_locales: Arc<AvailableLocales>,
        using_default: bool,
    ) -> Self {
        Self {
            code: info.code.clone(),
            display_name: info.display_name.clone(),
            native_name: info.native_name.clone(),
            default_locale: default_locale.into(),
            available_locales,
            using_default,
        }
    }

    /// Overwrite code and names with another locale's; `using_default` is kept.
    pub(crate) fn assign(&mut self, info: &LocaleInfo) {
        self.code = info.code.clone();
        self.display_name = info.display_name.clone();
        self.native_name = info.native_name.clone();
    }

    pub fn is_default(&self) -> bool {
        self.code == self.default_locale
    }

    /// Prefix `local_path` with a locale code.
    ///
    /// `code` defaults to this request's locale. Unknown or empty codes fall
    /// back to the default locale, whose links carry no prefix.
    pub fn route_to(&self, local_path: &str, code: Option<&str>) -> String {
        let code = code.unwrap_or(&self.code);
        localized_path(&self.available_locales, &self.default_locale, code, local_path)
    }
}

/// `/{code}{local_path}` for an available non-default `code`, `local_path`
/// otherwise. No normalization beyond the concatenation.
pub fn localized_path(
    available: &AvailableLocales,
    default_locale: &str,
    code: &str,
    local_path: &str,
) -> String {
    let effective = available.lookup(code).map(|info| info.code.as_str()).unwrap_or(default_locale);

    if effective == default_locale {
        local_path.to_string()
    } else {
        format!("/{}{}", effective, local_path)
    }
}

fn serialize_shared<S: Serializer>(
    available: &Arc<AvailableLocales>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    available.as_ref().serialize(serializer)
}
