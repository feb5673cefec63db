pub mod error;
pub mod i18n;

pub use error::{LocaleError, LocaleErrorResponse, LocaleResult};
pub use i18n::{LocalePrefix, UNIVERSAL_DEFAULT_LOCALE, is_routable_code, normalize_locale, parse_locale_prefix};
