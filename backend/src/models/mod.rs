pub mod locale;
pub mod resolved;

pub use locale::{AvailableLocales, CatalogEntry, CatalogName, LocaleInfo, LocaleName};
pub use resolved::{ResolvedLocale, localized_path};
