pub mod locale;

pub use locale::{CurrentLocaleResponse, LocaleLink, current_locale, list_locales, switch_locale};
