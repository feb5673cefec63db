pub mod locale;

pub use locale::{LocaleRouting, locale_middleware};
