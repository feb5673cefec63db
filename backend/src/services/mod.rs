pub mod locale_config;
pub mod locale_context;
pub mod locale_registry;
pub mod locale_resolver;

pub use locale_config::{OnLocaleResolved, RequestContext, RoutingConfig};
pub use locale_context::LocaleHandle;
pub use locale_registry::LocaleRegistry;
pub use locale_resolver::{PrefixOutcome, Resolution, resolve_path};
