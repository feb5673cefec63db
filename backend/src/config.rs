use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt::MakeWriter};

use crate::middleware::LocaleRouting;
use crate::services::{LocaleRegistry, OnLocaleResolved, RoutingConfig};
use crate::utils::{LocaleResult, UNIVERSAL_DEFAULT_LOCALE};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub locale: LocaleConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Empty means the universal default (`en`)
    pub default_language: String,
    /// Accepts a TOML array or a comma separated string
    #[serde(deserialize_with = "deserialize_code_list")]
    pub available_languages: Vec<String>,
    /// JSON catalog replacing the built-in locale list
    pub catalog: Option<String>,
}

impl Config {
    /// Load configuration with environment variable override support
    ///
    /// Loading order:
    /// 1. Load from the given path, or conf/config.toml / config.toml
    /// 2. Override with environment variables (prefixed with APP_)
    /// 3. Validate the final configuration
    pub fn load(path: Option<&str>) -> Result<Self, anyhow::Error> {
        let config_path = match path {
            Some(path) => Some(path.to_string()),
            None => Self::find_config_file(),
        };

        let mut config = if let Some(config_path) = config_path {
            let config = Self::from_toml(&config_path)?;
            tracing::info!("Loaded configuration from {}", config_path);
            config
        } else {
            tracing::warn!("Configuration file not found, using defaults");
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// `load` with an info-level console subscriber active for the call.
    ///
    /// The `[logging]` section is only applied after loading, so without this
    /// the override and fallback messages of `load` would have no subscriber.
    pub fn load_reported<W>(path: Option<&str>, writer: W) -> Result<Self, anyhow::Error>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let bootstrap =
            tracing_subscriber::fmt().with_env_filter(EnvFilter::new("info")).with_writer(writer).finish();
        tracing::subscriber::with_default(bootstrap, || Self::load(path))
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - APP_SERVER_HOST: Server host (default: 0.0.0.0)
    /// - APP_SERVER_PORT: Server port (default: 8080)
    /// - APP_LOG_LEVEL: Logging level (e.g., "info,locale_router=debug")
    /// - APP_DEFAULT_LANGUAGE: Default locale code (e.g., "ru-RU")
    /// - APP_AVAILABLE_LANGUAGES: Comma separated locale codes (e.g., "en,ru,zh-CHS")
    /// - APP_LOCALE_CATALOG: Path to a JSON locale catalog
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("APP_SERVER_HOST") {
            self.server.host = host;
            tracing::info!("Override server.host from env: {}", self.server.host);
        }

        if let Ok(port) = std::env::var("APP_SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
            tracing::info!("Override server.port from env: {}", self.server.port);
        }

        if let Ok(level) = std::env::var("APP_LOG_LEVEL") {
            self.logging.level = level;
            tracing::info!("Override logging.level from env: {}", self.logging.level);
        }

        if let Ok(code) = std::env::var("APP_DEFAULT_LANGUAGE") {
            self.locale.default_language = code;
            tracing::info!(
                "Override locale.default_language from env: {}",
                self.locale.default_language
            );
        }

        if let Ok(codes) = std::env::var("APP_AVAILABLE_LANGUAGES") {
            self.locale.available_languages = parse_code_list(&codes);
            tracing::info!(
                "Override locale.available_languages from env: {:?}",
                self.locale.available_languages
            );
        }

        if let Ok(catalog) = std::env::var("APP_LOCALE_CATALOG") {
            tracing::info!("Override locale.catalog from env: {}", catalog);
            self.locale.catalog = Some(catalog);
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if let Some(catalog) = &self.locale.catalog
            && !Path::new(catalog).exists()
        {
            anyhow::bail!("Locale catalog not found: {}", catalog);
        }

        Ok(())
    }

    fn find_config_file() -> Option<String> {
        let possible_paths =
            ["conf/config.toml", "config.toml", "./conf/config.toml", "./config.toml"];

        for path in &possible_paths {
            if Path::new(path).exists() {
                return Some(path.to_string());
            }
        }
        None
    }

    fn from_toml(path: &str) -> Result<Self, anyhow::Error> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

impl LocaleConfig {
    /// Resolve this section into a mountable locale routing.
    ///
    /// Fails when the default language is unknown or the catalog cannot be
    /// loaded.
    pub fn build_routing(&self, on_locale_resolved: OnLocaleResolved) -> LocaleResult<LocaleRouting> {
        let custom;
        let registry = match &self.catalog {
            Some(path) => {
                custom = LocaleRegistry::from_file(path)?;
                &custom
            },
            None => LocaleRegistry::builtin(),
        };

        let config = RoutingConfig::configure(
            registry,
            &self.default_language,
            &self.available_languages,
            on_locale_resolved,
        )?;
        Ok(LocaleRouting::new(config))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 8080 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info,locale_router=debug".to_string(), file: None }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default_language: UNIVERSAL_DEFAULT_LOCALE.to_string(),
            available_languages: Vec::new(),
            catalog: None,
        }
    }
}

// =========================
// Helpers for parsing values
// =========================

fn parse_code_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

// Accept either a list of codes or "en, ru, zh-CHS"
fn deserialize_code_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct Visitor;
    impl<'de> serde::de::Visitor<'de> for Visitor {
        type Value = Vec<String>;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a list of locale codes or a string like 'en,ru,zh-CHS'")
        }
        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(parse_code_list(v))
        }
        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: serde::de::SeqAccess<'de>,
        {
            let mut codes = Vec::new();
            while let Some(code) = seq.next_element::<String>()? {
                codes.push(code);
            }
            Ok(codes)
        }
    }
    deserializer.deserialize_any(Visitor)
}
