use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_BACKGROUND_URL: &str =
    "https://backend.ofen.de/media/image/63/2e/5c/Grafik-fuer-Preisschildchen-unten.png";
pub const DEFAULT_BACKGROUND_FALLBACK_URL: &str =
    "https://www.ofen.de/media/image/63/2e/5c/Grafik-fuer-Preisschildchen-unten.png";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub base: BaseConfig,
    pub server: ServerConfig,
    pub scraper: ScraperConfig,
    pub document: DocumentConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaseConfig {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentConfig {
    pub background_url: String,
    pub background_fallback_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            base: BaseConfig {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            server: ServerConfig {
                bind: "127.0.0.1:8080".to_string(),
            },
            scraper: ScraperConfig {
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
            document: DocumentConfig {
                background_url: DEFAULT_BACKGROUND_URL.to_string(),
                background_fallback_url: DEFAULT_BACKGROUND_FALLBACK_URL.to_string(),
            },
        }
    }
}

/// Loads the settings file (optional) and `APP_*` environment overrides on top of the defaults.
///
/// Nested keys use a double underscore, e.g. `APP_SERVER__BIND=0.0.0.0:8080`.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let defaults = AppConfig::default();

    let settings = Config::builder()
        .set_default("base.name", defaults.base.name)?
        .set_default("base.version", defaults.base.version)?
        .set_default("server.bind", defaults.server.bind)?
        .set_default("scraper.user_agent", defaults.scraper.user_agent)?
        .set_default("document.background_url", defaults.document.background_url)?
        .set_default(
            "document.background_fallback_url",
            defaults.document.background_fallback_url,
        )?
        .add_source(File::new(path, FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<AppConfig>()
}
