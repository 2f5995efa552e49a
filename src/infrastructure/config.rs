// Configuration loading: config/dashboard.toml layered under DASHBOARD__* env vars
use crate::application::refresher::DEFAULT_POLL_INTERVAL;
use crate::domain::money::{Currency, Locale};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "config/dashboard";
pub const DATA_PATH: &str = "/dashboard/restaurant/data";

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub poll: PollSettings,
    #[serde(default)]
    pub currency: CurrencySettings,
    #[serde(default)]
    pub theme: ThemeSettings,
    #[serde(default)]
    pub seed_path: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

/// Where chart payloads come from.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceSettings {
    Http {
        base_url: String,
        #[serde(default = "default_connect_timeout_ms")]
        connect_timeout_ms: u64,
        #[serde(default = "default_request_timeout_ms")]
        request_timeout_ms: u64,
    },
    Ledger {
        path: String,
    },
}

impl Default for SourceSettings {
    fn default() -> Self {
        SourceSettings::Http {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollSettings {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl PollSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CurrencySettings {
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub code: Currency,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeSettings {
    #[serde(default = "default_store_path")]
    pub store_path: String,
    #[serde(default = "default_hue")]
    pub default_hue: u16,
    #[serde(default = "default_intensity")]
    pub default_intensity: u8,
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            default_hue: default_hue(),
            default_intensity: default_intensity(),
            font_family: default_font_family(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_connect_timeout_ms() -> u64 {
    2_000
}

fn default_request_timeout_ms() -> u64 {
    5_000
}

fn default_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL.as_secs()
}

fn default_store_path() -> String {
    "data/preferences.toml".to_string()
}

fn default_hue() -> u16 {
    crate::domain::theme::DEFAULT_HUE
}

fn default_intensity() -> u8 {
    crate::domain::theme::DEFAULT_INTENSITY
}

fn default_font_family() -> String {
    "system-ui, sans-serif".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration from `<path>.toml` (optional) and the environment.
///
/// Nested keys use a double underscore, e.g. `DASHBOARD__POLL__INTERVAL_SECS=5`.
pub fn load_config(path: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Parse configuration from TOML text.
pub fn parse_config(text: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(text, config::FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Read the embedded seed document, if one is configured and readable.
pub fn read_seed(path: Option<&str>) -> Option<String> {
    let path = path?;
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!("No seed payload at {}: {}", path, e);
            None
        }
    }
}
