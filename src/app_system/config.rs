use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::backend::http::DEFAULT_BASE_URL;

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Client settings.
///
/// Sources, later ones winning: built-in defaults, an optional `catalog.toml`
/// (or any format the `config` crate recognises) in the working directory,
/// then `CATALOG_*` environment variables such as `CATALOG_BASE_URL`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClientConfig {
    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("log_filter", DEFAULT_LOG_FILTER)
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Environment::with_prefix("CATALOG").try_parsing(true))
    }

    fn load_from(env: Environment) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::with_name("catalog").required(false))
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}
