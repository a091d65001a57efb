mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Loads configuration from `CONFIG_PATH` (default `config.yaml`) and applies
/// environment overrides. A missing default file falls back to built-in
/// defaults; a missing file named by `CONFIG_PATH` is an error.
pub async fn load() -> Result<Config> {
    let explicit_path = env::var("CONFIG_PATH").ok();
    let config_path = explicit_path
        .clone()
        .unwrap_or_else(|| "config.yaml".to_string());

    let mut config = if explicit_path.is_none() && !Path::new(&config_path).exists() {
        info!("No {} found, using default configuration", config_path);
        Config::default()
    } else {
        load_from(&config_path).await?
    };

    config.apply_overrides(|key| env::var(key).ok());
    config.validate()?;

    Ok(config)
}

pub async fn load_from(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    Config::from_yaml(&config_str)
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Overrides values from a variable lookup, normally the process
    /// environment.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup(API_KEY_ENV).filter(|key| !key.is_empty()) {
            debug!("Using Gemini API key from {}", API_KEY_ENV);
            self.gemini.api_key = api_key;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.gemini.api_key.trim().is_empty() {
            return Err(Error::config(format!(
                "missing Gemini API key: set {} or gemini.api_key",
                API_KEY_ENV
            )));
        }

        if !self.server.endpoint.starts_with('/') {
            return Err(Error::config(format!(
                "server.endpoint must start with '/': {}",
                self.server.endpoint
            )));
        }

        if self.gemini.model.trim().is_empty() {
            return Err(Error::config("gemini.model must not be empty"));
        }

        Ok(())
    }
}

impl LogsConfig {
    /// Log filter from `directives` (normally `RUST_LOG`) or, when absent, the
    /// configured level. Full directives such as
    /// `gemini_agent=debug,tower_http=info` are accepted.
    pub fn env_filter(&self, directives: Option<&str>) -> Result<EnvFilter> {
        let directives = directives.unwrap_or(self.level.as_str());

        EnvFilter::try_new(directives)
            .map_err(|e| Error::config(format!("invalid log filter '{}': {}", directives, e)))
    }
}
