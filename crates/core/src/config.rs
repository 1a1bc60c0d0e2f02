//! Config file parsing for `~/.config/novel-sources/config.toml`.
//!
//! `load_config` never fails: a missing or unreadable file yields defaults.
//! Environment overrides are applied on top with `AppConfig::apply_env`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sources::flask_novel_reader::DEFAULT_BASE_URL;

/// Overrides the Flask Novel Reader base url.
pub const FLASK_BASE_URL_ENV: &str = "NOVEL_SOURCES_FLASK_BASE_URL";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_user_agent() -> String {
    concat!("novel-sources/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_flask_base_url")]
    pub flask_novel_reader_base_url: String,
}

fn default_flask_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            flask_novel_reader_base_url: default_flask_base_url(),
        }
    }
}

impl AppConfig {
    /// Apply environment overrides (see [`FLASK_BASE_URL_ENV`]).
    pub fn apply_env(mut self) -> Self {
        if let Ok(url) = std::env::var(FLASK_BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.sources.flask_novel_reader_base_url = url.trim().to_string();
            }
        }
        self
    }

    /// Set a value by dot-separated key, e.g. `network.timeout_secs`.
    pub fn set_key(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "network.timeout_secs" => {
                self.network.timeout_secs = value.parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })?;
            }
            "network.user_agent" => self.network.user_agent = value.to_string(),
            "sources.flask_novel_reader_base_url" => {
                self.sources.flask_novel_reader_base_url = value.trim_end_matches('/').to_string()
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Return the default config file path.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut p| {
        p.push("novel-sources");
        p.push("config.toml");
        p
    })
}

/// Load config from the default path, falling back to defaults.
pub fn load_config() -> AppConfig {
    let Some(path) = config_path() else {
        return AppConfig::default();
    };
    match load_config_from(&path) {
        Ok(cfg) => cfg,
        Err(ConfigError::Io(_)) => AppConfig::default(),
        Err(e) => {
            tracing::warn!("Ignoring {}: {}", path.display(), e);
            AppConfig::default()
        }
    }
}

/// Load config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Write config to `path`, creating parent directories.
pub fn save_config(cfg: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, cfg.to_toml()?)?;
    Ok(())
}
