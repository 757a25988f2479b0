use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::credentials::SecureString;
use crate::config::types::Config;

pub const ENV_PROJECT_ID: &str = "STOCKMANAGER_PROJECT_ID";
pub const ENV_DATASET: &str = "STOCKMANAGER_DATASET";
pub const ENV_TOKEN: &str = "STOCKMANAGER_TOKEN";
pub const ENV_API_HOST: &str = "STOCKMANAGER_API_HOST";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

/// Settings that are missing but do not prevent startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No project id and no host override: every call will fail.
    MissingProjectId,
    /// No write token: reads work, writes fail fast.
    MissingToken,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::MissingProjectId => write!(
                f,
                "store.project_id is not set (or {}); the store cannot be reached",
                ENV_PROJECT_ID
            ),
            ConfigWarning::MissingToken => write!(
                f,
                "store.token is not set (or {}); write operations will fail",
                ENV_TOKEN
            ),
        }
    }
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/stockmanager/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("stockmanager").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Applies `STOCKMANAGER_*` environment variables on top of the file.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup`; blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(project_id) = get(ENV_PROJECT_ID) {
            self.store.project_id = Some(project_id);
        }
        if let Some(dataset) = get(ENV_DATASET) {
            self.store.dataset = dataset;
        }
        if let Some(token) = get(ENV_TOKEN) {
            self.store.token = Some(SecureString::new(token));
        }
        if let Some(api_host) = get(ENV_API_HOST) {
            self.store.api_host = Some(api_host);
        }
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The dataset name is not empty
    /// - The API version is `YYYY-MM-DD` (or `1`)
    /// - Timeouts are non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.dataset.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "store.dataset must not be empty".to_string(),
            });
        }

        if !is_api_version(&self.store.api_version) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "store.api_version '{}' must be a date like 2024-01-01",
                    self.store.api_version
                ),
            });
        }

        if self.defaults.timeout_seconds == 0 || self.defaults.connect_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "timeouts must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Missing settings that only degrade functionality.
    pub fn warnings(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let has_project = self
            .store
            .project_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty());
        if !has_project && self.store.api_host.is_none() {
            warnings.push(ConfigWarning::MissingProjectId);
        }
        if !self.store.can_write() {
            warnings.push(ConfigWarning::MissingToken);
        }
        warnings
    }
}

fn is_api_version(version: &str) -> bool {
    if version == "1" {
        return true;
    }
    let bytes = version.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
