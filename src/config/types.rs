use serde::{Deserialize, Serialize};

use super::credentials::SecureString;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub defaults: Defaults,
}

/// Connection settings for the remote document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Project identifier (e.g., "a1b2c3d4").
    #[serde(default)]
    pub project_id: Option<String>,
    /// Dataset holding the records (default: "production").
    #[serde(default = "default_dataset")]
    pub dataset: String,
    /// Dated API version (default: "2024-01-01").
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Read through the CDN. Writes never use it.
    #[serde(default)]
    pub use_cdn: bool,
    /// Write token. Reads work without it.
    #[serde(default)]
    pub token: Option<SecureString>,
    /// Overrides the project-derived host (scheme + host + port).
    #[serde(default)]
    pub api_host: Option<String>,
}

/// Client-side limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Defaults {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

fn default_dataset() -> String {
    "production".to_string()
}

fn default_api_version() -> String {
    "2024-01-01".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            dataset: default_dataset(),
            api_version: default_api_version(),
            use_cdn: false,
            token: None,
            api_host: None,
        }
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}
