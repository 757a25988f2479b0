//! Configuration: TOML file, environment overrides and credentials.
//!
//! Built once at startup and handed by reference to the store client. Nothing
//! else reads the environment.

mod credentials;
mod loader;
mod types;

pub use credentials::{CredentialStatus, SecureString};
pub use loader::{
    ConfigError, ConfigWarning, ENV_API_HOST, ENV_DATASET, ENV_PROJECT_ID, ENV_TOKEN,
};
pub use types::{Config, Defaults, StoreConfig};
