//! Write credential handling.
//!
//! The store token is only needed for writes. It is wrapped so that it never
//! ends up in logs or debug output.

use serde::{Deserialize, Serialize};

use super::types::StoreConfig;

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when sending it to the store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to the store.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Whether writes can be attempted.
#[derive(Debug, Clone)]
pub enum CredentialStatus {
    /// Token present and non-empty.
    Configured(SecureString),
    /// Token missing or blank. Reads still work.
    Unconfigured {
        /// Reason for missing configuration.
        reason: String,
    },
}

impl StoreConfig {
    /// Resolve the write credential.
    pub fn write_credential(&self) -> CredentialStatus {
        match &self.token {
            Some(token) if !token.expose().trim().is_empty() => {
                CredentialStatus::Configured(token.clone())
            }
            Some(_) => CredentialStatus::Unconfigured {
                reason: "token is empty".to_string(),
            },
            None => CredentialStatus::Unconfigured {
                reason: "token is not set".to_string(),
            },
        }
    }

    pub fn can_write(&self) -> bool {
        matches!(self.write_credential(), CredentialStatus::Configured(_))
    }
}
