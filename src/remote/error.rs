//! Error types for remote store access.

use thiserror::Error;

/// Errors raised by a [`RecordStore`](super::RecordStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Required startup configuration is missing or unusable
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Write attempted without a token; raised before any request is sent
    #[error("A write token is required to {operation} records")]
    Authorization { operation: &'static str },

    /// Target identity does not exist
    #[error("Record '{id}' not found")]
    NotFound { id: String },

    /// The store rejected the payload
    #[error("Rejected by the store: {message}")]
    Validation { message: String },

    /// The store answered with an error status
    #[error("Store error: {status} - {message}")]
    Remote { status: u16, message: String },

    /// The request never got an answer
    #[error("Connection to the store failed: {source}")]
    Connection {
        #[source]
        source: reqwest::Error,
    },

    /// The answer could not be understood
    #[error("Unexpected response from the store: {0}")]
    Decode(String),
}

impl StoreError {
    /// Short machine-readable kind, used in logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            StoreError::Configuration { .. } => "configuration_error",
            StoreError::Authorization { .. } => "authorization_error",
            StoreError::NotFound { .. } => "not_found",
            StoreError::Validation { .. } => "validation_error",
            StoreError::Remote { .. } => "remote_error",
            StoreError::Connection { .. } => "connection_error",
            StoreError::Decode(_) => "decode_error",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
