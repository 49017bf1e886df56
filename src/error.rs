//! Error types for the kondate generation pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Output document storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not readable at {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Document at {path:?} is not valid JSON: {message}")]
    Malformed { path: PathBuf, message: String },

    #[error("Failed to serialize document: {0}")]
    Serialization(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Pipeline-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Provider request failed: {0}")]
    ProviderRequestFailed(String),

    #[error("Provider authentication failed: {0}")]
    ProviderAuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    ProviderRateLimit(String),

    #[error("Provider model not found: {0}")]
    ProviderModelNotFound(String),

    #[error("Unparsable generation response: {0}")]
    ResponseParse(String),

    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

impl ApiError {
    /// True for failures raised by the backend exchange itself (transport, status codes),
    /// as opposed to content that came back but could not be parsed.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ApiError::ProviderError(_)
                | ApiError::ProviderRequestFailed(_)
                | ApiError::ProviderAuthFailed(_)
                | ApiError::ProviderRateLimit(_)
                | ApiError::ProviderModelNotFound(_)
        )
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::ResponseParse(err.to_string())
    }
}
