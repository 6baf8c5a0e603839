//! Festival API client error types.

use thiserror::Error;

/// A specialized Result type for festival API client operations.
pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Errors that can occur while building, signing or dispatching a request.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing or invalid client configuration (credentials, base URL).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A query parameter could not be canonicalized.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Transport-level failure (connection refused, timeout, DNS).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The remote service answered with a body that is not valid JSON.
    #[error("Remote error (HTTP {status}): {message}")]
    Remote { status: u16, message: String },
}

impl ClientError {
    /// Create a new configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a new encoding error.
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Create a new remote error.
    pub fn remote(status: u16, msg: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: msg.into(),
        }
    }
}
