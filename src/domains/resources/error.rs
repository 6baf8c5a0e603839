//! Errors returned when reading a resource.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource or festival matches the URI.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Dynamic content could not be rendered.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResourceError {
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }
}

impl From<serde_json::Error> for ResourceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Internal(e.to_string())
    }
}
