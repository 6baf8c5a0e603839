//! Errors raised while dispatching a tool call.
//!
//! Failures inside a tool (network, remote errors) are not `ToolError`s;
//! they come back as error results so the client can read the message.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool is registered under this name.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The arguments do not match the tool's parameter schema.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl ToolError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }
}
