//! Error types for the MCP server.
//!
//! [`Error`] gathers the failures of every layer so the binary can report
//! them through one type: festivals API client setup, tool dispatch,
//! resource lookup and the transport.

use thiserror::Error;

use super::transport::TransportError;
use crate::domains::{resources::ResourceError, tools::ToolError};
use crate::edfest::ClientError;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// The festivals API client could not be built or a request failed.
    #[error("Festival API error: {0}")]
    Client(#[from] ClientError),

    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    /// Error originating from the resources domain.
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    /// The transport failed to start or stopped with an error.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}
