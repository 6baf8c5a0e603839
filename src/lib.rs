//! Edinburgh Festivals MCP Server Library
//!
//! A Model Context Protocol server that searches Edinburgh festival event
//! and venue listings through the signed Edinburgh Festivals API.
//!
//! # Architecture
//!
//! - **edfest**: the signed API client (query rewriting, HMAC-SHA1 request
//!   signing, HTTP dispatch, diagnostic request log)
//! - **core**: configuration, error handling, the MCP server and transports
//! - **domains**: MCP-facing business logic
//!   - **tools**: the events and venues search tools
//!   - **resources**: festival codes and server information
//!
//! # Example
//!
//! ```rust,no_run
//! use edfest_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> edfest_mcp_server::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;
pub mod edfest;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use edfest::{Credentials, FestivalClient, Mode};
