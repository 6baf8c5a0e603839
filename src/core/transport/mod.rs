//! Transports carrying MCP messages between clients and [`McpServer`].
//!
//! | Transport | Feature | `MCP_TRANSPORT` | Sessions |
//! |-----------|---------|-----------------|----------|
//! | STDIO     | `stdio` (default) | unset / `stdio` | one |
//! | TCP       | `tcp`   | `tcp`           | one per connection |
//! | HTTP      | `http`  | `http`          | stateless JSON-RPC over POST |
//!
//! All of them share the server's single festivals API client.
//!
//! [`McpServer`]: crate::core::McpServer

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
