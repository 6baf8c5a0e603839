//! Festival search tools exposed to MCP clients.
//!
//! - `definitions/festival/` - the events and venues tools, one file each
//! - `router.rs` - `ToolRouter` for the STDIO and TCP transports
//! - `registry.rs` - tool listing and HTTP dispatch
//! - `error.rs` - dispatch errors
//!
//! A new tool needs a definition exporting `execute`, `http_handler`,
//! `to_tool` and `create_route`, a route in `router.rs` and an entry in
//! `registry.rs`.

pub mod definitions;
mod error;
mod registry;
pub mod router;

pub use error::ToolError;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
