//! Domains module containing business logic organized by bounded contexts.
//!
//! - `tools`: the festival search tools exposed to MCP clients
//! - `resources`: read-only reference data

pub mod resources;
pub mod tools;
