//! Resources domain module.
//!
//! Resources are read-only reference data for MCP clients: the festival
//! codes accepted by the search tools and a description of the running
//! server.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual resource definitions (one file per resource)
//! - `registry.rs` - Central resource registration
//! - `service.rs` - Resource service for listing and reading

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::ResourceDefinition;
pub use error::ResourceError;
pub use registry::{get_all_resources, resource_uris};
pub use service::{
    DynamicResourceType, ResourceContent, ResourceEntry, ResourceService, ServerSummary,
};
