//! Server info resource definition.

use serde_json::{Value, json};

use super::ResourceDefinition;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent, ServerSummary};

/// Server information resource (dynamic).
pub struct ServerInfoResource;

impl ServerInfoResource {
    /// Render the server summary. Credentials are never included.
    pub fn render(summary: &ServerSummary) -> Value {
        json!({
            "server": summary.name,
            "version": summary.version,
            "fringe_mode": summary.fringe_mode.as_str(),
            "base_url": summary.base_url,
        })
    }
}

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "mcp://server/info";
    const NAME: &'static str = "Server Information";
    const DESCRIPTION: &'static str =
        "Server name, version, fringe mode and festivals API endpoint";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::ServerInfo)
    }
}
