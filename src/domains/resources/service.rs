//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access.
//! Resources are defined in `definitions/` and registered via `registry.rs`.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use std::collections::HashMap;
use tracing::{debug, info};

use super::definitions::{FestivalCodesResource, ServerInfoResource};
use super::error::ResourceError;
use super::registry::{get_all_resource_templates, get_all_resources};
use crate::edfest::Mode;

/// Runtime facts exposed through the server info resource.
#[derive(Debug, Clone)]
pub struct ServerSummary {
    pub name: String,
    pub version: String,
    pub fringe_mode: Mode,
    pub base_url: String,
}

/// Service for managing and accessing resources.
pub struct ResourceService {
    summary: ServerSummary,

    /// Key: resource URI, Value: resource metadata
    resources: HashMap<String, ResourceEntry>,

    templates: Vec<ResourceTemplate>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Different types of resource content.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Static text content.
    Text(String),

    /// Dynamic content that requires computation.
    Dynamic(DynamicResourceType),
}

/// Types of dynamic resources.
#[derive(Debug, Clone)]
pub enum DynamicResourceType {
    /// Server name, version and client settings.
    ServerInfo,
}

impl ResourceService {
    /// Create a new ResourceService describing the given server.
    pub fn new(summary: ServerSummary) -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            summary,
            resources: HashMap::new(),
            templates: get_all_resource_templates(),
        };

        for entry in get_all_resources() {
            service.register_resource(entry);
        }

        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        debug!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        let mut resources: Vec<_> = self
            .resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect();
        resources.sort_by(|a, b| a.raw.uri.cmp(&b.raw.uri));
        resources
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates.clone()
    }

    /// Read a resource by URI.
    ///
    /// Besides the registered URIs, `edfest://festivals/{code}` resolves to a
    /// single festival entry.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let content = match self.resources.get(uri) {
            Some(entry) => match &entry.content {
                ResourceContent::Text(text) => ResourceContents::text(text, uri),
                ResourceContent::Dynamic(dynamic_type) => {
                    self.resolve_dynamic_content(uri, dynamic_type)?
                }
            },
            None => {
                let festival = FestivalCodesResource::code_from_uri(uri)
                    .and_then(FestivalCodesResource::find)
                    .ok_or_else(|| ResourceError::not_found(uri))?;
                ResourceContents::text(serde_json::to_string_pretty(festival)?, uri)
            }
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }

    fn resolve_dynamic_content(
        &self,
        uri: &str,
        dynamic_type: &DynamicResourceType,
    ) -> Result<ResourceContents, ResourceError> {
        let value = match dynamic_type {
            DynamicResourceType::ServerInfo => ServerInfoResource::render(&self.summary),
        };

        Ok(ResourceContents::text(
            serde_json::to_string_pretty(&value)?,
            uri,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> ResourceService {
        ResourceService::new(ServerSummary {
            name: "edfest-mcp-server".to_string(),
            version: "0.1.0".to_string(),
            fringe_mode: Mode::Demo,
            base_url: "https://api.edinburghfestivalcity.com".to_string(),
        })
    }

    fn text_of(result: &ReadResourceResult) -> String {
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, .. } => text.clone(),
            _ => panic!("expected text contents"),
        }
    }

    #[tokio::test]
    async fn test_resource_service_creation() {
        let resources = test_service().list_resources().await;
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].raw.uri, "edfest://festivals");
    }

    #[tokio::test]
    async fn test_read_festival_codes() {
        let result = test_service()
            .read_resource("edfest://festivals")
            .await
            .unwrap();
        let codes: serde_json::Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(codes.as_array().map(Vec::len), Some(13));
        assert_eq!(codes[0]["code"], "fringe");
    }

    #[tokio::test]
    async fn test_read_server_info() {
        let result = test_service()
            .read_resource("mcp://server/info")
            .await
            .unwrap();
        let info: serde_json::Value = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(info["fringe_mode"], "demo");
        assert_eq!(info["version"], "0.1.0");
    }

    #[tokio::test]
    async fn test_read_single_festival() {
        let result = test_service()
            .read_resource("edfest://festivals/hogmanay")
            .await
            .unwrap();
        assert!(text_of(&result).contains("Edinburgh's Hogmanay"));
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let service = test_service();
        assert!(matches!(
            service.read_resource("mcp://server/nonexistent").await,
            Err(ResourceError::NotFound(_))
        ));
        assert!(service
            .read_resource("edfest://festivals/glastonbury")
            .await
            .is_err());
    }
}
