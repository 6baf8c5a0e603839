//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to domain-specific services.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool defines:
//! - Parameters struct (for rmcp)
//! - `execute()` method (core logic, shared by every transport)
//! - `http_handler()` method (called via ToolRegistry for HTTP transport)
//!
//! Every tool shares one [`FestivalClient`], built from the festival section
//! of the configuration when the server starts.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{
    resources::{ResourceService, ServerSummary},
    tools::build_tool_router,
};
use crate::edfest::FestivalClient;

#[cfg(feature = "http")]
use crate::domains::tools::{ToolError, ToolRegistry};

/// Instructions sent to clients during initialization.
pub const INSTRUCTIONS: &str = "Search Edinburgh festival listings. Use \
    edinburgh_festival_events to find shows by festival, date range, genre, venue, title, \
    artist or free text, and edinburgh_festival_venues to find venues. Read the \
    edfest://festivals resource for the list of festival codes.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and coordinates
/// between different domain services to handle MCP protocol messages.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Signed festivals API client shared by every tool.
    client: Arc<FestivalClient>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails when the festivals API client cannot be built, most often
    /// because the API key or secret is missing.
    pub fn new(config: Config) -> super::Result<Self> {
        let client = config.festival.build_client()?;
        Ok(Self::with_client(config, client))
    }

    /// Create a server around an already configured client.
    pub fn with_client(config: Config, client: FestivalClient) -> Self {
        let config = Arc::new(config);
        let client = Arc::new(client);

        let resource_service = Arc::new(ResourceService::new(ServerSummary {
            name: config.server.name.clone(),
            version: config.server.version.clone(),
            fringe_mode: client.mode(),
            base_url: client.base_url().to_string(),
        }));

        Self {
            tool_router: build_tool_router::<Self>(client.clone()),
            config,
            client,
            resource_service,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the festivals API client.
    pub fn client(&self) -> &Arc<FestivalClient> {
        &self.client
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        ToolRegistry::new(self.client.clone())
            .call_tool(name, arguments)
            .await
    }

    /// List all available resources (for HTTP transport).
    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        let resources = self.resource_service.list_resources().await;

        resources
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    pub async fn read_resource(&self, uri: &str) -> Result<serde_json::Value, String> {
        match self.resource_service.read_resource(uri).await {
            Ok(result) => Ok(serde_json::json!({
                "contents": result.contents
            })),
            Err(e) => Err(e.to_string()),
        }
    }

    /// List all available resource templates (for HTTP transport).
    pub async fn list_resource_templates(&self) -> Vec<serde_json::Value> {
        let templates = self.resource_service.list_resource_templates().await;

        templates
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "uriTemplate": t.raw.uri_template,
                    "name": t.raw.name,
                    "title": t.raw.title,
                    "description": t.raw.description,
                    "mimeType": t.raw.mime_type
                })
            })
            .collect()
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        let templates = self.resource_service.list_resource_templates().await;
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }
}
