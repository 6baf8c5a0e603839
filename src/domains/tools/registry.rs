//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

#[cfg(feature = "http")]
use super::ToolError;
use super::definitions::{FestivalEventsTool, FestivalVenuesTool};
use crate::edfest::FestivalClient;

/// Tool registry - manages all available tools.
///
/// Holds the shared festivals API client so HTTP dispatch can hand it to
/// each tool handler.
pub struct ToolRegistry {
    client: Arc<FestivalClient>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(client: Arc<FestivalClient>) -> Self {
        Self { client }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![FestivalEventsTool::NAME, FestivalVenuesTool::NAME]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![FestivalEventsTool::to_tool(), FestivalVenuesTool::to_tool()]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        match name {
            FestivalEventsTool::NAME => {
                FestivalEventsTool::http_handler(arguments, self.client.clone()).await
            }
            FestivalVenuesTool::NAME => {
                FestivalVenuesTool::http_handler(arguments, self.client.clone()).await
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
