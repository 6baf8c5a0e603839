//! Edinburgh festival venues search tool.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{error, info, instrument};

use super::common::{
    body_result, default_festival, default_page, default_page_size, default_year, error_result,
};
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;
use crate::edfest::{FestivalClient, Pagination, QueryParams};

/// Parameters for the venues search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FestivalVenuesParams {
    #[schemars(description = "The festival to search venues in (default: international)")]
    #[serde(default = "default_festival")]
    pub festival: String,

    #[schemars(description = "Festival year, or '*' for all years (default: 2025)")]
    #[serde(default = "default_year")]
    pub year: String,

    #[schemars(description = "Postcode to filter venues by")]
    #[serde(default)]
    pub postcode: Option<String>,

    #[schemars(description = "Name of the venue to search for")]
    #[serde(default)]
    pub name: Option<String>,

    #[schemars(description = "Results per page (default: 25, max: 100)")]
    #[serde(default = "default_page_size")]
    pub size: u32,

    #[schemars(description = "Page number, starting at 1 (default: 1)")]
    #[serde(default = "default_page")]
    pub page: u32,
}

impl FestivalVenuesParams {
    /// Translate tool arguments into API query parameters.
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new()
            .with("festival", self.festival.as_str())
            .with("year", self.year.as_str());
        query.insert_opt("postcode", self.postcode.clone());
        query.insert_opt("name", self.name.clone());
        Pagination::new(self.size, self.page).apply(&mut query);
        query
    }
}

/// Festival venues search tool.
#[derive(Debug, Clone)]
pub struct FestivalVenuesTool;

impl FestivalVenuesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "edinburgh_festival_venues";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search Edinburgh festival venues by festival, year, \
         postcode or name. Returns the festivals API response unchanged as JSON.";

    #[instrument(skip_all, fields(festival = %params.festival, year = %params.year))]
    pub async fn execute(params: &FestivalVenuesParams, client: &FestivalClient) -> CallToolResult {
        info!("Searching festival venues");

        match client.venues(params.to_query()).await {
            Ok(body) => body_result(body),
            Err(e) => {
                error!("Venue search failed: {}", e);
                error_result(&format!("Venue search failed: {e}"))
            }
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: Arc<FestivalClient>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: FestivalVenuesParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        let result = Self::execute(&params, &client).await;
        Ok(super::common::result_to_json(result))
    }

    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FestivalVenuesParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(client: Arc<FestivalClient>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let client = client.clone();
            async move {
                let params: FestivalVenuesParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}
