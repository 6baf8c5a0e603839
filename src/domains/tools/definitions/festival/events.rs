//! Edinburgh festival events search tool.
//!
//! Maps named, human-readable arguments onto the events endpoint of the
//! festivals API. Unset filters are left out of the request entirely.

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
    body_result, default_datetime, default_festival, default_page, default_page_size,
    default_year, error_result,
};
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;
use crate::edfest::{FestivalClient, Pagination, QueryParams};

/// Parameters for the events search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FestivalEventsParams {
    /// Start of the date range.
    #[schemars(
        description = "An optional ISO8601-like timestamp, e.g. '2025-08-12 00:00:00' (default: 2025-09-01)"
    )]
    #[serde(default = "default_datetime")]
    pub datetime_from: String,

    /// End of the date range.
    #[schemars(
        description = "An optional ISO8601-like timestamp, e.g. '2025-08-12 23:59:59' (default: 2025-09-01)"
    )]
    #[serde(default = "default_datetime")]
    pub datetime_to: String,

    #[schemars(
        description = "Festival code: fringe, demofringe, jazz, book, international, tattoo, art, hogmanay, science, imaginate, film, mela, storytelling (default: international)"
    )]
    #[serde(default = "default_festival")]
    pub festival: String,

    #[schemars(description = "Festival year, or '*' for all years (default: 2025)")]
    #[serde(default = "default_year")]
    pub year: String,

    #[schemars(
        description = "Genre of the show. Varies by festival but may include comedy, theatre etc."
    )]
    #[serde(default)]
    pub genre: Option<String>,

    #[schemars(description = "Name of the venue hosting the show")]
    #[serde(default)]
    pub venue_name: Option<String>,

    #[schemars(description = "Free text matched against the show description")]
    #[serde(default)]
    pub search_text: Option<String>,

    #[schemars(description = "Name of an artist or performer to search for")]
    #[serde(default)]
    pub artist: Option<String>,

    #[schemars(description = "Title of the show to search for")]
    #[serde(default)]
    pub title: Option<String>,

    #[schemars(description = "Results per page (default: 25, max: 100)")]
    #[serde(default = "default_page_size")]
    pub size: u32,

    #[schemars(description = "Page number, starting at 1 (default: 1)")]
    #[serde(default = "default_page")]
    pub page: u32,
}

impl FestivalEventsParams {
    /// Translate tool arguments into API query parameters.
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new()
            .with("festival", self.festival.as_str())
            .with("year", self.year.as_str())
            .with("date_from", self.datetime_from.as_str())
            .with("date_to", self.datetime_to.as_str());
        query.insert_opt("genre", self.genre.clone());
        query.insert_opt("venue_name", self.venue_name.clone());
        query.insert_opt("description", self.search_text.clone());
        query.insert_opt("artist", self.artist.clone());
        query.insert_opt("title", self.title.clone());
        Pagination::new(self.size, self.page).apply(&mut query);
        query
    }
}

/// Festival events search tool.
#[derive(Debug, Clone)]
pub struct FestivalEventsTool;

impl FestivalEventsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "edinburgh_festival_events";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search Edinburgh festival events. Filter by festival, \
         date range, genre, venue, title, artist or free text. Returns the festivals API \
         response unchanged as JSON.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(festival = %params.festival, year = %params.year))]
    pub async fn execute(params: &FestivalEventsParams, client: &FestivalClient) -> CallToolResult {
        info!("Searching festival events");

        match client.events(params.to_query()).await {
            Ok(body) => body_result(body),
            Err(e) => {
                error!("Event search failed: {}", e);
                error_result(&format!("Event search failed: {e}"))
            }
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        client: Arc<FestivalClient>,
    ) -> Result<serde_json::Value, ToolError> {
        let params: FestivalEventsParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        let result = Self::execute(&params, &client).await;
        Ok(super::common::result_to_json(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<FestivalEventsParams>(),
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
                let params: FestivalEventsParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                Ok(Self::execute(&params, &client).await)
            }
            .boxed()
        })
    }
}
