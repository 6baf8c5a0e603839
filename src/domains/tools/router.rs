//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Each tool knows how to create its own route; the router only wires the
//! shared festivals API client into them.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{FestivalEventsTool, FestivalVenuesTool};
use crate::edfest::FestivalClient;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(client: Arc<FestivalClient>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(FestivalEventsTool::create_route(client.clone()))
        .with_route(FestivalVenuesTool::create_route(client))
}
