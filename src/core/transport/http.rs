//! HTTP transport implementation.
//!
//! HTTP server with JSON-RPC over POST requests, so plain HTTP clients
//! (curl, browsers) can search festival listings without an MCP session.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::server::INSTRUCTIONS;

/// Protocol version reported to HTTP clients.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<serde_json::Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<serde_json::Value>, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<serde_json::Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32601, "Method not found")
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<serde_json::Value>) -> Self {
        Self::error(id, -32600, "Invalid Request")
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<serde_json::Value>, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    server: McpServer,
    rpc_path: String,
    session: Arc<RwLock<Option<SessionState>>>,
}

/// What the last `initialize` call told us about the client.
#[derive(Debug, Clone)]
struct SessionState {
    initialized: bool,
    client_name: Option<String>,
}

impl AppState {
    /// Create handler state around a server.
    pub fn new(server: McpServer, rpc_path: impl Into<String>) -> Self {
        Self {
            server,
            rpc_path: rpc_path.into(),
            session: Arc::new(RwLock::new(None)),
        }
    }
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let state = AppState::new(server, self.config.rpc_path.clone());

        // Build router
        let mut app = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state);

        // Add CORS if enabled
        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr, cors_status
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "rpc": state.rpc_path,
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0",
        "fringeMode": state.server.client().mode().as_str(),
        "documentation": format!("Send POST requests to {} with JSON-RPC messages", state.rpc_path)
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    tracing::Span::current().record("method", &request.method);
    info!("Received JSON-RPC request: {}", request.method);

    let response = process_request(&state, request).await;

    (StatusCode::OK, Json(response))
}

/// Process a JSON-RPC request and return the response.
pub async fn process_request(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    // Validate JSON-RPC version
    if request.jsonrpc != "2.0" {
        return JsonRpcResponse::invalid_request(request.id);
    }

    match request.method.as_str() {
        // Initialize the MCP session
        "initialize" => handle_initialize(state, request).await,

        // List available tools
        "tools/list" => handle_tools_list(state, request).await,

        // Call a tool
        "tools/call" => handle_tools_call(state, request).await,

        // List available resources
        "resources/list" => handle_resources_list(state, request).await,

        // List resource templates
        "resources/templates/list" => handle_resources_templates_list(state, request).await,

        // Read a resource
        "resources/read" => handle_resources_read(state, request).await,

        // Notifications (no response needed for stateless HTTP)
        method if method.starts_with("notifications/") => {
            handle_notification(state, &request).await;
            // Return empty success for notifications
            JsonRpcResponse::success(request.id, serde_json::json!(null))
        }

        // Unknown method
        _ => {
            warn!("Unknown method: {}", request.method);
            JsonRpcResponse::method_not_found(request.id)
        }
    }
}

/// Handle initialize request.
async fn handle_initialize(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing initialize request");

    let client_name = request
        .params
        .as_ref()
        .and_then(|p| p.pointer("/clientInfo/name"))
        .and_then(|v| v.as_str())
        .map(str::to_string);
    if let Some(name) = &client_name {
        info!("Client identified as {}", name);
    }

    *state.session.write().await = Some(SessionState {
        initialized: false,
        client_name,
    });

    let result = serde_json::json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": {},
            "resources": {}
        },
        "serverInfo": {
            "name": state.server.name(),
            "version": state.server.version()
        },
        "instructions": INSTRUCTIONS
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/list request.
async fn handle_tools_list(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/list request");

    let tools = state.server.list_tools();
    let result = serde_json::json!({
        "tools": tools
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle tools/call request.
async fn handle_tools_call(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing tools/call request");

    let params = match request.params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(request.id.clone(), "Missing params"),
    };

    let name = match params.get("name").and_then(|v| v.as_str()) {
        Some(n) => n.to_string(),
        None => return JsonRpcResponse::invalid_params(request.id.clone(), "Missing tool name"),
    };

    let arguments = params
        .get("arguments")
        .cloned()
        .unwrap_or(serde_json::json!({}));

    match state.server.call_tool(&name, arguments).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e) => JsonRpcResponse::invalid_params(request.id, e.to_string()),
    }
}

/// Handle resources/list request.
async fn handle_resources_list(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing resources/list request");

    let resources = state.server.list_resources().await;
    let result = serde_json::json!({
        "resources": resources
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle resources/templates/list request.
async fn handle_resources_templates_list(
    state: &AppState,
    request: JsonRpcRequest,
) -> JsonRpcResponse {
    info!("Processing resources/templates/list request");

    let templates = state.server.list_resource_templates().await;
    let result = serde_json::json!({
        "resourceTemplates": templates
    });

    JsonRpcResponse::success(request.id, result)
}

/// Handle resources/read request.
async fn handle_resources_read(state: &AppState, request: JsonRpcRequest) -> JsonRpcResponse {
    info!("Processing resources/read request");

    let params = match request.params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(request.id.clone(), "Missing params"),
    };

    let uri = match params.get("uri").and_then(|v| v.as_str()) {
        Some(u) => u.to_string(),
        None => return JsonRpcResponse::invalid_params(request.id.clone(), "Missing resource URI"),
    };

    match state.server.read_resource(&uri).await {
        Ok(result) => JsonRpcResponse::success(request.id, result),
        Err(e) => JsonRpcResponse::invalid_params(request.id, e.to_string()),
    }
}

/// Handle notifications (no response needed).
async fn handle_notification(state: &AppState, request: &JsonRpcRequest) {
    match request.method.as_str() {
        "notifications/initialized" => {
            let mut session = state.session.write().await;
            if let Some(s) = session.as_mut() {
                s.initialized = true;
                info!(
                    "Session initialized for {}",
                    s.client_name.as_deref().unwrap_or("unknown client")
                );
            }
        }
        _ => {
            info!("Received notification: {}", request.method);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::edfest::{Credentials, FestivalClient, Mode};
    use serde_json::json;

    fn test_state() -> AppState {
        let client =
            FestivalClient::new(Credentials::new("test_key", "test_secret").unwrap(), Mode::Demo)
                .unwrap();
        AppState::new(McpServer::with_client(Config::default(), client), "/mcp")
    }

    fn rpc(method: &str, params: serde_json::Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params: Some(params),
        }
    }

    #[test]
    fn test_error_response_shape() {
        let response = JsonRpcResponse::invalid_params(Some(json!(7)), "Missing tool name");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "error": { "code": -32602, "message": "Missing tool name" }
            })
        );
    }

    #[tokio::test]
    async fn test_initialize_reports_capabilities() {
        let state = test_state();
        let response = process_request(
            &state,
            rpc("initialize", json!({ "clientInfo": { "name": "curl" } })),
        )
        .await;

        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "edfest-mcp-server");
        assert!(result["capabilities"].get("prompts").is_none());

        let session = state.session.read().await;
        assert_eq!(
            session.as_ref().and_then(|s| s.client_name.as_deref()),
            Some("curl")
        );
    }

    #[tokio::test]
    async fn test_initialized_notification_marks_session() {
        let state = test_state();
        process_request(&state, rpc("initialize", json!({}))).await;
        process_request(&state, rpc("notifications/initialized", json!({}))).await;
        assert!(state.session.read().await.as_ref().unwrap().initialized);
    }

    #[tokio::test]
    async fn test_tools_list() {
        let response = process_request(&test_state(), rpc("tools/list", json!({}))).await;
        let tools = response.result.unwrap()["tools"].clone();
        assert_eq!(tools.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let response = process_request(
            &test_state(),
            rpc("tools/call", json!({ "name": "nope", "arguments": {} })),
        )
        .await;
        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert!(error.message.contains("nope"));
    }

    #[tokio::test]
    async fn test_resources_read() {
        let response = process_request(
            &test_state(),
            rpc("resources/read", json!({ "uri": "edfest://festivals" })),
        )
        .await;
        let result = response.result.unwrap();
        assert!(result["contents"][0]["text"]
            .as_str()
            .unwrap()
            .contains("demofringe"));
    }

    #[tokio::test]
    async fn test_rejects_wrong_jsonrpc_version() {
        let mut request = rpc("tools/list", json!({}));
        request.jsonrpc = "1.0".to_string();
        let response = process_request(&test_state(), request).await;
        assert_eq!(response.error.unwrap().code, -32600);
    }

    #[tokio::test]
    async fn test_prompts_are_not_served() {
        let response = process_request(&test_state(), rpc("prompts/list", json!({}))).await;
        assert_eq!(response.error.unwrap().code, -32601);
    }
}
