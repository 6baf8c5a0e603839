//! Common utilities shared across festival search tools.
//!
//! Default argument values, result formatting and error helpers.

use rmcp::model::{CallToolResult, Content};
use serde_json::Value;
use tracing::warn;

use crate::edfest::policy::DEFAULT_PAGE_SIZE;

/// Default festival searched when none is given.
pub fn default_festival() -> String {
    "international".to_string()
}

/// Default festival year.
pub fn default_year() -> String {
    "2025".to_string()
}

/// Default bound of the event date range.
pub fn default_datetime() -> String {
    "2025-09-01".to_string()
}

/// Default number of results per page.
pub fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Default page (1-based).
pub fn default_page() -> u32 {
    1
}

/// Create an error result with a formatted message.
pub fn error_result(message: &str) -> CallToolResult {
    warn!("{}", message);
    CallToolResult::error(vec![Content::text(message.to_string())])
}

/// Return a decoded API body to the client as-is.
///
/// The body is sent as JSON text; objects are also attached as structured
/// content. Array bodies (the events endpoint returns a list) stay text-only.
pub fn body_result(body: Value) -> CallToolResult {
    let text = match serde_json::to_string(&body) {
        Ok(text) => text,
        Err(e) => return error_result(&format!("Failed to serialize response: {e}")),
    };

    let structured_content = if body.is_object() { Some(body) } else { None };

    CallToolResult {
        content: vec![Content::text(text)],
        structured_content,
        is_error: Some(false),
        meta: None,
    }
}

/// Convert a tool result into the JSON shape used by the HTTP transport.
#[cfg(feature = "http")]
pub fn result_to_json(result: CallToolResult) -> Value {
    let mut response = serde_json::json!({
        "content": result.content,
        "isError": result.is_error.unwrap_or(false)
    });

    if let (Some(structured), Some(object)) =
        (result.structured_content, response.as_object_mut())
    {
        object.insert("structuredContent".to_string(), structured);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use serde_json::json;

    fn text_of(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            _ => panic!("expected text content"),
        }
    }

    #[test]
    fn test_body_result_object() {
        let body = json!({ "error": "API Error" });
        let result = body_result(body.clone());
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content, Some(body));
        assert_eq!(text_of(&result), r#"{"error":"API Error"}"#);
    }

    #[test]
    fn test_body_result_array() {
        let result = body_result(json!([{ "title": "Hamlet" }]));
        assert!(result.structured_content.is_none());
        assert_eq!(text_of(&result), r#"[{"title":"Hamlet"}]"#);
    }

    #[test]
    fn test_error_result() {
        let result = error_result("boom");
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "boom");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(default_festival(), "international");
        assert_eq!(default_year(), "2025");
        assert_eq!(default_page_size(), 25);
        assert_eq!(default_page(), 1);
    }
}
