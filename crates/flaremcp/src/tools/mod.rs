//! Tool implementations, one module per Cloudflare API surface.
//!
//! Each module contributes a `ToolRouter` via `#[tool_router]`; the
//! server merges them. Every tool is a pass-through: shape the
//! parameters, make exactly one client call, return the result as JSON
//! text (or the formatted zone summary). Upstream errors are forwarded
//! to the caller unchanged -- no retry, no masking, no translation.

pub mod dns;
pub mod hyperdrive;
pub mod kv;
pub mod queues;
pub mod zones;

use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, Content};
use serde::Serialize;

/// Forward an upstream API error to the MCP caller unchanged.
pub(crate) fn upstream_error(err: flaremcp_api::Error) -> McpError {
    McpError::internal_error(err.to_string(), None)
}

/// Wrap a serializable payload as pretty-printed JSON text content.
pub(crate) fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("failed to serialize response: {e}"), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Wrap plain text content.
pub(crate) fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}
