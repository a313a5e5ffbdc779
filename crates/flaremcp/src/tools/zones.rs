//! Zone tools: listing and cache purge.

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult, tool,
    tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::{json_result, text_result, upstream_error};
use crate::server::CloudflareServer;
use crate::shape;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PurgeCacheParams {
    #[schemars(description = "ID of the zone whose cache to purge")]
    pub zone_id: String,
}

#[tool_router(router = zone_tools, vis = "pub(crate)")]
impl CloudflareServer {
    /// List zones, returning a human-readable summary rather than raw
    /// JSON -- one line per zone.
    #[tool(description = "List all zones on the Cloudflare account")]
    pub async fn list_zones(&self) -> Result<CallToolResult, McpError> {
        let zones = self.client.list_zones().await.map_err(upstream_error)?;
        Ok(text_result(shape::zone_list_text(&zones)))
    }

    #[tool(description = "Purge the entire cache for a zone")]
    pub async fn purge_cache(
        &self,
        Parameters(p): Parameters<PurgeCacheParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .client
            .purge_cache(&p.zone_id)
            .await
            .map_err(upstream_error)?;
        json_result(&result)
    }
}
