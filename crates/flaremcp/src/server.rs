//! MCP server wiring.
//!
//! One `CloudflareServer` instance holds the shared API client and the
//! combined tool router. Tool implementations live under `tools/`, one
//! router per API surface, merged here.

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{Implementation, ServerCapabilities, ServerInfo},
    tool_handler,
};

use flaremcp_api::Client;

/// MCP server exposing Cloudflare management tools.
#[derive(Clone)]
pub struct CloudflareServer {
    pub(crate) client: Arc<Client>,
    pub(crate) tool_router: ToolRouter<Self>,
}

impl CloudflareServer {
    /// Build a server around an authenticated API client.
    pub fn new(client: Client) -> Self {
        Self {
            client: Arc::new(client),
            tool_router: Self::zone_tools()
                + Self::dns_tools()
                + Self::kv_tools()
                + Self::queue_tools()
                + Self::hyperdrive_tools(),
        }
    }
}

#[tool_handler]
impl ServerHandler for CloudflareServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "flaremcp".into(),
                title: Some("Cloudflare MCP Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Cloudflare management server: zones, DNS records, cache purge, \
                 Workers KV, Queues, and Hyperdrive configurations. Every tool \
                 performs a single Cloudflare API call and returns its result."
                    .into(),
            ),
        }
    }
}
