//! Hyperdrive tools: connection-pooling configuration management.
//!
//! Origin and caching shaping happens in `shape` -- see `build_origin`
//! for the Access-vs-Standard selection contract.

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult, tool,
    tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;

use flaremcp_api::types::{HyperdriveConfigCreate, HyperdriveConfigPatch};

use super::{json_result, upstream_error};
use crate::server::CloudflareServer;
use crate::shape::{self, OriginInput};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateHyperdriveConfigParams {
    #[schemars(description = "Cloudflare account ID")]
    pub account_id: String,
    #[schemars(description = "Name for the new configuration")]
    pub name: String,
    #[schemars(description = "Origin type: 'standard' or 'access'")]
    pub origin_type: String,
    #[schemars(description = "Database name at the origin")]
    pub database: String,
    #[schemars(description = "Origin database host")]
    pub host: String,
    #[schemars(description = "Origin database password")]
    pub password: String,
    #[schemars(description = "Origin database port (ignored for Access origins)")]
    pub port: u16,
    #[schemars(description = "Connection scheme (e.g. postgres)")]
    pub scheme: String,
    #[schemars(description = "Origin database user")]
    pub user: String,
    #[schemars(description = "Cloudflare Access client ID (required for 'access' origins)")]
    pub access_client_id: Option<String>,
    #[schemars(description = "Cloudflare Access client secret (required for 'access' origins)")]
    pub access_client_secret: Option<String>,
    #[schemars(description = "Disable query caching")]
    pub caching_disabled: Option<bool>,
    #[schemars(description = "Maximum cache age in seconds")]
    pub caching_max_age: Option<u32>,
    #[schemars(description = "Stale-while-revalidate window in seconds")]
    pub caching_stale_while_revalidate: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EditHyperdriveConfigParams {
    #[schemars(description = "Cloudflare account ID")]
    pub account_id: String,
    #[schemars(description = "ID of the configuration to edit")]
    pub hyperdrive_id: String,
    #[schemars(description = "New configuration name")]
    pub name: Option<String>,
    #[schemars(description = "Disable query caching")]
    pub caching_disabled: Option<bool>,
    #[schemars(description = "Maximum cache age in seconds")]
    pub caching_max_age: Option<u32>,
    #[schemars(description = "Stale-while-revalidate window in seconds")]
    pub caching_stale_while_revalidate: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct HyperdriveConfigParams {
    #[schemars(description = "Cloudflare account ID")]
    pub account_id: String,
    #[schemars(description = "Hyperdrive configuration ID")]
    pub hyperdrive_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListHyperdriveConfigsParams {
    #[schemars(description = "Cloudflare account ID")]
    pub account_id: String,
}

#[tool_router(router = hyperdrive_tools, vis = "pub(crate)")]
impl CloudflareServer {
    #[tool(description = "Create a Hyperdrive configuration for a database origin")]
    pub async fn create_hyperdrive_config(
        &self,
        Parameters(p): Parameters<CreateHyperdriveConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let origin = shape::build_origin(OriginInput {
            origin_type: p.origin_type,
            host: p.host,
            port: p.port,
            database: p.database,
            user: p.user,
            password: p.password,
            scheme: p.scheme,
            access_client_id: p.access_client_id,
            access_client_secret: p.access_client_secret,
        });
        let caching = shape::build_caching(
            p.caching_disabled,
            p.caching_max_age,
            p.caching_stale_while_revalidate,
        );

        let config = HyperdriveConfigCreate {
            name: p.name,
            origin,
            caching,
        };
        let created = self
            .client
            .create_hyperdrive_config(&p.account_id, &config)
            .await
            .map_err(upstream_error)?;
        json_result(&created)
    }

    #[tool(description = "Edit a Hyperdrive configuration's name or caching settings")]
    pub async fn edit_hyperdrive_config(
        &self,
        Parameters(p): Parameters<EditHyperdriveConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let patch = HyperdriveConfigPatch {
            name: p.name,
            caching: shape::build_caching(
                p.caching_disabled,
                p.caching_max_age,
                p.caching_stale_while_revalidate,
            ),
        };
        let updated = self
            .client
            .edit_hyperdrive_config(&p.account_id, &p.hyperdrive_id, &patch)
            .await
            .map_err(upstream_error)?;
        json_result(&updated)
    }

    #[tool(description = "Get a Hyperdrive configuration")]
    pub async fn get_hyperdrive_config(
        &self,
        Parameters(p): Parameters<HyperdriveConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let config = self
            .client
            .get_hyperdrive_config(&p.account_id, &p.hyperdrive_id)
            .await
            .map_err(upstream_error)?;
        json_result(&config)
    }

    #[tool(description = "Delete a Hyperdrive configuration")]
    pub async fn delete_hyperdrive_config(
        &self,
        Parameters(p): Parameters<HyperdriveConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .client
            .delete_hyperdrive_config(&p.account_id, &p.hyperdrive_id)
            .await
            .map_err(upstream_error)?;
        json_result(&result)
    }

    #[tool(description = "List Hyperdrive configurations on the account")]
    pub async fn list_hyperdrive_configs(
        &self,
        Parameters(p): Parameters<ListHyperdriveConfigsParams>,
    ) -> Result<CallToolResult, McpError> {
        let configs = self
            .client
            .list_hyperdrive_configs(&p.account_id)
            .await
            .map_err(upstream_error)?;
        json_result(&configs)
    }
}
