//! Workers KV tools: namespaces, keys, values, and bulk operations.

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult, tool,
    tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use flaremcp_api::types::KvValueWrite;

use super::{json_result, upstream_error};
use crate::server::CloudflareServer;
use crate::shape::KvEntryParam;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateKvNamespaceParams {
    #[schemars(description = "Cloudflare account ID")]
    pub account_id: String,
    #[schemars(description = "Title for the new namespace")]
    pub title: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateKvNamespaceParams {
    #[schemars(description = "Cloudflare account ID")]
    pub account_id: String,
    #[schemars(description = "ID of the namespace to rename")]
    pub namespace_id: String,
    #[schemars(description = "New namespace title")]
    pub title: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct KvNamespaceParams {
    #[schemars(description = "Cloudflare account ID")]
    pub account_id: String,
    #[schemars(description = "Namespace ID")]
    pub namespace_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListKvNamespacesParams {
    #[schemars(description = "Cloudflare account ID")]
    pub account_id: String,
    #[schemars(description = "Sort field: 'id' or 'title'")]
    pub order: Option<String>,
    #[schemars(description = "Sort direction: 'asc' or 'desc'")]
    pub direction: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListKvKeysParams {
    #[schemars(description = "Cloudflare account ID")]
    pub account_id: String,
    #[schemars(description = "Namespace ID")]
    pub namespace_id: String,
    #[schemars(description = "Only list keys starting with this prefix")]
    pub prefix: Option<String>,
    #[schemars(description = "Cursor from a previous page's result_info")]
    pub cursor: Option<String>,
    #[schemars(description = "Maximum number of keys to return (10-1000)")]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct KvKeyParams {
    #[schemars(description = "Cloudflare account ID")]
    pub account_id: String,
    #[schemars(description = "Namespace ID")]
    pub namespace_id: String,
    #[schemars(description = "Key name")]
    pub key_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateKvValueParams {
    #[schemars(description = "Cloudflare account ID")]
    pub account_id: String,
    #[schemars(description = "Namespace ID")]
    pub namespace_id: String,
    #[schemars(description = "Key name to write")]
    pub key_name: String,
    #[schemars(description = "Value to store (defaults to empty)")]
    pub value: Option<String>,
    #[schemars(description = "Arbitrary JSON metadata stored alongside the value")]
    pub metadata: Option<Value>,
    #[schemars(description = "Absolute expiration (seconds since epoch)")]
    pub expiration: Option<i64>,
    #[schemars(description = "Relative expiration (seconds from now)")]
    pub expiration_ttl: Option<i64>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct BulkDeleteKvKeysParams {
    #[schemars(description = "Cloudflare account ID")]
    pub account_id: String,
    #[schemars(description = "Namespace ID")]
    pub namespace_id: String,
    #[schemars(description = "Key names to delete, in order")]
    pub keys: Vec<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct BulkUpdateKvKeysParams {
    #[schemars(description = "Cloudflare account ID")]
    pub account_id: String,
    #[schemars(description = "Namespace ID")]
    pub namespace_id: String,
    #[schemars(description = "Entries to write, in order")]
    pub key_values: Vec<KvEntryParam>,
}

#[tool_router(router = kv_tools, vis = "pub(crate)")]
impl CloudflareServer {
    // ── Namespaces ───────────────────────────────────────────────────

    #[tool(description = "Create a Workers KV namespace")]
    pub async fn create_kv_namespace(
        &self,
        Parameters(p): Parameters<CreateKvNamespaceParams>,
    ) -> Result<CallToolResult, McpError> {
        let namespace = self
            .client
            .create_kv_namespace(&p.account_id, &p.title)
            .await
            .map_err(upstream_error)?;
        json_result(&namespace)
    }

    #[tool(description = "Rename a Workers KV namespace")]
    pub async fn update_kv_namespace(
        &self,
        Parameters(p): Parameters<UpdateKvNamespaceParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .client
            .rename_kv_namespace(&p.account_id, &p.namespace_id, &p.title)
            .await
            .map_err(upstream_error)?;
        json_result(&result)
    }

    #[tool(description = "Delete a Workers KV namespace and all its keys")]
    pub async fn delete_kv_namespace(
        &self,
        Parameters(p): Parameters<KvNamespaceParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .client
            .delete_kv_namespace(&p.account_id, &p.namespace_id)
            .await
            .map_err(upstream_error)?;
        json_result(&result)
    }

    #[tool(description = "Get details of a Workers KV namespace")]
    pub async fn get_kv_namespace(
        &self,
        Parameters(p): Parameters<KvNamespaceParams>,
    ) -> Result<CallToolResult, McpError> {
        let namespace = self
            .client
            .get_kv_namespace(&p.account_id, &p.namespace_id)
            .await
            .map_err(upstream_error)?;
        json_result(&namespace)
    }

    #[tool(description = "List Workers KV namespaces on the account")]
    pub async fn list_kv_namespaces(
        &self,
        Parameters(p): Parameters<ListKvNamespacesParams>,
    ) -> Result<CallToolResult, McpError> {
        let namespaces = self
            .client
            .list_kv_namespaces(&p.account_id, p.order.as_deref(), p.direction.as_deref())
            .await
            .map_err(upstream_error)?;
        json_result(&namespaces)
    }

    // ── Keys and values ──────────────────────────────────────────────

    #[tool(description = "List keys in a KV namespace (cursor-paginated)")]
    pub async fn list_kv_keys(
        &self,
        Parameters(p): Parameters<ListKvKeysParams>,
    ) -> Result<CallToolResult, McpError> {
        let page = self
            .client
            .list_kv_keys(
                &p.account_id,
                &p.namespace_id,
                p.prefix.as_deref(),
                p.cursor.as_deref(),
                p.limit,
            )
            .await
            .map_err(upstream_error)?;
        json_result(&page)
    }

    #[tool(description = "Get the metadata stored with a KV key")]
    pub async fn get_kv_key_metadata(
        &self,
        Parameters(p): Parameters<KvKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let metadata = self
            .client
            .get_kv_key_metadata(&p.account_id, &p.namespace_id, &p.key_name)
            .await
            .map_err(upstream_error)?;
        json_result(&metadata)
    }

    #[tool(description = "Read the value stored at a KV key")]
    pub async fn get_kv_value(
        &self,
        Parameters(p): Parameters<KvKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let value = self
            .client
            .get_kv_value(&p.account_id, &p.namespace_id, &p.key_name)
            .await
            .map_err(upstream_error)?;
        Ok(super::text_result(value))
    }

    #[tool(description = "Write a value (and optional metadata/expiration) to a KV key")]
    pub async fn update_kv_value(
        &self,
        Parameters(p): Parameters<UpdateKvValueParams>,
    ) -> Result<CallToolResult, McpError> {
        let write = KvValueWrite {
            value: p.value.unwrap_or_default(),
            expiration: p.expiration,
            expiration_ttl: p.expiration_ttl,
            metadata: p.metadata,
        };
        let result = self
            .client
            .put_kv_value(&p.account_id, &p.namespace_id, &p.key_name, &write)
            .await
            .map_err(upstream_error)?;
        json_result(&result)
    }

    #[tool(description = "Delete the value stored at a KV key")]
    pub async fn delete_kv_value(
        &self,
        Parameters(p): Parameters<KvKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .client
            .delete_kv_value(&p.account_id, &p.namespace_id, &p.key_name)
            .await
            .map_err(upstream_error)?;
        json_result(&result)
    }

    // ── Bulk operations ──────────────────────────────────────────────

    #[tool(description = "Delete many KV keys in one call")]
    pub async fn bulk_delete_kv_keys(
        &self,
        Parameters(p): Parameters<BulkDeleteKvKeysParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .client
            .bulk_delete_kv(&p.account_id, &p.namespace_id, &p.keys)
            .await
            .map_err(upstream_error)?;
        json_result(&result)
    }

    #[tool(description = "Write many KV entries in one call")]
    pub async fn bulk_update_kv_keys(
        &self,
        Parameters(p): Parameters<BulkUpdateKvKeysParams>,
    ) -> Result<CallToolResult, McpError> {
        let entries: Vec<_> = p.key_values.into_iter().map(Into::into).collect();
        let result = self
            .client
            .bulk_update_kv(&p.account_id, &p.namespace_id, &entries)
            .await
            .map_err(upstream_error)?;
        json_result(&result)
    }
}
