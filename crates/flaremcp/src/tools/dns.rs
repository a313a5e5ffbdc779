//! DNS record tools.

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult, tool,
    tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;

use flaremcp_api::types::{DnsRecordType, DnsRecordWrite};

use super::{json_result, upstream_error};
use crate::server::CloudflareServer;

/// Record types the DNS tools accept.
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordKind {
    A,
    Cname,
    Txt,
    Mx,
}

impl From<RecordKind> for DnsRecordType {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::A => Self::A,
            RecordKind::Cname => Self::Cname,
            RecordKind::Txt => Self::Txt,
            RecordKind::Mx => Self::Mx,
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateDnsRecordParams {
    #[schemars(description = "Zone ID to create the record in")]
    pub zone_id: String,
    #[schemars(description = "Record name (e.g. www.example.com)")]
    pub name: String,
    #[schemars(description = "Record content (e.g. an IP address or target hostname)")]
    pub content: String,
    #[schemars(description = "Record type (A, CNAME, TXT, or MX)")]
    #[serde(rename = "type")]
    pub record_type: RecordKind,
    #[schemars(description = "Optional comment stored with the record")]
    pub comment: Option<String>,
    #[schemars(description = "Whether to proxy traffic through Cloudflare")]
    pub proxied: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct EditDnsRecordParams {
    #[schemars(description = "Zone ID containing the record")]
    pub zone_id: String,
    #[schemars(description = "ID of the record to edit")]
    pub record_id: String,
    #[schemars(description = "New record content")]
    pub content: String,
    #[schemars(description = "Record type (A, CNAME, TXT, or MX)")]
    #[serde(rename = "type")]
    pub record_type: RecordKind,
    #[schemars(description = "Optional comment stored with the record")]
    pub comment: Option<String>,
    #[schemars(description = "Whether to proxy traffic through Cloudflare")]
    pub proxied: Option<bool>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteDnsRecordParams {
    #[schemars(description = "Zone ID containing the record")]
    pub zone_id: String,
    #[schemars(description = "ID of the record to delete")]
    pub record_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListDnsRecordsParams {
    #[schemars(description = "Zone ID to list records for")]
    pub zone_id: String,
}

#[tool_router(router = dns_tools, vis = "pub(crate)")]
impl CloudflareServer {
    #[tool(description = "Create a DNS record in a zone")]
    pub async fn create_dns_record(
        &self,
        Parameters(p): Parameters<CreateDnsRecordParams>,
    ) -> Result<CallToolResult, McpError> {
        let record = DnsRecordWrite {
            record_type: p.record_type.into(),
            name: Some(p.name),
            content: p.content,
            comment: p.comment,
            proxied: p.proxied,
        };
        let created = self
            .client
            .create_dns_record(&p.zone_id, &record)
            .await
            .map_err(upstream_error)?;
        json_result(&created)
    }

    #[tool(description = "Edit an existing DNS record")]
    pub async fn edit_dns_record(
        &self,
        Parameters(p): Parameters<EditDnsRecordParams>,
    ) -> Result<CallToolResult, McpError> {
        let record = DnsRecordWrite {
            record_type: p.record_type.into(),
            name: None,
            content: p.content,
            comment: p.comment,
            proxied: p.proxied,
        };
        let updated = self
            .client
            .edit_dns_record(&p.zone_id, &p.record_id, &record)
            .await
            .map_err(upstream_error)?;
        json_result(&updated)
    }

    #[tool(description = "Delete a DNS record")]
    pub async fn delete_dns_record(
        &self,
        Parameters(p): Parameters<DeleteDnsRecordParams>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .client
            .delete_dns_record(&p.zone_id, &p.record_id)
            .await
            .map_err(upstream_error)?;
        json_result(&result)
    }

    #[tool(description = "List all DNS records in a zone")]
    pub async fn list_dns_records(
        &self,
        Parameters(p): Parameters<ListDnsRecordsParams>,
    ) -> Result<CallToolResult, McpError> {
        let records = self
            .client
            .list_dns_records(&p.zone_id)
            .await
            .map_err(upstream_error)?;
        json_result(&records)
    }
}
