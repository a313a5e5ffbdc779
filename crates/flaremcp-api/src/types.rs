//! Request and response types for the Cloudflare v4 API.
//!
//! All responses arrive wrapped in the standard envelope
//! `{success, errors, messages, result, result_info}`; the client strips
//! the envelope before callers see the payload. Field names are
//! snake_case on the wire, so serde defaults apply throughout.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ── Envelope ─────────────────────────────────────────────────────────

/// Standard v4 response envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    #[serde(default)]
    pub messages: Vec<ApiMessage>,
    pub result: Option<T>,
    #[serde(default)]
    pub result_info: Option<ResultInfo>,
}

/// An error or informational message inside the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub code: i64,
    pub message: String,
}

/// Pagination block attached to list responses.
///
/// Page-based endpoints fill `page`/`total_count`; cursor-based
/// endpoints (KV key listing) fill `cursor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultInfo {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub cursor: Option<String>,
}

// ── Zones ────────────────────────────────────────────────────────────

/// Zone overview — from `GET /zones`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub paused: Option<bool>,
    #[serde(default)]
    pub name_servers: Vec<String>,
    /// Catch-all for additional fields not modeled above.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

// ── DNS records ──────────────────────────────────────────────────────

/// Record type accepted by the DNS endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    A,
    Cname,
    Txt,
    Mx,
}

/// DNS record — from `GET /zones/{zone_id}/dns_records`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub id: String,
    pub name: String,
    pub content: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub proxied: Option<bool>,
    #[serde(default)]
    pub ttl: Option<u32>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Create or edit a DNS record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecordWrite {
    #[serde(rename = "type")]
    pub record_type: DnsRecordType,
    /// Record name. Optional on edits -- the existing name is kept.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
}

// ── KV ───────────────────────────────────────────────────────────────

/// KV namespace — from the namespace endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KvNamespace {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub supports_url_encoding: Option<bool>,
}

/// Key overview — from `GET .../keys`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KvKey {
    pub name: String,
    #[serde(default)]
    pub expiration: Option<i64>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// One page of key listings, with the cursor for the next page.
///
/// Pagination is caller-driven: pass `result_info.cursor` back into the
/// next listing call to continue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KvKeyPage {
    pub keys: Vec<KvKey>,
    #[serde(default)]
    pub result_info: Option<ResultInfo>,
}

/// Body for a single-key value write.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KvValueWrite {
    pub value: String,
    /// Absolute expiration (seconds since epoch).
    pub expiration: Option<i64>,
    /// Relative expiration (seconds from now).
    pub expiration_ttl: Option<i64>,
    /// Arbitrary JSON metadata stored alongside the value.
    pub metadata: Option<Value>,
}

/// One entry in a bulk KV write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KvBulkEntry {
    pub key: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_ttl: Option<i64>,
    /// Whether `value` is base64-encoded binary data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base64: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

// ── Queues ───────────────────────────────────────────────────────────

/// Queue overview — from the queue endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Queue {
    pub queue_id: String,
    pub queue_name: String,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub modified_on: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Acknowledge one leased message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueAck {
    pub lease_id: String,
}

/// Retry one leased message, optionally after a delay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueRetry {
    pub lease_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_seconds: Option<u64>,
}

/// Result of an ack/retry batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AckResult {
    #[serde(rename = "ackCount", default)]
    pub ack_count: Option<u64>,
    #[serde(rename = "retryCount", default)]
    pub retry_count: Option<u64>,
    #[serde(default)]
    pub warnings: Option<Value>,
}

/// A message pulled off a queue, exclusively leased until acked,
/// retried, or the visibility timeout lapses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulledMessage {
    pub lease_id: String,
    pub body: Value,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub timestamp_ms: Option<i64>,
    #[serde(default)]
    pub attempts: Option<i64>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// Result of a pull batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullMessagesResult {
    #[serde(default)]
    pub messages: Vec<PulledMessage>,
    #[serde(default)]
    pub message_backlog_count: Option<i64>,
}

// ── Hyperdrive ───────────────────────────────────────────────────────

/// Database origin for a Hyperdrive configuration.
///
/// Serialized untagged: the Access shape carries the service-token
/// credentials and no port; the Standard shape carries the port.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HyperdriveOrigin {
    Standard {
        database: String,
        host: String,
        port: u16,
        scheme: String,
        user: String,
        password: String,
    },
    Access {
        database: String,
        host: String,
        scheme: String,
        user: String,
        password: String,
        access_client_id: String,
        access_client_secret: String,
    },
}

/// Query caching settings for a Hyperdrive configuration.
///
/// Fields left `None` are omitted from the request so upstream defaults
/// apply -- nothing is defaulted locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HyperdriveCaching {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale_while_revalidate: Option<u32>,
}

/// Create a Hyperdrive configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HyperdriveConfigCreate {
    pub name: String,
    pub origin: HyperdriveOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caching: Option<HyperdriveCaching>,
}

/// Partial update of a Hyperdrive configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HyperdriveConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caching: Option<HyperdriveCaching>,
}

/// Hyperdrive configuration — from the config endpoints.
///
/// The echoed origin omits the password, so it stays opaque JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HyperdriveConfig {
    pub id: String,
    pub name: String,
    pub origin: Value,
    #[serde(default)]
    pub caching: Option<Value>,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub modified_on: Option<String>,
}
