//! Request shaping for the Cloudflare tool surface.
//!
//! Tool parameters arrive as flat optional scalars (plus native arrays
//! for bulk inputs); the upstream API wants nested configuration
//! objects. The functions here are pure: they normalize caller input
//! into the exact request shapes without touching the network, so the
//! contracts are unit-testable in isolation.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use flaremcp_api::types::{
    HyperdriveCaching, HyperdriveOrigin, KvBulkEntry, QueueAck, QueueRetry, Zone,
};

// ── Hyperdrive origin ────────────────────────────────────────────────

/// Flat caller-supplied origin fields, before shaping.
#[derive(Debug, Clone, PartialEq)]
pub struct OriginInput {
    /// Caller's stated origin type; `"access"` requests the
    /// Access-protected shape.
    pub origin_type: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub scheme: String,
    pub access_client_id: Option<String>,
    pub access_client_secret: Option<String>,
}

/// Choose the origin shape from the caller's flat fields.
///
/// The Access shape is produced only when the stated origin type is
/// `"access"` AND both service-token credentials are present and
/// non-empty. Anything else falls back to the Standard shape -- even if
/// the caller asked for `"access"`. That silent fallback is the
/// documented contract, not an error path. Host/port syntax is not
/// validated here; the API rejects what it doesn't like.
pub fn build_origin(input: OriginInput) -> HyperdriveOrigin {
    let OriginInput {
        origin_type,
        host,
        port,
        database,
        user,
        password,
        scheme,
        access_client_id,
        access_client_secret,
    } = input;

    if origin_type == "access" {
        if let (Some(client_id), Some(client_secret)) = (access_client_id, access_client_secret) {
            if !client_id.is_empty() && !client_secret.is_empty() {
                return HyperdriveOrigin::Access {
                    database,
                    host,
                    scheme,
                    user,
                    password,
                    access_client_id: client_id,
                    access_client_secret: client_secret,
                };
            }
        }
    }

    HyperdriveOrigin::Standard {
        database,
        host,
        port,
        scheme,
        user,
        password,
    }
}

// ── Hyperdrive caching ───────────────────────────────────────────────

/// Assemble the optional caching policy.
///
/// Returns `None` when all three fields are absent, omitting the policy
/// object from the request entirely so upstream defaults apply. When
/// any field is present the policy carries exactly the supplied fields;
/// absent ones stay absent rather than being defaulted locally.
pub fn build_caching(
    disabled: Option<bool>,
    max_age: Option<u32>,
    stale_while_revalidate: Option<u32>,
) -> Option<HyperdriveCaching> {
    if disabled.is_none() && max_age.is_none() && stale_while_revalidate.is_none() {
        return None;
    }

    Some(HyperdriveCaching {
        disabled,
        max_age,
        stale_while_revalidate,
    })
}

// ── Zone listing text ────────────────────────────────────────────────

/// Render the zone list as the human-readable summary the listing tool
/// returns instead of raw JSON.
pub fn zone_list_text(zones: &[Zone]) -> String {
    if zones.is_empty() {
        return "No zones found.".into();
    }

    let mut out = format!("Found {} zone(s):", zones.len());
    for zone in zones {
        out.push_str(&format!("\n- {} (ID: {})", zone.name, zone.id));
    }
    out
}

// ── Bulk collection elements ─────────────────────────────────────────
//
// Element schemas for the array-valued tool parameters. The protocol
// layer validates these against the generated JSON schema, so a shape
// mismatch rejects the whole call before any upstream dispatch.

/// One entry in a bulk KV write.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct KvEntryParam {
    #[schemars(description = "Key name")]
    pub key: String,
    #[schemars(description = "Value to store")]
    pub value: String,
    #[schemars(description = "Absolute expiration (seconds since epoch)")]
    pub expiration: Option<i64>,
    #[schemars(description = "Relative expiration (seconds from now)")]
    pub expiration_ttl: Option<i64>,
    #[schemars(description = "Whether the value is base64-encoded binary data")]
    pub base64: Option<bool>,
    #[schemars(description = "Arbitrary JSON metadata stored alongside the value")]
    pub metadata: Option<Value>,
}

impl From<KvEntryParam> for KvBulkEntry {
    fn from(p: KvEntryParam) -> Self {
        Self {
            key: p.key,
            value: p.value,
            expiration: p.expiration,
            expiration_ttl: p.expiration_ttl,
            base64: p.base64,
            metadata: p.metadata,
        }
    }
}

/// One message acknowledgement.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AckParam {
    #[schemars(description = "Lease ID of the message to acknowledge")]
    pub lease_id: String,
}

impl From<AckParam> for QueueAck {
    fn from(p: AckParam) -> Self {
        Self {
            lease_id: p.lease_id,
        }
    }
}

/// One message retry, optionally delayed.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RetryParam {
    #[schemars(description = "Lease ID of the message to retry")]
    pub lease_id: String,
    #[schemars(description = "Delay before the message becomes visible again, in seconds")]
    pub delay_seconds: Option<u64>,
}

impl From<RetryParam> for QueueRetry {
    fn from(p: RetryParam) -> Self {
        Self {
            lease_id: p.lease_id,
            delay_seconds: p.delay_seconds,
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn origin_input() -> OriginInput {
        OriginInput {
            origin_type: "standard".into(),
            host: "db.example.com".into(),
            port: 5432,
            database: "app".into(),
            user: "admin".into(),
            password: "hunter2".into(),
            scheme: "postgres".into(),
            access_client_id: None,
            access_client_secret: None,
        }
    }

    #[test]
    fn standard_origin_includes_port() {
        let origin = build_origin(origin_input());

        let body = serde_json::to_value(&origin).unwrap();
        assert_eq!(body["port"], 5432);
        assert!(body.get("access_client_id").is_none());
        assert!(body.get("access_client_secret").is_none());
    }

    #[test]
    fn access_origin_with_both_credentials_omits_port() {
        let input = OriginInput {
            origin_type: "access".into(),
            access_client_id: Some("cid".into()),
            access_client_secret: Some("csecret".into()),
            ..origin_input()
        };

        let origin = build_origin(input);

        let body = serde_json::to_value(&origin).unwrap();
        assert_eq!(body["access_client_id"], "cid");
        assert_eq!(body["access_client_secret"], "csecret");
        assert!(body.get("port").is_none());
    }

    #[test]
    fn access_origin_with_missing_secret_falls_back_to_standard() {
        let input = OriginInput {
            origin_type: "access".into(),
            access_client_id: Some("cid".into()),
            access_client_secret: None,
            ..origin_input()
        };

        let origin = build_origin(input);

        let body = serde_json::to_value(&origin).unwrap();
        assert_eq!(body["port"], 5432);
        assert!(body.get("access_client_id").is_none());
    }

    #[test]
    fn access_origin_with_empty_credential_falls_back_to_standard() {
        let input = OriginInput {
            origin_type: "access".into(),
            access_client_id: Some("cid".into()),
            access_client_secret: Some(String::new()),
            ..origin_input()
        };

        let origin = build_origin(input);

        assert!(matches!(origin, HyperdriveOrigin::Standard { .. }));
    }

    #[test]
    fn access_credentials_without_access_type_stay_standard() {
        let input = OriginInput {
            origin_type: "standard".into(),
            access_client_id: Some("cid".into()),
            access_client_secret: Some("csecret".into()),
            ..origin_input()
        };

        let origin = build_origin(input);

        assert!(matches!(origin, HyperdriveOrigin::Standard { .. }));
    }

    #[test]
    fn caching_absent_when_no_field_supplied() {
        assert_eq!(build_caching(None, None, None), None);
    }

    #[test]
    fn caching_carries_exactly_the_supplied_fields() {
        let caching = build_caching(None, Some(60), None).unwrap();

        let body = serde_json::to_value(caching).unwrap();
        assert_eq!(body, json!({ "max_age": 60 }));
    }

    #[test]
    fn caching_with_all_fields() {
        let caching = build_caching(Some(false), Some(60), Some(15)).unwrap();

        let body = serde_json::to_value(caching).unwrap();
        assert_eq!(
            body,
            json!({ "disabled": false, "max_age": 60, "stale_while_revalidate": 15 })
        );
    }

    #[test]
    fn zone_text_empty() {
        assert_eq!(zone_list_text(&[]), "No zones found.");
    }

    #[test]
    fn zone_text_two_zones() {
        let zones: Vec<Zone> = serde_json::from_value(json!([
            { "id": "1", "name": "a.com" },
            { "id": "2", "name": "b.com" },
        ]))
        .unwrap();

        assert_eq!(
            zone_list_text(&zones),
            "Found 2 zone(s):\n- a.com (ID: 1)\n- b.com (ID: 2)"
        );
    }

    #[test]
    fn malformed_bulk_entry_is_rejected_at_decode() {
        // Missing the required `value` field -- must fail before any
        // client call could be built from it.
        let result: Result<KvEntryParam, _> = serde_json::from_value(json!({ "key": "a" }));
        assert!(result.is_err());

        let result: Result<Vec<KvEntryParam>, _> = serde_json::from_value(json!("not an array"));
        assert!(result.is_err());
    }

    #[test]
    fn ack_params_decode_in_order() {
        let acks: Vec<AckParam> =
            serde_json::from_value(json!([{ "lease_id": "L1" }, { "lease_id": "L2" }])).unwrap();

        let acks: Vec<QueueAck> = acks.into_iter().map(Into::into).collect();
        assert_eq!(acks[0].lease_id, "L1");
        assert_eq!(acks[1].lease_id, "L2");
    }
}
