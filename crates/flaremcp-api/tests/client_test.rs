// Integration tests for `Client` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use flaremcp_api::types::{
    DnsRecordType, DnsRecordWrite, HyperdriveConfigCreate, HyperdriveOrigin, KvBulkEntry, QueueAck,
};
use flaremcp_api::{Client, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let client = Client::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn envelope(result: serde_json::Value) -> serde_json::Value {
    json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result,
    })
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_zones() {
    let (server, client) = setup().await;

    let body = envelope(json!([
        { "id": "1", "name": "a.com", "status": "active" },
        { "id": "2", "name": "b.com", "status": "pending" },
    ]));

    Mock::given(method("GET"))
        .and(path("/client/v4/zones"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let zones = client.list_zones().await.unwrap();

    assert_eq!(zones.len(), 2);
    assert_eq!(zones[0].name, "a.com");
    assert_eq!(zones[0].id, "1");
    assert_eq!(zones[1].status.as_deref(), Some("pending"));
}

#[tokio::test]
async fn test_create_dns_record() {
    let (server, client) = setup().await;

    let response = envelope(json!({
        "id": "rec1",
        "name": "www.example.com",
        "content": "203.0.113.7",
        "type": "A",
        "proxied": true,
        "ttl": 1,
    }));

    Mock::given(method("POST"))
        .and(path("/client/v4/zones/z1/dns_records"))
        .and(body_json(json!({
            "type": "A",
            "name": "www.example.com",
            "content": "203.0.113.7",
            "proxied": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&server)
        .await;

    let record = client
        .create_dns_record(
            "z1",
            &DnsRecordWrite {
                record_type: DnsRecordType::A,
                name: Some("www.example.com".into()),
                content: "203.0.113.7".into(),
                comment: None,
                proxied: Some(true),
            },
        )
        .await
        .unwrap();

    assert_eq!(record.id, "rec1");
    assert_eq!(record.record_type, "A");
    assert_eq!(record.proxied, Some(true));
}

#[tokio::test]
async fn test_delete_dns_record_null_safe_result() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/client/v4/zones/z1/dns_records/rec1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!({ "id": "rec1" }))),
        )
        .mount(&server)
        .await;

    let result = client.delete_dns_record("z1", "rec1").await.unwrap();
    assert_eq!(result["id"], "rec1");
}

#[tokio::test]
async fn test_list_kv_keys_with_cursor() {
    let (server, client) = setup().await;

    let body = json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": [
            { "name": "alpha" },
            { "name": "beta", "expiration": 1735689600 },
        ],
        "result_info": { "count": 2, "cursor": "next-page-token" },
    });

    Mock::given(method("GET"))
        .and(path("/client/v4/accounts/acc/storage/kv/namespaces/ns/keys"))
        .and(query_param("prefix", "a"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let page = client
        .list_kv_keys("acc", "ns", Some("a"), None, Some(100))
        .await
        .unwrap();

    assert_eq!(page.keys.len(), 2);
    assert_eq!(page.keys[0].name, "alpha");
    assert_eq!(page.keys[1].expiration, Some(1_735_689_600));
    let info = page.result_info.unwrap();
    assert_eq!(info.cursor.as_deref(), Some("next-page-token"));
}

#[tokio::test]
async fn test_get_kv_value_returns_raw_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/client/v4/accounts/acc/storage/kv/namespaces/ns/values/greeting"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello world"))
        .mount(&server)
        .await;

    let value = client.get_kv_value("acc", "ns", "greeting").await.unwrap();
    assert_eq!(value, "hello world");
}

#[tokio::test]
async fn test_kv_key_names_are_percent_encoded() {
    let (server, client) = setup().await;

    // A key containing `/` must land as one encoded path segment, not a
    // deeper path.
    Mock::given(method("GET"))
        .and(path("/client/v4/accounts/acc/storage/kv/namespaces/ns/values/app%2Fsettings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let value = client
        .get_kv_value("acc", "ns", "app/settings")
        .await
        .unwrap();
    assert_eq!(value, "{}");
}

#[tokio::test]
async fn test_bulk_delete_forwards_ordered_keys_once() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/client/v4/accounts/acc/storage/kv/namespaces/ns/bulk/delete"))
        .and(body_json(json!(["a", "b", "c"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
        .expect(1)
        .mount(&server)
        .await;

    let keys = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];
    client.bulk_delete_kv("acc", "ns", &keys).await.unwrap();
}

#[tokio::test]
async fn test_bulk_update_serializes_optional_fields_sparsely() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/client/v4/accounts/acc/storage/kv/namespaces/ns/bulk"))
        .and(body_json(json!([
            { "key": "k1", "value": "v1" },
            { "key": "k2", "value": "djI=", "base64": true, "expiration_ttl": 60 },
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
        .expect(1)
        .mount(&server)
        .await;

    let entries = vec![
        KvBulkEntry {
            key: "k1".into(),
            value: "v1".into(),
            expiration: None,
            expiration_ttl: None,
            base64: None,
            metadata: None,
        },
        KvBulkEntry {
            key: "k2".into(),
            value: "djI=".into(),
            expiration: None,
            expiration_ttl: Some(60),
            base64: Some(true),
            metadata: None,
        },
    ];
    client.bulk_update_kv("acc", "ns", &entries).await.unwrap();
}

#[tokio::test]
async fn test_ack_omits_absent_retry_list() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/client/v4/accounts/acc/queues/q1/messages/ack"))
        .and(body_json(json!({ "acks": [{ "lease_id": "L1" }] })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!({ "ackCount": 1, "retryCount": 0 }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let acks = vec![QueueAck {
        lease_id: "L1".into(),
    }];
    let result = client
        .ack_queue_messages("acc", "q1", &acks, None)
        .await
        .unwrap();

    assert_eq!(result.ack_count, Some(1));
}

#[tokio::test]
async fn test_pull_queue_messages() {
    let (server, client) = setup().await;

    let body = envelope(json!({
        "messages": [
            { "lease_id": "L1", "body": "first", "attempts": 1, "timestamp_ms": 1700000000000i64 },
        ],
        "message_backlog_count": 9,
    }));

    Mock::given(method("POST"))
        .and(path("/client/v4/accounts/acc/queues/q1/messages/pull"))
        .and(body_json(json!({ "batch_size": 5, "visibility_timeout_ms": 6000 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let pulled = client
        .pull_queue_messages("acc", "q1", Some(5), Some(6000))
        .await
        .unwrap();

    assert_eq!(pulled.messages.len(), 1);
    assert_eq!(pulled.messages[0].lease_id, "L1");
    assert_eq!(pulled.message_backlog_count, Some(9));
}

#[tokio::test]
async fn test_create_hyperdrive_config_access_origin_body() {
    let (server, client) = setup().await;

    let response = envelope(json!({
        "id": "hd1",
        "name": "prod-db",
        "origin": { "host": "db.internal", "database": "app" },
    }));

    // Access origin: service-token credentials present, no port.
    Mock::given(method("POST"))
        .and(path("/client/v4/accounts/acc/hyperdrive/configs"))
        .and(body_json(json!({
            "name": "prod-db",
            "origin": {
                "database": "app",
                "host": "db.internal",
                "scheme": "postgres",
                "user": "admin",
                "password": "hunter2",
                "access_client_id": "cid.access",
                "access_client_secret": "csecret",
            },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .expect(1)
        .mount(&server)
        .await;

    let config = client
        .create_hyperdrive_config(
            "acc",
            &HyperdriveConfigCreate {
                name: "prod-db".into(),
                origin: HyperdriveOrigin::Access {
                    database: "app".into(),
                    host: "db.internal".into(),
                    scheme: "postgres".into(),
                    user: "admin".into(),
                    password: "hunter2".into(),
                    access_client_id: "cid.access".into(),
                    access_client_secret: "csecret".into(),
                },
                caching: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(config.id, "hd1");
    assert_eq!(config.name, "prod-db");
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_error_403_authentication() {
    let (server, client) = setup().await;

    let body = json!({
        "success": false,
        "errors": [{ "code": 9109, "message": "Invalid access token" }],
        "messages": [],
        "result": null,
    });

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(&body))
        .mount(&server)
        .await;

    let result = client.list_zones().await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert_eq!(message, "Invalid access token");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_envelope_failure_with_http_200() {
    let (server, client) = setup().await;

    // Some endpoints report failure in the envelope with HTTP 200.
    let body = json!({
        "success": false,
        "errors": [{ "code": 10009, "message": "get namespace: 'namespace not found'" }],
        "messages": [],
        "result": null,
    });

    Mock::given(method("GET"))
        .and(path("/client/v4/accounts/acc/storage/kv/namespaces/missing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let result = client.get_kv_namespace("acc", "missing").await;

    match result {
        Err(Error::Api {
            status,
            code,
            ref message,
        }) => {
            assert_eq!(status, 200);
            assert_eq!(code, Some(10009));
            assert!(message.contains("namespace not found"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_404_not_found() {
    let (server, client) = setup().await;

    let body = json!({
        "success": false,
        "errors": [{ "code": 1001, "message": "Record not found" }],
        "messages": [],
        "result": null,
    });

    Mock::given(method("DELETE"))
        .and(path("/client/v4/zones/z1/dns_records/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(&body))
        .mount(&server)
        .await;

    let err = client.delete_dns_record("z1", "missing").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.api_error_code(), Some(1001));
}

#[tokio::test]
async fn test_error_non_json_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let result = client.list_zones().await;

    match result {
        Err(Error::Api {
            status,
            code,
            ref message,
        }) => {
            assert_eq!(status, 502);
            assert!(code.is_none());
            assert_eq!(message, "bad gateway");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_kv_value_error_surfaces_envelope_message() {
    let (server, client) = setup().await;

    let body = json!({
        "success": false,
        "errors": [{ "code": 10009, "message": "key not found" }],
        "messages": [],
        "result": null,
    });

    Mock::given(method("GET"))
        .and(path("/client/v4/accounts/acc/storage/kv/namespaces/ns/values/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(&body))
        .mount(&server)
        .await;

    let err = client.get_kv_value("acc", "ns", "missing").await.unwrap_err();

    match err {
        Error::Api {
            status, ref message, ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(message, "key not found");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}
