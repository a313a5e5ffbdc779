// Workers KV endpoints
//
// Namespaces, key listings, single values, and bulk operations under
// /accounts/{account_id}/storage/kv/namespaces. Value reads return the
// raw body; everything else is envelope-wrapped.
//
// Key names go through `url_with_segment` so reserved characters
// (including `/`) are percent-encoded as a single path segment.

use serde_json::{Value, json};
use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::types::{KvBulkEntry, KvKey, KvKeyPage, KvNamespace, KvValueWrite};

impl Client {
    // ── Namespaces ───────────────────────────────────────────────────

    /// Create a KV namespace.
    ///
    /// `POST /accounts/{account_id}/storage/kv/namespaces`
    pub async fn create_kv_namespace(
        &self,
        account_id: &str,
        title: &str,
    ) -> Result<KvNamespace, Error> {
        let url = self.url(&format!("accounts/{account_id}/storage/kv/namespaces"));
        debug!(account_id, title, "creating KV namespace");
        self.post(url, &json!({ "title": title })).await
    }

    /// List KV namespaces, optionally ordered.
    ///
    /// `GET /accounts/{account_id}/storage/kv/namespaces`
    pub async fn list_kv_namespaces(
        &self,
        account_id: &str,
        order: Option<&str>,
        direction: Option<&str>,
    ) -> Result<Vec<KvNamespace>, Error> {
        let url = self.url(&format!("accounts/{account_id}/storage/kv/namespaces"));

        let mut params = Vec::new();
        if let Some(order) = order {
            params.push(("order", order.to_owned()));
        }
        if let Some(direction) = direction {
            params.push(("direction", direction.to_owned()));
        }

        self.get_with_params(url, &params).await
    }

    /// Get a single KV namespace.
    ///
    /// `GET /accounts/{account_id}/storage/kv/namespaces/{namespace_id}`
    pub async fn get_kv_namespace(
        &self,
        account_id: &str,
        namespace_id: &str,
    ) -> Result<KvNamespace, Error> {
        let url = self.url(&format!(
            "accounts/{account_id}/storage/kv/namespaces/{namespace_id}"
        ));
        self.get(url).await
    }

    /// Rename a KV namespace.
    ///
    /// `PUT /accounts/{account_id}/storage/kv/namespaces/{namespace_id}`
    pub async fn rename_kv_namespace(
        &self,
        account_id: &str,
        namespace_id: &str,
        title: &str,
    ) -> Result<Value, Error> {
        let url = self.url(&format!(
            "accounts/{account_id}/storage/kv/namespaces/{namespace_id}"
        ));
        debug!(account_id, namespace_id, title, "renaming KV namespace");
        self.put(url, &json!({ "title": title })).await
    }

    /// Delete a KV namespace and everything in it.
    ///
    /// `DELETE /accounts/{account_id}/storage/kv/namespaces/{namespace_id}`
    pub async fn delete_kv_namespace(
        &self,
        account_id: &str,
        namespace_id: &str,
    ) -> Result<Value, Error> {
        let url = self.url(&format!(
            "accounts/{account_id}/storage/kv/namespaces/{namespace_id}"
        ));
        debug!(account_id, namespace_id, "deleting KV namespace");
        self.delete(url).await
    }

    // ── Keys ─────────────────────────────────────────────────────────

    /// List keys in a namespace, one cursor page at a time.
    ///
    /// `GET /accounts/{account_id}/storage/kv/namespaces/{namespace_id}/keys`
    pub async fn list_kv_keys(
        &self,
        account_id: &str,
        namespace_id: &str,
        prefix: Option<&str>,
        cursor: Option<&str>,
        limit: Option<u32>,
    ) -> Result<KvKeyPage, Error> {
        let url = self.url(&format!(
            "accounts/{account_id}/storage/kv/namespaces/{namespace_id}/keys"
        ));

        let mut params = Vec::new();
        if let Some(prefix) = prefix {
            params.push(("prefix", prefix.to_owned()));
        }
        if let Some(cursor) = cursor {
            params.push(("cursor", cursor.to_owned()));
        }
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        let (keys, result_info): (Vec<KvKey>, _) = self.get_with_info(url, &params).await?;
        Ok(KvKeyPage { keys, result_info })
    }

    /// Get the metadata stored alongside a key.
    ///
    /// `GET .../namespaces/{namespace_id}/metadata/{key_name}`
    pub async fn get_kv_key_metadata(
        &self,
        account_id: &str,
        namespace_id: &str,
        key_name: &str,
    ) -> Result<Value, Error> {
        let url = self.url_with_segment(
            &format!("accounts/{account_id}/storage/kv/namespaces/{namespace_id}/metadata"),
            key_name,
        );
        self.get(url).await
    }

    // ── Values ───────────────────────────────────────────────────────

    /// Read a value. Returns the raw body -- KV values are opaque bytes,
    /// not envelope-wrapped JSON.
    ///
    /// `GET .../namespaces/{namespace_id}/values/{key_name}`
    pub async fn get_kv_value(
        &self,
        account_id: &str,
        namespace_id: &str,
        key_name: &str,
    ) -> Result<String, Error> {
        let url = self.url_with_segment(
            &format!("accounts/{account_id}/storage/kv/namespaces/{namespace_id}/values"),
            key_name,
        );
        self.get_raw(url).await
    }

    /// Write a value (and optional metadata / expiration).
    ///
    /// `PUT .../namespaces/{namespace_id}/values/{key_name}` -- the value
    /// and metadata travel as multipart form parts, expirations as query
    /// parameters.
    pub async fn put_kv_value(
        &self,
        account_id: &str,
        namespace_id: &str,
        key_name: &str,
        write: &KvValueWrite,
    ) -> Result<Value, Error> {
        let url = self.url_with_segment(
            &format!("accounts/{account_id}/storage/kv/namespaces/{namespace_id}/values"),
            key_name,
        );
        debug!(account_id, namespace_id, key_name, "writing KV value");

        let mut params = Vec::new();
        if let Some(expiration) = write.expiration {
            params.push(("expiration", expiration.to_string()));
        }
        if let Some(ttl) = write.expiration_ttl {
            params.push(("expiration_ttl", ttl.to_string()));
        }

        let mut form = reqwest::multipart::Form::new().text("value", write.value.clone());
        if let Some(ref metadata) = write.metadata {
            form = form.text("metadata", metadata.to_string());
        }

        self.put_multipart(url, &params, form).await
    }

    /// Delete a single value.
    ///
    /// `DELETE .../namespaces/{namespace_id}/values/{key_name}`
    pub async fn delete_kv_value(
        &self,
        account_id: &str,
        namespace_id: &str,
        key_name: &str,
    ) -> Result<Value, Error> {
        let url = self.url_with_segment(
            &format!("accounts/{account_id}/storage/kv/namespaces/{namespace_id}/values"),
            key_name,
        );
        debug!(account_id, namespace_id, key_name, "deleting KV value");
        self.delete(url).await
    }

    // ── Bulk operations ──────────────────────────────────────────────

    /// Write up to 10,000 entries in one call.
    ///
    /// `PUT .../namespaces/{namespace_id}/bulk`
    pub async fn bulk_update_kv(
        &self,
        account_id: &str,
        namespace_id: &str,
        entries: &[KvBulkEntry],
    ) -> Result<Value, Error> {
        let url = self.url(&format!(
            "accounts/{account_id}/storage/kv/namespaces/{namespace_id}/bulk"
        ));
        debug!(
            account_id,
            namespace_id,
            count = entries.len(),
            "bulk writing KV entries"
        );
        self.put(url, &entries).await
    }

    /// Delete up to 10,000 keys in one call.
    ///
    /// `POST .../namespaces/{namespace_id}/bulk/delete`
    pub async fn bulk_delete_kv(
        &self,
        account_id: &str,
        namespace_id: &str,
        keys: &[String],
    ) -> Result<Value, Error> {
        let url = self.url(&format!(
            "accounts/{account_id}/storage/kv/namespaces/{namespace_id}/bulk/delete"
        ));
        debug!(
            account_id,
            namespace_id,
            count = keys.len(),
            "bulk deleting KV keys"
        );
        self.post(url, &keys).await
    }
}
