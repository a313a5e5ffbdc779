// Hand-crafted async HTTP client for the Cloudflare v4 REST API.
//
// Base path: https://api.cloudflare.com/client/v4/
// Auth: Authorization bearer token, or X-Auth-Key + X-Auth-Email
//
// Endpoint modules (zones, dns, kv, queues, hyperdrive) are implemented
// as inherent methods via separate files to keep this module focused on
// transport mechanics and envelope unwrapping.

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{ApiMessage, Envelope, ResultInfo};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4/";

/// Async client for the Cloudflare v4 API.
///
/// All methods perform exactly one HTTP request and strip the
/// `{success, errors, result}` envelope, so callers see the unwrapped
/// `result` payload (or the raw body, for KV value reads).
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client against the production API root.
    pub fn new(credentials: &Credentials, transport: &TransportConfig) -> Result<Self, Error> {
        Self::with_base_url(DEFAULT_BASE_URL, credentials, transport)
    }

    /// Build a client against a custom API root.
    ///
    /// Injects the credential headers as defaults on every request.
    pub fn with_base_url(
        base_url: &str,
        credentials: &Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let headers = credentials.headers()?;
        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Build the base URL, appending `/client/v4/` when absent.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        // Strip trailing slash for uniform handling
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/client/v4") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/client/v4/"));
        }

        Ok(url)
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Join a relative path (e.g. `"zones"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Url {
        // base_url always ends with `/client/v4/`, so joining works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    /// Join a path, then push one caller-supplied segment.
    ///
    /// KV key names may contain `/` and other reserved characters;
    /// pushing them as a segment percent-encodes correctly.
    pub(crate) fn url_with_segment(&self, path: &str, segment: &str) -> Url {
        let mut url = self.url(path);
        url.path_segments_mut()
            .expect("API base URL should support path segments")
            .pop_if_empty()
            .push(segment);
        url
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Ok(read_envelope(resp).await?.0)
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Ok(read_envelope(resp).await?.0)
    }

    /// GET that preserves `result_info` (cursor pagination).
    pub(crate) async fn get_with_info<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<(T, Option<ResultInfo>), Error> {
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        read_envelope(resp).await
    }

    /// GET returning the raw response body (KV value reads; no envelope).
    pub(crate) async fn get_raw(&self, url: Url) -> Result<String, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        read_raw(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Ok(read_envelope(resp).await?.0)
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        Ok(read_envelope(resp).await?.0)
    }

    /// PUT with a multipart form body and query parameters (KV value writes).
    pub(crate) async fn put_multipart<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
        form: reqwest::multipart::Form,
    ) -> Result<T, Error> {
        debug!("PUT {url} params={params:?}");

        let resp = self
            .http
            .put(url)
            .query(params)
            .multipart(form)
            .send()
            .await?;
        Ok(read_envelope(resp).await?.0)
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("PATCH {url}");

        let resp = self.http.patch(url).json(body).send().await?;
        Ok(read_envelope(resp).await?.0)
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Ok(read_envelope(resp).await?.0)
    }
}

// ── Response handling ────────────────────────────────────────────────

/// Parse the v4 envelope, returning `(result, result_info)` on success.
///
/// A `null` result is tolerated for payload types that accept it
/// (`Value`, `Option<_>`); endpoints with a mandatory payload surface a
/// deserialization error instead.
async fn read_envelope<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<(T, Option<ResultInfo>), Error> {
    let status = resp.status();
    let body = resp.text().await?;

    let envelope: Envelope<T> = match serde_json::from_str(&body) {
        Ok(envelope) => envelope,
        Err(e) if status.is_success() => {
            let preview = &body[..body.len().min(200)];
            return Err(Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            });
        }
        Err(_) => return Err(raw_error(status, body)),
    };

    if !envelope.success {
        return Err(envelope_error(status, &envelope.errors));
    }

    let info = envelope.result_info;
    match envelope.result {
        Some(result) => Ok((result, info)),
        None => serde_json::from_value(Value::Null)
            .map(|result| (result, info))
            .map_err(|_| Error::Deserialization {
                message: "response envelope has no `result`".into(),
                body,
            }),
    }
}

/// Handle a raw-body endpoint: success returns the body text, failure
/// parses the error envelope Cloudflare still sends.
async fn read_raw(resp: reqwest::Response) -> Result<String, Error> {
    let status = resp.status();
    let body = resp.text().await?;

    if status.is_success() {
        return Ok(body);
    }

    match serde_json::from_str::<Envelope<Value>>(&body) {
        Ok(envelope) => Err(envelope_error(status, &envelope.errors)),
        Err(_) => Err(raw_error(status, body)),
    }
}

/// Map an unsuccessful envelope to an error, surfacing the first
/// upstream error entry unchanged.
fn envelope_error(status: StatusCode, errors: &[ApiMessage]) -> Error {
    let first = errors.first();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Error::Authentication {
            message: first.map_or_else(|| status.to_string(), |m| m.message.clone()),
        };
    }

    Error::Api {
        status: status.as_u16(),
        code: first.map(|m| m.code),
        message: first.map_or_else(|| status.to_string(), |m| m.message.clone()),
    }
}

/// Map a non-envelope error body to an error.
fn raw_error(status: StatusCode, body: String) -> Error {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Error::Authentication {
            message: if body.is_empty() {
                status.to_string()
            } else {
                body
            },
        };
    }

    Error::Api {
        status: status.as_u16(),
        code: None,
        message: if body.is_empty() {
            status.to_string()
        } else {
            body
        },
    }
}
