// HTTP client for the campaigns backend
//
// Base path: {base}/api/v2/campaigns/
// One request per call: list = GET, create = POST, update = PUT {id},
// delete = DELETE {id}. Errors are returned as-is, never retried.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::Error;
use crate::collection::Collection;
use crate::transport::TransportConfig;

/// Path prefix every collection lives under.
const API_PREFIX: [&str; 3] = ["api", "v2", "campaigns"];

// ── Error response shape from the backend ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ErrorResponse {
    fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .or_else(|| match self.detail? {
                Value::String(s) => Some(s),
                other => Some(other.to_string()),
            })
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the routers / campaigns / segments REST collections.
///
/// Holds no state beyond the HTTP connection pool: caching lives in
/// `segmenta-core`'s entity stores.
#[derive(Debug, Clone)]
pub struct ResourceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ResourceClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for `base_url` (e.g. `https://backend.example.com`).
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Append `/api/v2/campaigns` to whatever path the base URL carries.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut segments = url.path_segments_mut().map_err(|()| Error::InvalidBaseUrl {
                url: raw.to_owned(),
            })?;
            segments.pop_if_empty().extend(API_PREFIX);
        }
        Ok(url)
    }

    /// The resolved API root (`{base}/api/v2/campaigns`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidBaseUrl {
                url: self.base_url.to_string(),
            })?
            .extend(segments);
        Ok(url)
    }

    /// `{base}/api/v2/campaigns/{collection}`
    pub fn collection_url(&self, collection: Collection) -> Result<Url, Error> {
        self.url(&[collection.as_ref()])
    }

    /// `{base}/api/v2/campaigns/{collection}/{id}`
    pub fn item_url(&self, collection: Collection, id: &str) -> Result<Url, Error> {
        self.url(&[collection.as_ref(), id])
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// GET the whole collection.
    ///
    /// A body that is not a JSON array is treated as an empty list.
    pub async fn list<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, Error> {
        let url = self.collection_url(collection)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let body: Value = Self::handle_response(resp).await?;
        Self::decode_list(body)
    }

    /// POST a new entity; returns the server's representation.
    pub async fn create<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        collection: Collection,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.collection_url(collection)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    /// PUT to `{collection}/{id}`; returns the decoded response body.
    ///
    /// The body may be a partial object, so it is handed back untyped
    /// for the caller to merge.
    pub async fn update<B: Serialize + Sync>(
        &self,
        collection: Collection,
        id: &str,
        body: &B,
    ) -> Result<Value, Error> {
        let url = self.item_url(collection, id)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_response_or_null(resp).await
    }

    /// DELETE `{collection}/{id}`. Any success body is discarded.
    pub async fn delete(&self, collection: Collection, id: &str) -> Result<(), Error> {
        let url = self.item_url(collection, id)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(resp).await
    }

    /// GET the flat list of group names.
    pub async fn list_groups(&self) -> Result<Vec<String>, Error> {
        let url = self.url(&["groups"])?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let body: Value = Self::handle_response(resp).await?;
        Self::decode_list(body)
    }

    // ── Response handling ────────────────────────────────────────────

    fn decode_list<T: DeserializeOwned>(body: Value) -> Result<Vec<T>, Error> {
        match body {
            Value::Array(_) => serde_json::from_value(body.clone()).map_err(|e| {
                let raw = body.to_string();
                Error::Deserialization {
                    message: format!("{e} (body preview: {:?})", preview(&raw)),
                    body: raw,
                }
            }),
            other => {
                trace!(kind = json_kind(&other), "list body is not an array, using empty list");
                Ok(Vec::new())
            }
        }
    }

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&body)),
                body,
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    /// Like `handle_response`, but an empty success body decodes as `null`.
    async fn handle_response_or_null(resp: reqwest::Response) -> Result<Value, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            if body.trim().is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&body)),
                body,
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(ErrorResponse::into_message)
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    preview(&raw).to_owned()
                }
            });

        Error::Http {
            status: status.as_u16(),
            message,
        }
    }
}

/// First 200 bytes of a body, cut on a char boundary.
fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
