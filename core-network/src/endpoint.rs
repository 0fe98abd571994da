//! Declarative request descriptions and the pure endpoint builder.
//!
//! An [`Endpoint`] describes one HTTP call and the decoded type it is
//! expected to produce. Building the transport request is deterministic
//! and free of I/O, which keeps this layer trivially unit-testable.

use bridge_traits::http::{HttpMethod, HttpRequest};
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use url::Url;

use crate::config::ApiDataConfig;
use crate::error::NetworkError;

/// How body parameters are serialized onto the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    /// The parameter map as one JSON document.
    JsonObject,
    /// `key=value&...` with percent-encoding, ASCII output.
    FormAsciiString,
}

/// Decodes a raw response body into the endpoint's expected type.
pub trait ResponseDecoder<R>: Send + Sync {
    fn decode(&self, body: &[u8]) -> Result<R, Box<dyn std::error::Error + Send + Sync>>;
}

/// JSON decoder; the default for every endpoint.
pub struct JsonResponseDecoder;

impl<R: DeserializeOwned> ResponseDecoder<R> for JsonResponseDecoder {
    fn decode(&self, body: &[u8]) -> Result<R, Box<dyn std::error::Error + Send + Sync>> {
        serde_json::from_slice(body).map_err(Into::into)
    }
}

/// Pass-through decoder for endpoints whose payload is consumed as-is.
pub struct RawDataResponseDecoder;

impl ResponseDecoder<Bytes> for RawDataResponseDecoder {
    fn decode(&self, body: &[u8]) -> Result<Bytes, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Bytes::copy_from_slice(body))
    }
}

/// Anything that can be resolved against a base configuration into a
/// transport request. The transport layer depends on this seam rather
/// than on `Endpoint` directly.
pub trait Requestable: Send + Sync {
    fn path(&self) -> &str;
    fn method(&self) -> HttpMethod;
    fn build_request(&self, config: &ApiDataConfig) -> Result<HttpRequest, NetworkError>;
}

/// Declarative description of one HTTP call and its expected decoded
/// response type `R`. Immutable once built; construction is builder-style.
///
/// `R` never appears at runtime except to select the decoder.
pub struct Endpoint<R> {
    path: String,
    method: HttpMethod,
    header_parameters: HashMap<String, String>,
    query_parameters: Vec<(String, String)>,
    body_parameters: serde_json::Map<String, Value>,
    body_encoding: BodyEncoding,
    decoder: Arc<dyn ResponseDecoder<R>>,
    _response: PhantomData<fn() -> R>,
}

impl<R: DeserializeOwned + 'static> Endpoint<R> {
    /// New endpoint with the default JSON decoder.
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self::with_decoder(path, method, Arc::new(JsonResponseDecoder))
    }
}

impl<R> Endpoint<R> {
    /// New endpoint with an explicit decoder capability.
    pub fn with_decoder(
        path: impl Into<String>,
        method: HttpMethod,
        decoder: Arc<dyn ResponseDecoder<R>>,
    ) -> Self {
        Self {
            path: path.into(),
            method,
            header_parameters: HashMap::new(),
            query_parameters: Vec::new(),
            body_parameters: serde_json::Map::new(),
            body_encoding: BodyEncoding::JsonObject,
            decoder,
            _response: PhantomData,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.header_parameters.insert(key.into(), value.into());
        self
    }

    /// Append an explicit query parameter. Duplicate keys resolve
    /// last-write-wins when the request is built.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_parameters.push((key.into(), value.into()));
        self
    }

    /// Merge the fields of an encodable object into the query. Object
    /// fields are appended after explicit parameters, so they win on key
    /// conflicts.
    pub fn query_object<T: Serialize>(mut self, object: &T) -> Result<Self, NetworkError> {
        for (key, value) in encode_to_fields(object)? {
            self.query_parameters.push((key, value));
        }
        Ok(self)
    }

    /// Set one body parameter.
    pub fn body_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body_parameters.insert(key.into(), value.into());
        self
    }

    /// Use an encodable object's fields as the body parameter map.
    pub fn body_object<T: Serialize>(mut self, object: &T) -> Result<Self, NetworkError> {
        let value = serde_json::to_value(object)
            .map_err(|e| NetworkError::UrlGeneration(format!("body did not encode: {}", e)))?;
        match value {
            Value::Object(map) => {
                self.body_parameters = map;
                Ok(self)
            }
            _ => Err(NetworkError::UrlGeneration(
                "body object did not encode to a map".to_string(),
            )),
        }
    }

    pub fn body_encoding(mut self, encoding: BodyEncoding) -> Self {
        self.body_encoding = encoding;
        self
    }

    /// Decode a response body with this endpoint's decoder capability.
    pub fn decode_response(
        &self,
        body: &[u8],
    ) -> Result<R, Box<dyn std::error::Error + Send + Sync>> {
        self.decoder.decode(body)
    }

    fn build_url(&self, config: &ApiDataConfig) -> Result<Url, NetworkError> {
        let mut url = if self.path.starts_with("http://") || self.path.starts_with("https://") {
            // Already fully qualified; use verbatim.
            Url::parse(&self.path)
                .map_err(|e| NetworkError::UrlGeneration(format!("{}: {}", self.path, e)))?
        } else {
            let base = config.base_url.as_str().trim_end_matches('/');
            let path = self.path.trim_start_matches('/');
            Url::parse(&format!("{}/{}", base, path))
                .map_err(|e| NetworkError::UrlGeneration(format!("{}: {}", self.path, e)))?
        };

        let mut pairs = self.query_parameters.clone();
        pairs.extend(config.query_parameters.iter().cloned());
        let pairs = dedupe_last_wins(pairs);
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(url)
    }

    fn build_body(&self) -> Result<Option<Bytes>, NetworkError> {
        if self.body_parameters.is_empty() {
            return Ok(None);
        }

        let bytes = match self.body_encoding {
            BodyEncoding::JsonObject => {
                serde_json::to_vec(&Value::Object(self.body_parameters.clone()))
                    .map_err(|e| NetworkError::UrlGeneration(format!("body did not encode: {}", e)))?
            }
            BodyEncoding::FormAsciiString => {
                let fields: Vec<(String, String)> = self
                    .body_parameters
                    .iter()
                    .map(|(key, value)| (key.clone(), value_to_string(value)))
                    .collect();
                serde_urlencoded::to_string(&fields)
                    .map_err(|e| NetworkError::UrlGeneration(format!("body did not encode: {}", e)))?
                    .into_bytes()
            }
        };

        Ok(Some(Bytes::from(bytes)))
    }
}

impl<R> Requestable for Endpoint<R> {
    fn path(&self) -> &str {
        &self.path
    }

    fn method(&self) -> HttpMethod {
        self.method
    }

    fn build_request(&self, config: &ApiDataConfig) -> Result<HttpRequest, NetworkError> {
        let url = self.build_url(config)?;

        let mut request = HttpRequest::new(self.method, url);
        for (key, value) in &config.headers {
            request = request.header(key, value);
        }
        // Endpoint headers override configuration defaults by key.
        for (key, value) in &self.header_parameters {
            request = request.header(key, value);
        }

        if let Some(body) = self.build_body()? {
            request = request.body(body);
        }

        Ok(request)
    }
}

/// Flatten an encodable object into string key/value fields.
fn encode_to_fields<T: Serialize>(object: &T) -> Result<Vec<(String, String)>, NetworkError> {
    let value = serde_json::to_value(object)
        .map_err(|e| NetworkError::UrlGeneration(format!("query object did not encode: {}", e)))?;
    match value {
        Value::Object(map) => Ok(map
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| (key, value_to_string(&value)))
            .collect()),
        _ => Err(NetworkError::UrlGeneration(
            "query object did not encode to a map".to_string(),
        )),
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Resolve duplicate keys last-write-wins while preserving the position of
/// each key's first insertion.
fn dedupe_last_wins(pairs: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut order: Vec<String> = Vec::new();
    let mut latest: HashMap<String, String> = HashMap::new();
    for (key, value) in pairs {
        if !latest.contains_key(&key) {
            order.push(key.clone());
        }
        latest.insert(key, value);
    }
    order
        .into_iter()
        .map(|key| {
            let value = latest.remove(&key).unwrap_or_default();
            (key, value)
        })
        .collect()
}
