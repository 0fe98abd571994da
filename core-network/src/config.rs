//! API base configuration.

use serde::Deserialize;
use std::collections::HashMap;
use url::Url;

/// Base configuration an endpoint is resolved against.
///
/// Default headers are applied to every request (endpoint-level headers
/// override them by key); default query parameters are appended to every
/// built URL, which is how ambient values like API keys travel.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiDataConfig {
    pub base_url: Url,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub query_parameters: Vec<(String, String)>,
}

impl ApiDataConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            headers: HashMap::new(),
            query_parameters: Vec::new(),
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn with_query_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.query_parameters.push((key.into(), value.into()));
        self
    }
}
