//! Transport execution and failure classification.
//!
//! The network service resolves a [`Requestable`] against the base
//! configuration, runs it over the injected [`HttpClient`], and classifies
//! every failure into the [`NetworkError`] taxonomy. Received HTTP error
//! statuses are wrapped with their body preserved; only transport-level
//! problems become connectivity errors.

use async_trait::async_trait;
use bridge_traits::error::BridgeError;
use bridge_traits::http::HttpClient;
use bytes::Bytes;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::ApiDataConfig;
use crate::endpoint::Requestable;
use crate::error::NetworkError;

/// Executes transport requests for the transfer service.
#[async_trait]
pub trait NetworkService: Send + Sync {
    /// Resolve and execute `endpoint`, returning the raw response body.
    async fn request(&self, endpoint: &dyn Requestable) -> Result<Bytes, NetworkError>;
}

pub struct DefaultNetworkService {
    client: Arc<dyn HttpClient>,
    config: Arc<ApiDataConfig>,
}

impl DefaultNetworkService {
    pub fn new(client: Arc<dyn HttpClient>, config: Arc<ApiDataConfig>) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl NetworkService for DefaultNetworkService {
    async fn request(&self, endpoint: &dyn Requestable) -> Result<Bytes, NetworkError> {
        let request = endpoint.build_request(&self.config)?;
        let url = request.url.clone();

        debug!(
            method = %request.method,
            url = %url,
            headers = ?request.headers,
            body_bytes = request.body.as_ref().map_or(0, Bytes::len),
            "dispatching request"
        );

        let response = self
            .client
            .execute(request)
            .await
            .map_err(classify_bridge_error)?;

        debug!(url = %url, status = response.status, "received response");

        if !response.is_success() {
            warn!(url = %url, status = response.status, "server answered with error status");
            let body = if response.body.is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(NetworkError::HttpStatus {
                code: response.status,
                body,
            });
        }

        Ok(response.body)
    }
}

/// Map a bridge-level failure onto the transport taxonomy.
fn classify_bridge_error(error: BridgeError) -> NetworkError {
    match error {
        BridgeError::ConnectionFailed(_) => NetworkError::NotConnected,
        BridgeError::Cancelled => NetworkError::Cancelled,
        other => NetworkError::Generic(other.to_string()),
    }
}
