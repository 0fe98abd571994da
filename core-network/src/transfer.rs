//! Decoding layer and transfer-level error classification.
//!
//! The transfer service runs an endpoint through the network service,
//! decodes the raw body with the endpoint's decoder capability, and wraps
//! every failure into the [`DataTransferError`] taxonomy. Transport
//! failures first pass through a resolver hook so upstream layers can
//! remap them (for example an HTTP 401 into an app-specific
//! "unauthenticated" error) without flattening the taxonomy.

use std::sync::Arc;
use tracing::error;

use crate::endpoint::{Endpoint, Requestable};
use crate::error::{DataTransferError, NetworkError};
use crate::network::NetworkService;

/// Best-effort hint callback fired when a cached record exists.
pub type CachedHook<T> = Box<dyn FnOnce(T) + Send>;

/// Terminal callback for one repository operation.
pub type CompletionHook<T> = Box<dyn FnOnce(Result<T, DataTransferError>) + Send>;

/// Outcome of the error-resolver hook.
pub enum ResolvedNetworkError {
    /// Still a transport failure; surfaced as `DataTransferError::Network`.
    Unchanged(NetworkError),
    /// Remapped into an application error; surfaced as
    /// `DataTransferError::Resolved`.
    Remapped(Box<dyn std::error::Error + Send + Sync>),
}

/// Hook allowing upstream remapping of transport failures.
pub trait DataTransferErrorResolver: Send + Sync {
    fn resolve(&self, error: NetworkError) -> ResolvedNetworkError;
}

/// Default resolver; passes every failure through unchanged.
pub struct IdentityErrorResolver;

impl DataTransferErrorResolver for IdentityErrorResolver {
    fn resolve(&self, error: NetworkError) -> ResolvedNetworkError {
        ResolvedNetworkError::Unchanged(error)
    }
}

/// Decodes raw transport bytes into typed responses.
pub struct DataTransferService {
    network: Arc<dyn NetworkService>,
    resolver: Arc<dyn DataTransferErrorResolver>,
}

impl DataTransferService {
    pub fn new(network: Arc<dyn NetworkService>) -> Self {
        Self::with_resolver(network, Arc::new(IdentityErrorResolver))
    }

    pub fn with_resolver(
        network: Arc<dyn NetworkService>,
        resolver: Arc<dyn DataTransferErrorResolver>,
    ) -> Self {
        Self { network, resolver }
    }

    /// Execute `endpoint` and decode its response.
    pub async fn request<R: 'static>(
        &self,
        endpoint: &Endpoint<R>,
    ) -> Result<R, DataTransferError> {
        match self.network.request(endpoint).await {
            Ok(body) => {
                if body.is_empty() {
                    let err = DataTransferError::NoResponseBody;
                    error!(path = endpoint.path(), error = %err, "request failed");
                    return Err(err);
                }
                endpoint.decode_response(&body).map_err(|source| {
                    let err = DataTransferError::Decoding(source);
                    error!(path = endpoint.path(), error = %err, "request failed");
                    err
                })
            }
            Err(network_error) => Err(self.resolve_failure(network_error, endpoint.path())),
        }
    }

    /// Execute an endpoint whose expected response carries no content;
    /// success maps to unit, bypassing the decoder entirely.
    pub async fn request_empty(&self, endpoint: &Endpoint<()>) -> Result<(), DataTransferError> {
        match self.network.request(endpoint).await {
            Ok(_) => Ok(()),
            Err(network_error) => Err(self.resolve_failure(network_error, endpoint.path())),
        }
    }

    fn resolve_failure(&self, error: NetworkError, path: &str) -> DataTransferError {
        let err = match self.resolver.resolve(error) {
            ResolvedNetworkError::Unchanged(network_error) => {
                DataTransferError::Network(network_error)
            }
            ResolvedNetworkError::Remapped(cause) => DataTransferError::Resolved(cause),
        };
        error!(path, error = %err, "request failed");
        err
    }
}
