//! Layered error taxonomy for the data-transfer pipeline.
//!
//! [`NetworkError`] is produced only by the transport layer;
//! [`DataTransferError`] is produced only by the transfer service and
//! always wraps a transport or decode failure, never invents one. The
//! repository layer adds no error kinds of its own.

use bytes::Bytes;
use thiserror::Error;

/// Transport-level failures.
#[derive(Error, Debug, Clone)]
pub enum NetworkError {
    /// The transport succeeded but the server answered with a non-2xx
    /// status. The body is preserved for upstream diagnostic decoding.
    #[error("server responded with status {code}")]
    HttpStatus { code: u16, body: Option<Bytes> },

    #[error("no network connection")]
    NotConnected,

    #[error("request cancelled")]
    Cancelled,

    /// The request description could not be turned into a valid transport
    /// request. Detected before any network attempt.
    #[error("could not generate request: {0}")]
    UrlGeneration(String),

    #[error("transport failure: {0}")]
    Generic(String),
}

impl NetworkError {
    /// Status code of an `HttpStatus` failure, if that is what this is.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            NetworkError::HttpStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Transfer-level failures surfaced to repositories and their callers.
#[derive(Error, Debug)]
pub enum DataTransferError {
    /// The transport delivered a 2xx response with an empty body while a
    /// decoded value was expected.
    #[error("response body was empty")]
    NoResponseBody,

    #[error("failed to decode response: {0}")]
    Decoding(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("network failure: {0}")]
    Network(#[source] NetworkError),

    /// A transport failure the error-resolver hook remapped into an
    /// application-specific error.
    #[error("resolved failure: {0}")]
    Resolved(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl DataTransferError {
    /// True when this wraps a transport-level cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            DataTransferError::Network(NetworkError::Cancelled)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_accessor() {
        let error = NetworkError::HttpStatus {
            code: 404,
            body: None,
        };
        assert_eq!(error.status_code(), Some(404));
        assert_eq!(NetworkError::NotConnected.status_code(), None);
    }

    #[test]
    fn test_cancelled_detection() {
        assert!(DataTransferError::Network(NetworkError::Cancelled).is_cancelled());
        assert!(!DataTransferError::NoResponseBody.is_cancelled());
    }
}
