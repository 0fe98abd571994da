use thiserror::Error;

/// Failures a bridge implementation can surface to the core.
///
/// Transport implementations are expected to classify their native errors
/// into these variants so the network layer can map them onto its own
/// taxonomy without inspecting implementation-specific error types.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("operation timed out")]
    Timeout,

    #[error("operation cancelled")]
    Cancelled,

    #[error("bridge operation failed: {0}")]
    OperationFailed(String),

    #[error("store operation failed: {0}")]
    StoreFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
