//! # Core Network
//!
//! The data-transfer pipeline of the media-browse core:
//!
//! - [`endpoint`]: declarative request descriptions (`Endpoint<R>`) and the
//!   pure builder that turns them into transport requests
//! - [`network`]: transport execution with a classified
//!   [`NetworkError`](error::NetworkError) taxonomy
//! - [`transfer`]: decoding and the [`DataTransferError`](error::DataTransferError)
//!   taxonomy, with an error-resolver hook for upstream remapping
//! - [`task`]: cancellation primitives and the single-slot task discipline
//!   repositories rely on
//!
//! Everything here is UI-agnostic; results are delivered on the Tokio
//! runtime the owning repository spawned onto.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod network;
pub mod task;
pub mod transfer;

pub use config::ApiDataConfig;
pub use endpoint::{
    BodyEncoding, Endpoint, JsonResponseDecoder, RawDataResponseDecoder, Requestable,
    ResponseDecoder,
};
pub use error::{DataTransferError, NetworkError};
pub use network::{DefaultNetworkService, NetworkService};
pub use task::{Cancellable, TaskHandle, TaskSlot};
pub use transfer::{
    CachedHook, CompletionHook, DataTransferErrorResolver, DataTransferService,
    IdentityErrorResolver, ResolvedNetworkError,
};
