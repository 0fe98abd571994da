//! # Host Bridge Traits
//!
//! Platform seams the media-browse core depends on. Hosts supply an
//! [`http::HttpClient`] for transport execution and (optionally) a
//! [`store::ResponseStore`] for on-device persistence of decoded responses.
//! The core never talks to the network or the disk through anything else.

pub mod error;
pub mod http;
pub mod store;

pub use error::{BridgeError, Result};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use store::ResponseStore;
