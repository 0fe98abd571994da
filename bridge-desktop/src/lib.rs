//! # Desktop Bridge Implementations
//!
//! Default implementations of the bridge traits for desktop platforms:
//! a reqwest-backed [`HttpClient`](bridge_traits::http::HttpClient) and
//! SQLite / in-memory [`ResponseStore`](bridge_traits::store::ResponseStore)
//! backends.

pub mod http;
pub mod store;

pub use http::ReqwestHttpClient;
pub use store::{InMemoryResponseStore, SqliteResponseStore};
