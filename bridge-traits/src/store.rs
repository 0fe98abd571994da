//! Persistent Response Store Abstraction
//!
//! An opaque key-value store for previously decoded responses. The
//! repository layer queries it before dispatching a network fetch and
//! overwrites entries with fresh network payloads; the core does not care
//! what engine backs it.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;

/// Keyed persistence for cached response payloads.
///
/// Keys encode the request shape that produced the payload: constant for
/// read-only resources (the one cached list), request identity for
/// authenticated resources. Writes must be atomic per key with
/// last-write-wins semantics.
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Fetch a previously saved payload.
    ///
    /// Returns `Ok(None)` when no entry exists for the key.
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Save a payload, overwriting any prior entry for the key.
    async fn save(&self, key: &str, payload: Bytes) -> Result<()>;

    /// Delete the entry for the key, if any.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Check whether an entry exists without retrieving it.
    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}
