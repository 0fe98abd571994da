//! Shared pipeline machinery for the repository layer.
//!
//! Every repository operation runs as one spawned task owned by the
//! repository's `TaskSlot`. The pipeline re-checks its cancellation token
//! immediately before network dispatch and before each callback, so a
//! cancellation that lands between cache probe and network dispatch
//! prevents the dispatch entirely and no callback ever fires afterwards.

use bridge_traits::store::ResponseStore;
use core_network::endpoint::Endpoint;
use core_network::error::{DataTransferError, NetworkError};
use core_network::task::{CancellationToken, TaskHandle, TaskSlot};
use core_network::transfer::{CachedHook, CompletionHook, DataTransferService};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// Cache side effect applied after a successful write operation.
pub(crate) enum CacheEffect {
    None,
    Save { key: String },
    Delete { key: String },
}

/// Cache-first read: probe the store, surface a hit through `cached`,
/// then dispatch the network request and overwrite the entry on success.
pub(crate) fn spawn_cache_first<R>(
    transfer: Arc<DataTransferService>,
    store: Option<Arc<dyn ResponseStore>>,
    slot: &TaskSlot,
    endpoint: Endpoint<R>,
    cache_key: String,
    cached: Option<CachedHook<R>>,
    completion: CompletionHook<R>,
) -> TaskHandle
where
    R: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    slot.cancel();
    let handle = TaskHandle::spawn(move |token| async move {
        if let Some(store) = store.as_deref() {
            probe_cache(store, &cache_key, &token, cached).await;
        }

        if token.is_cancelled() {
            return;
        }

        match transfer.request(&endpoint).await {
            Ok(value) => {
                if let Some(store) = store.as_deref() {
                    persist(store, &cache_key, &value).await;
                }
                if !token.is_cancelled() {
                    completion(Ok(value));
                }
            }
            Err(error) => deliver_failure(&token, error, completion),
        }
    });
    slot.replace(handle.clone());
    handle
}

/// Network-only operation with an optional cache side effect on success.
pub(crate) fn spawn_network_only<R>(
    transfer: Arc<DataTransferService>,
    store: Option<Arc<dyn ResponseStore>>,
    slot: &TaskSlot,
    endpoint: Endpoint<R>,
    effect: CacheEffect,
    completion: CompletionHook<R>,
) -> TaskHandle
where
    R: Serialize + Send + Sync + 'static,
{
    slot.cancel();
    let handle = TaskHandle::spawn(move |token| async move {
        if token.is_cancelled() {
            return;
        }

        match transfer.request(&endpoint).await {
            Ok(value) => {
                apply_effect(store.as_deref(), &effect, Some(&value)).await;
                if !token.is_cancelled() {
                    completion(Ok(value));
                }
            }
            Err(error) => deliver_failure(&token, error, completion),
        }
    });
    slot.replace(handle.clone());
    handle
}

/// Network-only operation for an endpoint with no response content.
pub(crate) fn spawn_network_only_empty(
    transfer: Arc<DataTransferService>,
    store: Option<Arc<dyn ResponseStore>>,
    slot: &TaskSlot,
    endpoint: Endpoint<()>,
    effect: CacheEffect,
    completion: CompletionHook<()>,
) -> TaskHandle {
    slot.cancel();
    let handle = TaskHandle::spawn(move |token| async move {
        if token.is_cancelled() {
            return;
        }

        match transfer.request_empty(&endpoint).await {
            Ok(()) => {
                apply_effect::<()>(store.as_deref(), &effect, None).await;
                if !token.is_cancelled() {
                    completion(Ok(()));
                }
            }
            Err(error) => deliver_failure(&token, error, completion),
        }
    });
    slot.replace(handle.clone());
    handle
}

/// An operation whose endpoint failed to build; delivers the generation
/// failure through `completion` without touching the network.
pub(crate) fn spawn_failed<R>(
    slot: &TaskSlot,
    error: NetworkError,
    completion: CompletionHook<R>,
) -> TaskHandle
where
    R: Send + 'static,
{
    slot.cancel();
    let handle = TaskHandle::spawn(move |token| async move {
        if !token.is_cancelled() {
            completion(Err(DataTransferError::Network(error)));
        }
    });
    slot.replace(handle.clone());
    handle
}

fn deliver_failure<R>(
    token: &CancellationToken,
    error: DataTransferError,
    completion: CompletionHook<R>,
) {
    // Cancellation is a silent no-op on the callback surface.
    if error.is_cancelled() || token.is_cancelled() {
        return;
    }
    completion(Err(error));
}

async fn probe_cache<R: DeserializeOwned>(
    store: &dyn ResponseStore,
    key: &str,
    token: &CancellationToken,
    cached: Option<CachedHook<R>>,
) {
    let Some(cached) = cached else {
        return;
    };

    match store.get(key).await {
        Ok(Some(payload)) => match serde_json::from_slice::<R>(&payload) {
            Ok(record) => {
                if !token.is_cancelled() {
                    cached(record);
                }
            }
            Err(error) => {
                warn!(key, %error, "dropping undecodable cache entry");
                if let Err(error) = store.delete(key).await {
                    warn!(key, %error, "failed to drop cache entry");
                }
            }
        },
        Ok(None) => {}
        Err(error) => warn!(key, %error, "cache probe failed"),
    }
}

async fn persist<R: Serialize>(store: &dyn ResponseStore, key: &str, value: &R) {
    match serde_json::to_vec(value) {
        Ok(payload) => {
            if let Err(error) = store.save(key, payload.into()).await {
                warn!(key, %error, "failed to persist response");
            }
        }
        Err(error) => warn!(key, %error, "failed to encode response for cache"),
    }
}

async fn apply_effect<R: Serialize>(
    store: Option<&dyn ResponseStore>,
    effect: &CacheEffect,
    value: Option<&R>,
) {
    let Some(store) = store else {
        return;
    };

    match effect {
        CacheEffect::None => {}
        CacheEffect::Save { key } => {
            if let Some(value) = value {
                persist(store, key, value).await;
            }
        }
        CacheEffect::Delete { key } => {
            if let Err(error) = store.delete(key).await {
                warn!(key, %error, "failed to invalidate cache entry");
            }
        }
    }
}
