//! Media catalog repository.

use bridge_traits::store::ResponseStore;
use core_network::task::{TaskHandle, TaskSlot};
use core_network::transfer::{CachedHook, CompletionHook, DataTransferService};
use std::sync::Arc;

use crate::endpoints;
use crate::models::{MediaDTO, MediaLookup};
use crate::repositories::support::{self, CacheEffect};

/// Constant key for the one cached full-catalog list.
pub const ALL_MEDIA_CACHE_KEY: &str = "media.all";

pub trait MediaRepository: Send + Sync {
    /// Cache-first fetch of the full media catalog.
    fn find_all(
        &self,
        cached: Option<CachedHook<Vec<MediaDTO>>>,
        completion: CompletionHook<Vec<MediaDTO>>,
    ) -> TaskHandle;

    /// Network fetch of a single media record by slug or id.
    fn find_one(&self, lookup: MediaLookup, completion: CompletionHook<MediaDTO>) -> TaskHandle;

    /// Network fetch with a caller-supplied filter query
    /// (e.g. `isNewRelease=true` for upcoming releases).
    fn find_upcoming(
        &self,
        query: Vec<(String, String)>,
        completion: CompletionHook<Vec<MediaDTO>>,
    ) -> TaskHandle;

    /// Network fetch of the most searched titles.
    fn find_top_searched(&self, completion: CompletionHook<Vec<MediaDTO>>) -> TaskHandle;

    /// Regex search over slug and title.
    fn search(&self, term: String, completion: CompletionHook<Vec<MediaDTO>>) -> TaskHandle;
}

pub struct HttpMediaRepository {
    transfer: Arc<DataTransferService>,
    store: Option<Arc<dyn ResponseStore>>,
    tasks: TaskSlot,
}

impl HttpMediaRepository {
    pub fn new(transfer: Arc<DataTransferService>, store: Option<Arc<dyn ResponseStore>>) -> Self {
        Self {
            transfer,
            store,
            tasks: TaskSlot::new(),
        }
    }
}

impl MediaRepository for HttpMediaRepository {
    fn find_all(
        &self,
        cached: Option<CachedHook<Vec<MediaDTO>>>,
        completion: CompletionHook<Vec<MediaDTO>>,
    ) -> TaskHandle {
        support::spawn_cache_first(
            self.transfer.clone(),
            self.store.clone(),
            &self.tasks,
            endpoints::all_media(),
            ALL_MEDIA_CACHE_KEY.to_string(),
            cached,
            completion,
        )
    }

    fn find_one(&self, lookup: MediaLookup, completion: CompletionHook<MediaDTO>) -> TaskHandle {
        support::spawn_network_only(
            self.transfer.clone(),
            self.store.clone(),
            &self.tasks,
            endpoints::media(&lookup),
            CacheEffect::None,
            completion,
        )
    }

    fn find_upcoming(
        &self,
        query: Vec<(String, String)>,
        completion: CompletionHook<Vec<MediaDTO>>,
    ) -> TaskHandle {
        support::spawn_network_only(
            self.transfer.clone(),
            self.store.clone(),
            &self.tasks,
            endpoints::upcoming_media(&query),
            CacheEffect::None,
            completion,
        )
    }

    fn find_top_searched(&self, completion: CompletionHook<Vec<MediaDTO>>) -> TaskHandle {
        support::spawn_network_only(
            self.transfer.clone(),
            self.store.clone(),
            &self.tasks,
            endpoints::top_searched_media(),
            CacheEffect::None,
            completion,
        )
    }

    fn search(&self, term: String, completion: CompletionHook<Vec<MediaDTO>>) -> TaskHandle {
        support::spawn_network_only(
            self.transfer.clone(),
            self.store.clone(),
            &self.tasks,
            endpoints::search_media(&term),
            CacheEffect::None,
            completion,
        )
    }
}
