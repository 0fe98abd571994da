//! Browse sections repository.

use bridge_traits::store::ResponseStore;
use core_network::task::{TaskHandle, TaskSlot};
use core_network::transfer::{CachedHook, CompletionHook, DataTransferService};
use std::sync::Arc;

use crate::endpoints;
use crate::models::SectionDTO;
use crate::repositories::support;

/// The sections list is a read-only resource; the cache holds the one
/// list under a constant key.
pub const SECTIONS_CACHE_KEY: &str = "sections";

pub trait SectionsRepository: Send + Sync {
    /// Cache-first fetch of all browse sections.
    fn find_all(
        &self,
        cached: Option<CachedHook<Vec<SectionDTO>>>,
        completion: CompletionHook<Vec<SectionDTO>>,
    ) -> TaskHandle;
}

pub struct HttpSectionsRepository {
    transfer: Arc<DataTransferService>,
    store: Option<Arc<dyn ResponseStore>>,
    tasks: TaskSlot,
}

impl HttpSectionsRepository {
    pub fn new(transfer: Arc<DataTransferService>, store: Option<Arc<dyn ResponseStore>>) -> Self {
        Self {
            transfer,
            store,
            tasks: TaskSlot::new(),
        }
    }
}

impl SectionsRepository for HttpSectionsRepository {
    fn find_all(
        &self,
        cached: Option<CachedHook<Vec<SectionDTO>>>,
        completion: CompletionHook<Vec<SectionDTO>>,
    ) -> TaskHandle {
        support::spawn_cache_first(
            self.transfer.clone(),
            self.store.clone(),
            &self.tasks,
            endpoints::sections(),
            SECTIONS_CACHE_KEY.to_string(),
            cached,
            completion,
        )
    }
}
