//! Seasons repository.

use bridge_traits::store::ResponseStore;
use core_network::task::{TaskHandle, TaskSlot};
use core_network::transfer::{CompletionHook, DataTransferService};
use std::sync::Arc;

use crate::endpoints;
use crate::models::SeasonDTO;
use crate::repositories::support::{self, CacheEffect};

pub trait SeasonsRepository: Send + Sync {
    /// Network fetch of one season of a series.
    fn find_season(
        &self,
        slug: String,
        number: i64,
        completion: CompletionHook<SeasonDTO>,
    ) -> TaskHandle;
}

pub struct HttpSeasonsRepository {
    transfer: Arc<DataTransferService>,
    store: Option<Arc<dyn ResponseStore>>,
    tasks: TaskSlot,
}

impl HttpSeasonsRepository {
    pub fn new(transfer: Arc<DataTransferService>, store: Option<Arc<dyn ResponseStore>>) -> Self {
        Self {
            transfer,
            store,
            tasks: TaskSlot::new(),
        }
    }
}

impl SeasonsRepository for HttpSeasonsRepository {
    fn find_season(
        &self,
        slug: String,
        number: i64,
        completion: CompletionHook<SeasonDTO>,
    ) -> TaskHandle {
        support::spawn_network_only(
            self.transfer.clone(),
            self.store.clone(),
            &self.tasks,
            endpoints::season(&slug, number),
            CacheEffect::None,
            completion,
        )
    }
}
