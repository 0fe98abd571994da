//! Personal watch-list repository.

use bridge_traits::store::ResponseStore;
use core_network::task::{TaskHandle, TaskSlot};
use core_network::transfer::{CompletionHook, DataTransferService};
use std::sync::Arc;

use crate::endpoints;
use crate::models::{MyListDTO, MyListRequestDTO};
use crate::repositories::support::{self, CacheEffect};

pub trait MyListRepository: Send + Sync {
    /// Network fetch of the user's list.
    fn find(&self, user_id: String, completion: CompletionHook<MyListDTO>) -> TaskHandle;

    /// Replace the list's media membership.
    fn update(&self, body: MyListRequestDTO, completion: CompletionHook<MyListDTO>) -> TaskHandle;
}

pub struct HttpMyListRepository {
    transfer: Arc<DataTransferService>,
    store: Option<Arc<dyn ResponseStore>>,
    tasks: TaskSlot,
}

impl HttpMyListRepository {
    pub fn new(transfer: Arc<DataTransferService>, store: Option<Arc<dyn ResponseStore>>) -> Self {
        Self {
            transfer,
            store,
            tasks: TaskSlot::new(),
        }
    }
}

impl MyListRepository for HttpMyListRepository {
    fn find(&self, user_id: String, completion: CompletionHook<MyListDTO>) -> TaskHandle {
        support::spawn_network_only(
            self.transfer.clone(),
            self.store.clone(),
            &self.tasks,
            endpoints::my_list(&user_id),
            CacheEffect::None,
            completion,
        )
    }

    fn update(&self, body: MyListRequestDTO, completion: CompletionHook<MyListDTO>) -> TaskHandle {
        match endpoints::update_my_list(&body) {
            Ok(endpoint) => support::spawn_network_only(
                self.transfer.clone(),
                self.store.clone(),
                &self.tasks,
                endpoint,
                CacheEffect::None,
                completion,
            ),
            Err(error) => support::spawn_failed(&self.tasks, error, completion),
        }
    }
}
