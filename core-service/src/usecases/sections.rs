use std::sync::Arc;

use core_library::models::SectionDTO;
use core_library::repositories::SectionsRepository;
use core_network::task::TaskHandle;
use core_network::transfer::{CachedHook, CompletionHook};

/// Operations supported by the sections screen.
pub enum SectionsUseCaseRequest {
    GetSections {
        cached: Option<CachedHook<Vec<SectionDTO>>>,
        completion: CompletionHook<Vec<SectionDTO>>,
    },
}

pub struct SectionsUseCase {
    repository: Arc<dyn SectionsRepository>,
}

impl SectionsUseCase {
    pub fn new(repository: Arc<dyn SectionsRepository>) -> Self {
        Self { repository }
    }

    pub fn execute(&self, request: SectionsUseCaseRequest) -> TaskHandle {
        match request {
            SectionsUseCaseRequest::GetSections { cached, completion } => {
                self.repository.find_all(cached, completion)
            }
        }
    }
}
