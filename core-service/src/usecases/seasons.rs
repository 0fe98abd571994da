use std::sync::Arc;

use core_library::models::SeasonDTO;
use core_library::repositories::SeasonsRepository;
use core_network::task::TaskHandle;
use core_network::transfer::CompletionHook;

/// Operations supported by the series detail screen.
pub enum SeasonsUseCaseRequest {
    GetSeason {
        slug: String,
        number: i64,
        completion: CompletionHook<SeasonDTO>,
    },
}

pub struct SeasonsUseCase {
    repository: Arc<dyn SeasonsRepository>,
}

impl SeasonsUseCase {
    pub fn new(repository: Arc<dyn SeasonsRepository>) -> Self {
        Self { repository }
    }

    pub fn execute(&self, request: SeasonsUseCaseRequest) -> TaskHandle {
        match request {
            SeasonsUseCaseRequest::GetSeason {
                slug,
                number,
                completion,
            } => self.repository.find_season(slug, number, completion),
        }
    }
}
