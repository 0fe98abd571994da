use std::sync::Arc;

use core_library::models::{MediaDTO, MediaLookup};
use core_library::repositories::MediaRepository;
use core_network::task::TaskHandle;
use core_network::transfer::{CachedHook, CompletionHook};

/// Operations supported by the media browsing screens.
pub enum MediaUseCaseRequest {
    GetAllMedia {
        cached: Option<CachedHook<Vec<MediaDTO>>>,
        completion: CompletionHook<Vec<MediaDTO>>,
    },
    GetMedia {
        lookup: MediaLookup,
        completion: CompletionHook<MediaDTO>,
    },
    GetUpcomingMedia {
        query: Vec<(String, String)>,
        completion: CompletionHook<Vec<MediaDTO>>,
    },
    GetTopSearchedMedia {
        completion: CompletionHook<Vec<MediaDTO>>,
    },
    SearchMedia {
        term: String,
        completion: CompletionHook<Vec<MediaDTO>>,
    },
}

pub struct MediaUseCase {
    repository: Arc<dyn MediaRepository>,
}

impl MediaUseCase {
    pub fn new(repository: Arc<dyn MediaRepository>) -> Self {
        Self { repository }
    }

    pub fn execute(&self, request: MediaUseCaseRequest) -> TaskHandle {
        match request {
            MediaUseCaseRequest::GetAllMedia { cached, completion } => {
                self.repository.find_all(cached, completion)
            }
            MediaUseCaseRequest::GetMedia { lookup, completion } => {
                self.repository.find_one(lookup, completion)
            }
            MediaUseCaseRequest::GetUpcomingMedia { query, completion } => {
                self.repository.find_upcoming(query, completion)
            }
            MediaUseCaseRequest::GetTopSearchedMedia { completion } => {
                self.repository.find_top_searched(completion)
            }
            MediaUseCaseRequest::SearchMedia { term, completion } => {
                self.repository.search(term, completion)
            }
        }
    }
}
