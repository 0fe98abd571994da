use std::sync::Arc;

use core_library::models::{MyListDTO, MyListRequestDTO};
use core_library::repositories::MyListRepository;
use core_network::task::TaskHandle;
use core_network::transfer::CompletionHook;

/// Operations supported by the personal watch-list screen.
pub enum MyListUseCaseRequest {
    GetMyList {
        user_id: String,
        completion: CompletionHook<MyListDTO>,
    },
    UpdateMyList {
        body: MyListRequestDTO,
        completion: CompletionHook<MyListDTO>,
    },
}

pub struct MyListUseCase {
    repository: Arc<dyn MyListRepository>,
}

impl MyListUseCase {
    pub fn new(repository: Arc<dyn MyListRepository>) -> Self {
        Self { repository }
    }

    pub fn execute(&self, request: MyListUseCaseRequest) -> TaskHandle {
        match request {
            MyListUseCaseRequest::GetMyList {
                user_id,
                completion,
            } => self.repository.find(user_id, completion),
            MyListUseCaseRequest::UpdateMyList { body, completion } => {
                self.repository.update(body, completion)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    enum Call {
        Find(String),
        Update(MyListRequestDTO),
    }

    struct RecordingRepository {
        calls: mpsc::UnboundedSender<Call>,
    }

    impl MyListRepository for RecordingRepository {
        fn find(&self, user_id: String, completion: CompletionHook<MyListDTO>) -> TaskHandle {
            let _ = self.calls.send(Call::Find(user_id));
            TaskHandle::spawn(|_token| async move {
                completion(Ok(MyListDTO {
                    user: "u1".into(),
                    media: Vec::new(),
                }))
            })
        }

        fn update(
            &self,
            body: MyListRequestDTO,
            completion: CompletionHook<MyListDTO>,
        ) -> TaskHandle {
            let _ = self.calls.send(Call::Update(body));
            TaskHandle::spawn(|_token| async move {
                completion(Ok(MyListDTO {
                    user: "u1".into(),
                    media: Vec::new(),
                }))
            })
        }
    }

    #[tokio::test]
    async fn requests_route_to_matching_repository_method() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let use_case = MyListUseCase::new(Arc::new(RecordingRepository { calls: tx }));

        use_case.execute(MyListUseCaseRequest::GetMyList {
            user_id: "u1".into(),
            completion: Box::new(|_| {}),
        });
        use_case.execute(MyListUseCaseRequest::UpdateMyList {
            body: MyListRequestDTO {
                user: "u1".into(),
                media: vec!["m1".into()],
            },
            completion: Box::new(|_| {}),
        });

        match rx.recv().await {
            Some(Call::Find(user)) => assert_eq!(user, "u1"),
            _ => panic!("expected find dispatch first"),
        }
        match rx.recv().await {
            Some(Call::Update(body)) => assert_eq!(body.media, vec!["m1".to_string()]),
            _ => panic!("expected update dispatch second"),
        }
    }
}
