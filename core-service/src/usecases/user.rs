use std::sync::Arc;

use core_library::models::{
    CreateProfileRequestDTO, ProfileDTO, SignInRequestDTO, SignUpRequestDTO, UpdateUserRequestDTO,
    UserResponseDTO,
};
use core_library::repositories::UserRepository;
use core_network::task::TaskHandle;
use core_network::transfer::{CachedHook, CompletionHook};

/// Operations supported by the account screens.
pub enum UserUseCaseRequest {
    SignIn {
        body: SignInRequestDTO,
        cached: Option<CachedHook<UserResponseDTO>>,
        completion: CompletionHook<UserResponseDTO>,
    },
    SignUp {
        body: SignUpRequestDTO,
        completion: CompletionHook<UserResponseDTO>,
    },
    SignOut {
        email: String,
        completion: CompletionHook<()>,
    },
    GetUserProfiles {
        user_id: String,
        completion: CompletionHook<Vec<ProfileDTO>>,
    },
    CreateUserProfile {
        user_id: String,
        body: CreateProfileRequestDTO,
        completion: CompletionHook<ProfileDTO>,
    },
    UpdateUserData {
        email: String,
        body: UpdateUserRequestDTO,
        completion: CompletionHook<UserResponseDTO>,
    },
}

pub struct UserUseCase {
    repository: Arc<dyn UserRepository>,
}

impl UserUseCase {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub fn execute(&self, request: UserUseCaseRequest) -> TaskHandle {
        match request {
            UserUseCaseRequest::SignIn {
                body,
                cached,
                completion,
            } => self.repository.sign_in(body, cached, completion),
            UserUseCaseRequest::SignUp { body, completion } => {
                self.repository.sign_up(body, completion)
            }
            UserUseCaseRequest::SignOut { email, completion } => {
                self.repository.sign_out(email, completion)
            }
            UserUseCaseRequest::GetUserProfiles {
                user_id,
                completion,
            } => self.repository.profiles(user_id, completion),
            UserUseCaseRequest::CreateUserProfile {
                user_id,
                body,
                completion,
            } => self.repository.create_profile(user_id, body, completion),
            UserUseCaseRequest::UpdateUserData {
                email,
                body,
                completion,
            } => self.repository.update_user(email, body, completion),
        }
    }
}
