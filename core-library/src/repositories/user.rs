//! User and authentication repository.
//!
//! Sign-in behaves like a cache-first read: the cached credential record
//! is surfaced first, then the network re-validates it. Sign-up and
//! sign-out are write-only; sign-out also invalidates the cached record
//! for the signed-out identity. Updating user data writes the fresh
//! record back into the cache before completing.

use bridge_traits::store::ResponseStore;
use core_network::task::{TaskHandle, TaskSlot};
use core_network::transfer::{CachedHook, CompletionHook, DataTransferService};
use std::sync::Arc;

use crate::endpoints;
use crate::models::{
    CreateProfileRequestDTO, ProfileDTO, SignInRequestDTO, SignUpRequestDTO, UpdateUserRequestDTO,
    UserResponseDTO,
};
use crate::repositories::support::{self, CacheEffect};

/// Credential records are indexed by the identity of the request that
/// produced them.
pub fn credential_cache_key(email: &str) -> String {
    format!("user.{}", email)
}

pub trait UserRepository: Send + Sync {
    /// Cache-first sign-in: cached credentials are surfaced first, then
    /// the network re-validates and overwrites them.
    fn sign_in(
        &self,
        body: SignInRequestDTO,
        cached: Option<CachedHook<UserResponseDTO>>,
        completion: CompletionHook<UserResponseDTO>,
    ) -> TaskHandle;

    /// Write-only sign-up; persists the fresh credential record.
    fn sign_up(
        &self,
        body: SignUpRequestDTO,
        completion: CompletionHook<UserResponseDTO>,
    ) -> TaskHandle;

    /// Write-only sign-out; deletes the cached credential record for the
    /// signed-out identity.
    fn sign_out(&self, email: String, completion: CompletionHook<()>) -> TaskHandle;

    /// Network fetch of the user's viewing profiles.
    fn profiles(&self, user_id: String, completion: CompletionHook<Vec<ProfileDTO>>) -> TaskHandle;

    /// Create a new viewing profile.
    fn create_profile(
        &self,
        user_id: String,
        body: CreateProfileRequestDTO,
        completion: CompletionHook<ProfileDTO>,
    ) -> TaskHandle;

    /// Update user data; the fresh record overwrites the cached credential
    /// entry before completion.
    fn update_user(
        &self,
        email: String,
        body: UpdateUserRequestDTO,
        completion: CompletionHook<UserResponseDTO>,
    ) -> TaskHandle;
}

pub struct HttpUserRepository {
    transfer: Arc<DataTransferService>,
    store: Option<Arc<dyn ResponseStore>>,
    tasks: TaskSlot,
}

impl HttpUserRepository {
    pub fn new(transfer: Arc<DataTransferService>, store: Option<Arc<dyn ResponseStore>>) -> Self {
        Self {
            transfer,
            store,
            tasks: TaskSlot::new(),
        }
    }
}

impl UserRepository for HttpUserRepository {
    fn sign_in(
        &self,
        body: SignInRequestDTO,
        cached: Option<CachedHook<UserResponseDTO>>,
        completion: CompletionHook<UserResponseDTO>,
    ) -> TaskHandle {
        let key = credential_cache_key(&body.email);
        match endpoints::sign_in(&body) {
            Ok(endpoint) => support::spawn_cache_first(
                self.transfer.clone(),
                self.store.clone(),
                &self.tasks,
                endpoint,
                key,
                cached,
                completion,
            ),
            Err(error) => support::spawn_failed(&self.tasks, error, completion),
        }
    }

    fn sign_up(
        &self,
        body: SignUpRequestDTO,
        completion: CompletionHook<UserResponseDTO>,
    ) -> TaskHandle {
        let key = credential_cache_key(&body.email);
        match endpoints::sign_up(&body) {
            Ok(endpoint) => support::spawn_network_only(
                self.transfer.clone(),
                self.store.clone(),
                &self.tasks,
                endpoint,
                CacheEffect::Save { key },
                completion,
            ),
            Err(error) => support::spawn_failed(&self.tasks, error, completion),
        }
    }

    fn sign_out(&self, email: String, completion: CompletionHook<()>) -> TaskHandle {
        support::spawn_network_only_empty(
            self.transfer.clone(),
            self.store.clone(),
            &self.tasks,
            endpoints::sign_out(),
            CacheEffect::Delete {
                key: credential_cache_key(&email),
            },
            completion,
        )
    }

    fn profiles(&self, user_id: String, completion: CompletionHook<Vec<ProfileDTO>>) -> TaskHandle {
        support::spawn_network_only(
            self.transfer.clone(),
            self.store.clone(),
            &self.tasks,
            endpoints::profiles(&user_id),
            CacheEffect::None,
            completion,
        )
    }

    fn create_profile(
        &self,
        user_id: String,
        body: CreateProfileRequestDTO,
        completion: CompletionHook<ProfileDTO>,
    ) -> TaskHandle {
        match endpoints::create_profile(&user_id, &body) {
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

    fn update_user(
        &self,
        email: String,
        body: UpdateUserRequestDTO,
        completion: CompletionHook<UserResponseDTO>,
    ) -> TaskHandle {
        let key = credential_cache_key(&email);
        match endpoints::update_user(&email, &body) {
            Ok(endpoint) => support::spawn_network_only(
                self.transfer.clone(),
                self.store.clone(),
                &self.tasks,
                endpoint,
                CacheEffect::Save { key },
                completion,
            ),
            Err(error) => support::spawn_failed(&self.tasks, error, completion),
        }
    }
}
