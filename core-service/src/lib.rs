//! Core service façade and bootstrap helpers.
//!
//! This crate wires host-provided bridge implementations (HTTP transport,
//! response cache) into the shared data-transfer and repository stack, and
//! exposes one use case per screen resource. Desktop apps typically call
//! [`bootstrap_desktop`], which assembles the reqwest transport and the
//! SQLite response store; other hosts construct [`CoreDependencies`] with
//! their own bridge handles.

pub mod error;
pub mod logging;
pub mod usecases;

pub use error::{CoreError, Result};

use std::sync::Arc;
use std::time::Duration;

use bridge_desktop::{ReqwestHttpClient, SqliteResponseStore};
use bridge_traits::http::HttpClient;
use bridge_traits::store::ResponseStore;
use core_library::repositories::{
    HttpMediaRepository, HttpMyListRepository, HttpSeasonsRepository, HttpSectionsRepository,
    HttpUserRepository,
};
use core_network::config::ApiDataConfig;
use core_network::network::DefaultNetworkService;
use core_network::transfer::DataTransferService;
use tracing::info;
use usecases::{MediaUseCase, MyListUseCase, SeasonsUseCase, SectionsUseCase, UserUseCase};

/// Aggregated handle to the bridge dependencies the core requires.
pub struct CoreDependencies {
    pub http_client: Arc<dyn HttpClient>,
    /// Optional persistent response cache; repositories built without one
    /// run network-only.
    pub response_store: Option<Arc<dyn ResponseStore>>,
    pub api_config: Arc<ApiDataConfig>,
}

impl CoreDependencies {
    /// Construct a dependency bundle from explicit bridge handles.
    pub fn new(
        http_client: Arc<dyn HttpClient>,
        response_store: Option<Arc<dyn ResponseStore>>,
        api_config: Arc<ApiDataConfig>,
    ) -> Self {
        Self {
            http_client,
            response_store,
            api_config,
        }
    }
}

/// Primary façade exposed to host applications.
///
/// Owns one use case per resource; each use case wraps its own repository
/// instance, so the single-in-flight rule applies per resource, not
/// globally.
#[derive(Clone)]
pub struct CoreService {
    sections: Arc<SectionsUseCase>,
    media: Arc<MediaUseCase>,
    seasons: Arc<SeasonsUseCase>,
    user: Arc<UserUseCase>,
    my_list: Arc<MyListUseCase>,
}

impl CoreService {
    /// Wire the full stack from the provided dependencies.
    pub fn new(deps: CoreDependencies) -> Self {
        let network = Arc::new(DefaultNetworkService::new(
            deps.http_client,
            deps.api_config,
        ));
        let transfer = Arc::new(DataTransferService::new(network));
        let store = deps.response_store;

        Self {
            sections: Arc::new(SectionsUseCase::new(Arc::new(HttpSectionsRepository::new(
                transfer.clone(),
                store.clone(),
            )))),
            media: Arc::new(MediaUseCase::new(Arc::new(HttpMediaRepository::new(
                transfer.clone(),
                store.clone(),
            )))),
            seasons: Arc::new(SeasonsUseCase::new(Arc::new(HttpSeasonsRepository::new(
                transfer.clone(),
                store.clone(),
            )))),
            user: Arc::new(UserUseCase::new(Arc::new(HttpUserRepository::new(
                transfer.clone(),
                store.clone(),
            )))),
            my_list: Arc::new(MyListUseCase::new(Arc::new(HttpMyListRepository::new(
                transfer, store,
            )))),
        }
    }

    pub fn sections(&self) -> &SectionsUseCase {
        &self.sections
    }

    pub fn media(&self) -> &MediaUseCase {
        &self.media
    }

    pub fn seasons(&self) -> &SeasonsUseCase {
        &self.seasons
    }

    pub fn user(&self) -> &UserUseCase {
        &self.user
    }

    pub fn my_list(&self) -> &MyListUseCase {
        &self.my_list
    }
}

/// Default request timeout applied by [`bootstrap_desktop`].
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Convenience bootstrapper for desktop hosts.
///
/// Assembles the reqwest transport with [`DEFAULT_REQUEST_TIMEOUT`] and a
/// SQLite response store under the platform's local-data directory.
///
/// ```ignore
/// use core_network::config::ApiDataConfig;
/// use core_service::bootstrap_desktop;
/// use url::Url;
///
/// # async fn example() -> core_service::Result<()> {
/// let config = ApiDataConfig::new(Url::parse("https://api.example.com").unwrap());
/// let core = bootstrap_desktop("my-app", config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn bootstrap_desktop(app_name: &str, api_config: ApiDataConfig) -> Result<CoreService> {
    let http_client = Arc::new(ReqwestHttpClient::with_timeout(DEFAULT_REQUEST_TIMEOUT));

    let path = SqliteResponseStore::default_path(app_name).ok_or_else(|| {
        CoreError::InitializationFailed("no local data directory available".into())
    })?;
    let store = SqliteResponseStore::open(&path)
        .await
        .map_err(|err| CoreError::InitializationFailed(err.to_string()))?;

    info!(cache = %path.display(), "desktop core bootstrapped");

    Ok(CoreService::new(CoreDependencies::new(
        http_client,
        Some(Arc::new(store)),
        Arc::new(api_config),
    )))
}
