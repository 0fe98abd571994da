//! Integration tests for the repository layer: cache-first-then-network
//! ordering, single-in-flight replacement, cancellation discipline, and
//! credential caching.

use async_trait::async_trait;
use bridge_desktop::InMemoryResponseStore;
use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
use bridge_traits::store::ResponseStore;
use core_library::models::{
    SectionDTO, SignInRequestDTO, UpdateUserRequestDTO, UserDTO, UserResponseDTO,
};
use core_library::repositories::sections::SECTIONS_CACHE_KEY;
use core_library::repositories::user::credential_cache_key;
use core_library::repositories::{
    HttpSectionsRepository, HttpUserRepository, SectionsRepository, UserRepository,
};
use core_network::config::ApiDataConfig;
use core_network::error::{DataTransferError, NetworkError};
use core_network::network::DefaultNetworkService;
use core_network::task::Cancellable;
use core_network::transfer::{CachedHook, CompletionHook, DataTransferService};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex, Notify};
use tokio::time::{sleep, timeout};
use url::Url;

// --- Test doubles -----------------------------------------------------------

/// HTTP client that replays a script of canned outcomes, optionally
/// holding every call at a gate until the test releases it.
struct ScriptedHttpClient {
    responses: Mutex<VecDeque<BridgeResult<HttpResponse>>>,
    gate: Option<Arc<Notify>>,
    hits: AtomicUsize,
}

impl ScriptedHttpClient {
    fn new(responses: Vec<BridgeResult<HttpResponse>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            gate: None,
            hits: AtomicUsize::new(0),
        })
    }

    fn gated(responses: Vec<BridgeResult<HttpResponse>>, gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            gate: Some(gate),
            hits: AtomicUsize::new(0),
        })
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpClient for ScriptedHttpClient {
    async fn execute(&self, _request: HttpRequest) -> BridgeResult<HttpResponse> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.hits.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(BridgeError::OperationFailed("script exhausted".into())))
    }
}

fn ok_json(value: &impl Serialize) -> BridgeResult<HttpResponse> {
    Ok(HttpResponse {
        status: 200,
        headers: HashMap::new(),
        body: serde_json::to_vec(value).unwrap().into(),
    })
}

fn ok_empty() -> BridgeResult<HttpResponse> {
    Ok(HttpResponse {
        status: 200,
        headers: HashMap::new(),
        body: Default::default(),
    })
}

fn transfer_over(client: Arc<ScriptedHttpClient>) -> Arc<DataTransferService> {
    let config = Arc::new(ApiDataConfig::new(
        Url::parse("https://api.example.com").unwrap(),
    ));
    Arc::new(DataTransferService::new(Arc::new(
        DefaultNetworkService::new(client, config),
    )))
}

#[derive(Debug)]
enum Event<T> {
    Cached(T),
    Completed(Result<T, DataTransferError>),
}

fn hooks<T: Send + 'static>(
    tx: &mpsc::UnboundedSender<Event<T>>,
) -> (Option<CachedHook<T>>, CompletionHook<T>) {
    let cached_tx = tx.clone();
    let completed_tx = tx.clone();
    (
        Some(Box::new(move |value| {
            let _ = cached_tx.send(Event::Cached(value));
        })),
        Box::new(move |result| {
            let _ = completed_tx.send(Event::Completed(result));
        }),
    )
}

async fn next_event<T>(rx: &mut mpsc::UnboundedReceiver<Event<T>>) -> Event<T> {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for callback")
        .expect("callback channel closed")
}

// --- Fixtures ---------------------------------------------------------------

fn section(id: i64, title: &str) -> SectionDTO {
    SectionDTO {
        id,
        title: title.to_string(),
        media: Vec::new(),
    }
}

fn user_response(email: &str, token: &str) -> UserResponseDTO {
    UserResponseDTO {
        status: "success".to_string(),
        token: Some(token.to_string()),
        data: Some(UserDTO {
            id: Some("u1".to_string()),
            name: Some("Ada".to_string()),
            email: email.to_string(),
            selected_profile: None,
        }),
    }
}

fn sign_in_body() -> SignInRequestDTO {
    SignInRequestDTO {
        email: "ada@example.com".to_string(),
        password: "pw".to_string(),
    }
}

async fn cached_sections(store: &InMemoryResponseStore) -> Option<Vec<SectionDTO>> {
    store
        .get(SECTIONS_CACHE_KEY)
        .await
        .unwrap()
        .map(|payload| serde_json::from_slice(&payload).unwrap())
}

// --- Cache-first reads ------------------------------------------------------

// Multi-thread flavor: pipeline futures must stay spawnable onto a
// work-stealing runtime.
#[tokio::test(flavor = "multi_thread")]
async fn warm_cache_delivers_cached_then_network_and_overwrites() {
    let stale = vec![section(1, "Trending")];
    let fresh = vec![section(1, "Trending"), section(2, "New Releases")];

    let store = Arc::new(InMemoryResponseStore::new());
    store
        .save(SECTIONS_CACHE_KEY, serde_json::to_vec(&stale).unwrap().into())
        .await
        .unwrap();

    let client = ScriptedHttpClient::new(vec![ok_json(&fresh)]);
    let repo = HttpSectionsRepository::new(
        transfer_over(client),
        Some(store.clone() as Arc<dyn ResponseStore>),
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let (cached, completion) = hooks(&tx);
    repo.find_all(cached, completion);

    match next_event(&mut rx).await {
        Event::Cached(sections) => assert_eq!(sections, stale),
        other => panic!("expected cached hint first, got {other:?}"),
    }
    match next_event(&mut rx).await {
        Event::Completed(Ok(sections)) => assert_eq!(sections, fresh),
        other => panic!("expected network success second, got {other:?}"),
    }

    // The cache now holds the network's response.
    assert_eq!(cached_sections(&store).await, Some(fresh));
}

#[tokio::test]
async fn cold_cache_skips_cached_hint_and_populates_store() {
    let fresh = vec![section(1, "Trending")];

    let store = Arc::new(InMemoryResponseStore::new());
    let client = ScriptedHttpClient::new(vec![ok_json(&fresh)]);
    let repo = HttpSectionsRepository::new(
        transfer_over(client),
        Some(store.clone() as Arc<dyn ResponseStore>),
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let (cached, completion) = hooks(&tx);
    repo.find_all(cached, completion);

    match next_event(&mut rx).await {
        Event::Completed(Ok(sections)) => assert_eq!(sections, fresh),
        other => panic!("expected network success, got {other:?}"),
    }
    assert_eq!(cached_sections(&store).await, Some(fresh));
}

#[tokio::test]
async fn network_failure_after_cache_hit_leaves_cache_untouched() {
    let stale = vec![section(1, "Trending")];

    let store = Arc::new(InMemoryResponseStore::new());
    store
        .save(SECTIONS_CACHE_KEY, serde_json::to_vec(&stale).unwrap().into())
        .await
        .unwrap();

    let client = ScriptedHttpClient::new(vec![Err(BridgeError::ConnectionFailed(
        "host unreachable".into(),
    ))]);
    let repo = HttpSectionsRepository::new(
        transfer_over(client),
        Some(store.clone() as Arc<dyn ResponseStore>),
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let (cached, completion) = hooks(&tx);
    repo.find_all(cached, completion);

    match next_event(&mut rx).await {
        Event::Cached(sections) => assert_eq!(sections, stale),
        other => panic!("expected stale cached hint, got {other:?}"),
    }
    match next_event(&mut rx).await {
        Event::Completed(Err(DataTransferError::Network(NetworkError::NotConnected))) => {}
        other => panic!("expected not-connected failure, got {other:?}"),
    }

    // The stale record is not retracted.
    assert_eq!(cached_sections(&store).await, Some(stale));
}

// --- Cancellation & single-in-flight ----------------------------------------

#[tokio::test]
async fn second_find_supersedes_first() {
    let fresh = vec![section(2, "New Releases")];
    let gate = Arc::new(Notify::new());
    let client = ScriptedHttpClient::gated(vec![ok_json(&fresh)], gate.clone());
    let repo = HttpSectionsRepository::new(transfer_over(client), None);

    let (tx1, mut rx1) = mpsc::unbounded_channel::<Event<Vec<SectionDTO>>>();
    let completion1: CompletionHook<Vec<SectionDTO>> = Box::new(move |result| {
        let _ = tx1.send(Event::Completed(result));
    });
    repo.find_all(None, completion1);

    // Let the first task park at the transport gate before superseding it.
    sleep(Duration::from_millis(50)).await;

    let (tx2, mut rx2) = mpsc::unbounded_channel();
    let completion2: CompletionHook<Vec<SectionDTO>> = Box::new(move |result| {
        let _ = tx2.send(Event::Completed(result));
    });
    repo.find_all(None, completion2);

    gate.notify_one();

    match next_event(&mut rx2).await {
        Event::Completed(Ok(sections)) => assert_eq!(sections, fresh),
        other => panic!("expected second call to complete, got {other:?}"),
    }

    // The superseded call's completion never fires.
    sleep(Duration::from_millis(100)).await;
    assert!(rx1.try_recv().is_err());
}

#[tokio::test]
async fn cancel_before_dispatch_prevents_network_call() {
    let gate = Arc::new(Notify::new());
    let client = ScriptedHttpClient::gated(vec![ok_json(&vec![section(1, "x")])], gate.clone());
    let repo = HttpSectionsRepository::new(transfer_over(client.clone()), None);

    let (tx, mut rx) = mpsc::unbounded_channel::<Event<Vec<SectionDTO>>>();
    let completion: CompletionHook<Vec<SectionDTO>> = Box::new(move |result| {
        let _ = tx.send(Event::Completed(result));
    });
    let handle = repo.find_all(None, completion);
    handle.cancel();

    gate.notify_one();
    sleep(Duration::from_millis(100)).await;

    assert!(rx.try_recv().is_err());
    assert_eq!(client.hits(), 0);
}

#[tokio::test]
async fn cancel_after_completion_is_noop() {
    let fresh = vec![section(1, "Trending")];
    let client = ScriptedHttpClient::new(vec![ok_json(&fresh)]);
    let repo = HttpSectionsRepository::new(transfer_over(client), None);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let completion: CompletionHook<Vec<SectionDTO>> = Box::new(move |result| {
        let _ = tx.send(Event::Completed(result));
    });
    let handle = repo.find_all(None, completion);

    match next_event(&mut rx).await {
        Event::Completed(Ok(_)) => {}
        other => panic!("expected success, got {other:?}"),
    }

    handle.cancel();
    sleep(Duration::from_millis(50)).await;
    assert!(rx.try_recv().is_err());
}

// --- Credential caching -----------------------------------------------------

#[tokio::test]
async fn sign_in_persists_then_serves_cached_credentials_first() {
    let first = user_response("ada@example.com", "token-1");
    let second = user_response("ada@example.com", "token-2");

    let store = Arc::new(InMemoryResponseStore::new());
    let client = ScriptedHttpClient::new(vec![ok_json(&first), ok_json(&second)]);
    let transfer = transfer_over(client);
    let repo = HttpUserRepository::new(transfer, Some(store.clone() as Arc<dyn ResponseStore>));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let (_, completion) = hooks(&tx);
    repo.sign_in(sign_in_body(), None, completion);
    match next_event(&mut rx).await {
        Event::Completed(Ok(response)) => assert_eq!(response, first),
        other => panic!("expected first sign-in to succeed, got {other:?}"),
    }

    // Re-validating the same identity surfaces the cached record first.
    let (tx, mut rx) = mpsc::unbounded_channel();
    let (cached, completion) = hooks(&tx);
    repo.sign_in(sign_in_body(), cached, completion);

    match next_event(&mut rx).await {
        Event::Cached(response) => assert_eq!(response, first),
        other => panic!("expected cached credentials first, got {other:?}"),
    }
    match next_event(&mut rx).await {
        Event::Completed(Ok(response)) => assert_eq!(response, second),
        other => panic!("expected fresh credentials second, got {other:?}"),
    }
}

#[tokio::test]
async fn sign_out_invalidates_cached_credentials() {
    let key = credential_cache_key("ada@example.com");
    let record = user_response("ada@example.com", "token-1");

    let store = Arc::new(InMemoryResponseStore::new());
    store
        .save(&key, serde_json::to_vec(&record).unwrap().into())
        .await
        .unwrap();

    let client = ScriptedHttpClient::new(vec![ok_empty()]);
    let repo = HttpUserRepository::new(
        transfer_over(client),
        Some(store.clone() as Arc<dyn ResponseStore>),
    );

    let (tx, mut rx) = mpsc::unbounded_channel::<Event<()>>();
    let completion: CompletionHook<()> = Box::new(move |result| {
        let _ = tx.send(Event::Completed(result));
    });
    repo.sign_out("ada@example.com".to_string(), completion);

    match next_event(&mut rx).await {
        Event::Completed(Ok(())) => {}
        other => panic!("expected sign-out to succeed, got {other:?}"),
    }
    assert_eq!(store.get(&key).await.unwrap(), None);
}

#[tokio::test]
async fn update_user_writes_fresh_record_back_to_cache() {
    let key = credential_cache_key("ada@example.com");
    let updated = user_response("ada@example.com", "token-9");

    let store = Arc::new(InMemoryResponseStore::new());
    let client = ScriptedHttpClient::new(vec![ok_json(&updated)]);
    let repo = HttpUserRepository::new(
        transfer_over(client),
        Some(store.clone() as Arc<dyn ResponseStore>),
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let (_, completion) = hooks(&tx);
    repo.update_user(
        "ada@example.com".to_string(),
        UpdateUserRequestDTO {
            name: None,
            selected_profile: Some("p2".to_string()),
        },
        completion,
    );

    match next_event(&mut rx).await {
        Event::Completed(Ok(response)) => assert_eq!(response, updated),
        other => panic!("expected update to succeed, got {other:?}"),
    }

    let persisted: UserResponseDTO =
        serde_json::from_slice(&store.get(&key).await.unwrap().unwrap()).unwrap();
    assert_eq!(persisted, updated);
}
