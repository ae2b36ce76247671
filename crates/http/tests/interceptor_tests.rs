//! Request interceptor behaviour against a mock API

mod common;

use common::*;
use futures::future::join_all;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use vyshivka_http::{
    ApiClient, ClientError, KeyValueStore, MemoryStorage, RefreshError, SessionState,
    StorageError, TokenPair, TokenStore,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_categories(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/categories/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Рушники", "slug": "rushnyky"}
        ])))
        .mount(server)
        .await;
}

fn client(server: &MockServer, store: TokenStore) -> ApiClient {
    init_tracing();
    ApiClient::builder()
        .base_url(server.uri())
        .build(store)
        .unwrap()
}

#[tokio::test]
async fn test_no_session_sends_anonymous_request() {
    let server = MockServer::start().await;
    mount_categories(&server).await;

    let client = client(&server, TokenStore::in_memory());
    let categories = client.list_categories().await.unwrap();
    assert_eq!(categories.len(), 1);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_fresh_token_attached_without_refresh() {
    let server = MockServer::start().await;
    let pair = fresh_pair("R1");

    Mock::given(method("GET"))
        .and(path("/categories/"))
        .and(header("authorization", bearer(&pair.access).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/jwt/refresh/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let store = store_with(&pair);
    let client = client(&server, store.clone());
    client.list_categories().await.unwrap();

    assert_eq!(store.load(), Some(pair));
}

#[tokio::test]
async fn test_expired_token_refreshed_before_request() {
    let server = MockServer::start().await;
    let stale = expired_pair("R1");
    let renewed = TokenPair::new(access_token(300, 1), "R2");

    Mock::given(method("POST"))
        .and(path("/auth/jwt/refresh/"))
        .and(body_json(json!({"refresh": "R1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": renewed.access,
            "refresh": "R2"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/categories/"))
        .and(header("authorization", bearer(&renewed.access).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_with(&stale);
    let client = client(&server, store.clone());
    client.list_categories().await.unwrap();

    assert_eq!(store.load(), Some(renewed));
}

#[tokio::test]
async fn test_access_only_refresh_keeps_refresh_token() {
    let server = MockServer::start().await;
    let renewed_access = access_token(300, 1);

    Mock::given(method("POST"))
        .and(path("/auth/jwt/refresh/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": renewed_access})),
        )
        .mount(&server)
        .await;
    mount_categories(&server).await;

    let store = store_with(&expired_pair("R1"));
    let client = client(&server, store.clone());
    client.list_categories().await.unwrap();

    assert_eq!(store.load(), Some(TokenPair::new(renewed_access, "R1")));
}

#[tokio::test]
async fn test_rejected_refresh_clears_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/jwt/refresh/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Token is invalid or expired"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/schemes/my/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let store = store_with(&expired_pair("R1"));
    let (controller, visits) = controller(server.uri(), store.clone());

    let error = controller.client().my_schemes().await.unwrap_err();
    assert!(matches!(
        error,
        ClientError::RefreshFailed(RefreshError::Rejected { status: 401, .. })
    ));
    assert!(error.is_session_expired());
    assert!(store.load().is_none());
    assert_eq!(controller.state(), SessionState::Anonymous);
    assert_eq!(visits.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unreachable_refresh_endpoint_is_refresh_failure() {
    let store = store_with(&expired_pair("R1"));
    let client = ApiClient::builder()
        .base_url("http://127.0.0.1:9")
        .timeout(Duration::from_secs(2))
        .build(store.clone())
        .unwrap();

    let error = client.list_tags().await.unwrap_err();
    assert!(matches!(
        error,
        ClientError::RefreshFailed(RefreshError::Transport(_))
    ));
    assert!(store.load().is_none());
}

#[tokio::test]
async fn test_refresh_response_with_bad_token_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/jwt/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "garbage"})))
        .mount(&server)
        .await;

    let store = store_with(&expired_pair("R1"));
    let client = client(&server, store.clone());

    let error = client.list_tags().await.unwrap_err();
    assert!(matches!(
        error,
        ClientError::RefreshFailed(RefreshError::InvalidResponse(_))
    ));
    assert!(!store.is_present());
}

#[tokio::test]
async fn test_concurrent_requests_share_one_refresh() {
    let server = MockServer::start().await;
    let renewed = TokenPair::new(access_token(300, 1), "R2");

    Mock::given(method("POST"))
        .and(path("/auth/jwt/refresh/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access": renewed.access, "refresh": "R2"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/categories/"))
        .and(header("authorization", bearer(&renewed.access).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(5)
        .mount(&server)
        .await;

    let store = store_with(&expired_pair("R1"));
    let client = client(&server, store.clone());

    let results = join_all((0..5).map(|_| client.list_categories())).await;
    assert!(results.iter().all(Result::is_ok));
    assert_eq!(store.load(), Some(renewed));
}

#[tokio::test]
async fn test_concurrent_requests_fail_together() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/jwt/refresh/"))
        .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(200)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/categories/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let notified = Arc::new(AtomicUsize::new(0));
    let counter = notified.clone();
    let client = ApiClient::builder()
        .base_url(server.uri())
        .on_unauthorized(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build(store_with(&expired_pair("R1")))
        .unwrap();

    let results = join_all((0..4).map(|_| client.list_categories())).await;
    assert!(results.iter().all(|result| matches!(
        result,
        Err(ClientError::RefreshFailed(_))
    )));
    assert_eq!(notified.load(Ordering::SeqCst), 1);
    assert!(!client.store().is_present());
}

#[tokio::test]
async fn test_malformed_stored_value_is_treated_as_absent() {
    let server = MockServer::start().await;
    mount_categories(&server).await;

    let backend = MemoryStorage::new();
    let store = TokenStore::new(backend.clone());
    backend.set(store.key(), "{not json").unwrap();

    let client = client(&server, store.clone());
    client.list_categories().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
    assert!(backend.get(store.key()).is_none());
}

#[tokio::test]
async fn test_failed_request_is_not_retried() {
    let server = MockServer::start().await;
    let pair = fresh_pair("R1");

    Mock::given(method("GET"))
        .and(path("/schemes/42/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("stale"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/jwt/refresh/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = store_with(&pair);
    let client = client(&server, store.clone());

    let error = client.get_scheme(42).await.unwrap_err();
    assert!(matches!(error, ClientError::AuthenticationFailed(_)));
    assert_eq!(store.load(), Some(pair));
}

#[tokio::test]
async fn test_token_written_by_another_tab_is_used() {
    let server = MockServer::start().await;
    let first = fresh_pair("R1");
    let second = fresh_pair("R2");

    Mock::given(method("GET"))
        .and(path("/tags/"))
        .and(header("authorization", bearer(&second.access).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let backend = MemoryStorage::new();
    let this_tab = TokenStore::new(backend.clone());
    let other_tab = TokenStore::new(backend);
    this_tab.save(&first).unwrap();

    let client = client(&server, this_tab);
    other_tab.save(&second).unwrap();

    client.list_tags().await.unwrap();
}

/// Backend that serves what it was seeded with but refuses every write
#[derive(Clone, Default)]
struct WriteFailingStorage {
    inner: MemoryStorage,
}

impl KeyValueStore for WriteFailingStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write("quota exceeded".into()))
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key);
    }
}

#[tokio::test]
async fn test_unsaved_refresh_ends_session() {
    let server = MockServer::start().await;
    let renewed = TokenPair::new(access_token(300, 1), "R2");

    Mock::given(method("POST"))
        .and(path("/auth/jwt/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": renewed.access,
            "refresh": "R2"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tags/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let backend = WriteFailingStorage::default();
    let store = TokenStore::new(backend.clone());
    let stale = serde_json::to_string(&expired_pair("R1")).unwrap();
    backend.inner.set(store.key(), &stale).unwrap();

    let notified = Arc::new(AtomicUsize::new(0));
    let counter = notified.clone();
    let client = ApiClient::builder()
        .base_url(server.uri())
        .on_unauthorized(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build(store.clone())
        .unwrap();

    let error = client.list_tags().await.unwrap_err();
    assert!(matches!(
        error,
        ClientError::RefreshFailed(RefreshError::Persist(_))
    ));
    assert!(store.load().is_none());
    assert_eq!(notified.load(Ordering::SeqCst), 1);

    // With the session gone the next request is anonymous, not stale
    client.list_tags().await.unwrap();
    let requests = server.received_requests().await.unwrap();
    let tags = requests
        .iter()
        .find(|request| request.url.path() == "/tags/")
        .unwrap();
    assert!(tags.headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_lost_rotation_race_uses_other_tab_pair() {
    let server = MockServer::start().await;
    let winner = fresh_pair("R2");

    Mock::given(method("POST"))
        .and(path("/auth/jwt/refresh/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Token is blacklisted"}))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tags/"))
        .and(header("authorization", bearer(&winner.access).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let backend = MemoryStorage::new();
    let this_tab = TokenStore::new(backend.clone());
    let other_tab = TokenStore::new(backend);
    this_tab.save(&expired_pair("R1")).unwrap();

    let notified = Arc::new(AtomicUsize::new(0));
    let counter = notified.clone();
    let client = ApiClient::builder()
        .base_url(server.uri())
        .on_unauthorized(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .build(this_tab.clone())
        .unwrap();

    let other_tab_refresh = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        other_tab.save(&winner).unwrap();
    };
    let (result, ()) = tokio::join!(client.list_tags(), other_tab_refresh);

    result.unwrap();
    assert_eq!(this_tab.load(), Some(winner));
    assert_eq!(notified.load(Ordering::SeqCst), 0);
}
