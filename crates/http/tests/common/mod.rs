//! Shared fixtures for the integration tests

#![allow(dead_code)]

use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use vyshivka_http::{ClientConfig, NavTarget, Navigator, SessionController, TokenPair, TokenStore};

static NEXT_JTI: AtomicU64 = AtomicU64::new(1);

/// Sign an access token whose `exp` is `offset_secs` from now
pub fn access_token(offset_secs: i64, user_id: u64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = json!({
        "token_type": "access",
        "exp": now + offset_secs,
        "iat": now,
        "jti": format!("jti-{}", NEXT_JTI.fetch_add(1, Ordering::Relaxed)),
        "user_id": user_id,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-signing-key"),
    )
    .unwrap()
}

pub fn fresh_pair(refresh: &str) -> TokenPair {
    TokenPair::new(access_token(3600, 1), refresh)
}

pub fn expired_pair(refresh: &str) -> TokenPair {
    TokenPair::new(access_token(-10, 1), refresh)
}

pub fn user_json(id: u64, email: &str) -> Value {
    json!({
        "id": id,
        "username": email.split('@').next().unwrap_or_default(),
        "email": email,
        "profile": {
            "id": id,
            "avatar": null,
            "bio": "",
            "location": "Москва",
            "social_telegram": "",
            "social_vk": ""
        }
    })
}

pub fn store_with(pair: &TokenPair) -> TokenStore {
    let store = TokenStore::in_memory();
    store.save(pair).unwrap();
    store
}

/// Navigator that records every target it is sent to
pub fn recording_navigator() -> (Navigator, Arc<Mutex<Vec<NavTarget>>>) {
    let visits = Arc::new(Mutex::new(Vec::new()));
    let recorder = visits.clone();
    let navigator: Navigator = Arc::new(move |target| recorder.lock().unwrap().push(target));
    (navigator, visits)
}

pub fn controller(
    base_url: String,
    store: TokenStore,
) -> (SessionController, Arc<Mutex<Vec<NavTarget>>>) {
    init_tracing();
    let (navigator, visits) = recording_navigator();
    let controller = SessionController::new(ClientConfig::new(base_url), store, navigator).unwrap();
    (controller, visits)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Send client and session logs to the test output; `RUST_LOG` selects levels
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
