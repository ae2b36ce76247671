//! Vyshivka API access layer
//!
//! This crate provides the typed client for the embroidery scheme API together
//! with the pieces that keep it authenticated: the persisted token store, the
//! access token freshness check, the refresh exchange, the request interceptor
//! and the session controller that derives the current user from all of them.
//!
//! Nothing here touches the DOM, so the whole layer is exercised natively in
//! tests and reused unchanged by the browser frontend.

#[macro_use]
extern crate tracing;

pub mod client;
pub mod guard;
pub mod session;
pub mod store;
pub mod token;
pub mod types;

pub use client::{
    ApiClient,
    config::{ClientBuilder, ClientConfig, UnauthorizedHandler},
    error::{ClientError, RefreshError},
};
pub use guard::GuardDecision;
pub use session::{NavTarget, Navigator, SessionController, SessionError, SessionState};
pub use store::{KeyValueStore, MemoryStorage, StorageError, TokenStore};
pub use token::{Claims, DecodeError, Freshness};
pub use types::{Credentials, SessionUser, TokenPair};
