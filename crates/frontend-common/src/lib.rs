//! Browser side of the Vyshivka session layer
//!
//! Binds the platform-agnostic [`vyshivka_http`] session controller to the
//! browser: `localStorage` persistence, cross-tab synchronisation, Yew context
//! and hooks, and the protected-route guard.

#[macro_use]
extern crate tracing;

pub mod components;
pub mod config;
pub mod error_messages;
pub mod guard;
pub mod logging;
pub mod session;
pub mod storage;

pub use components::LoadingSpinner;
pub use config::AppConfig;
pub use guard::RequireAuth;
pub use session::{
    SessionContext, SessionProvider, use_api_client, use_current_user, use_session,
    use_session_state,
};
pub use storage::BrowserStorage;
