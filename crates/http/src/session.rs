//! Session controller
//!
//! Holds the single answer to "who is logged in" for the whole application.
//! The state is published through a [`watch`] channel; views subscribe to it
//! and never inspect tokens themselves.
//!
//! `Initializing` becomes `Anonymous` or `Authenticated` after the first
//! identity resolution. `Authenticated` always carries a user fetched from the
//! server, never one reconstructed from token claims.

use crate::client::config::{ClientConfig, UnauthorizedHandler};
use crate::client::error::ClientError;
use crate::client::ApiClient;
use crate::store::{StorageError, TokenStore};
use crate::token::{DecodeError, decode_claims};
use crate::types::{Credentials, SessionUser, UserUpdate};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Stored tokens have not been checked against the server yet
    Initializing,
    Anonymous,
    Authenticated(SessionUser),
}

impl SessionState {
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn is_initializing(&self) -> bool {
        matches!(self, Self::Initializing)
    }
}

/// Views the controller may send the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavTarget {
    /// Default view after logging in
    Home,
    Login,
}

/// Navigation command sink, supplied by the UI layer
pub type Navigator = Arc<dyn Fn(NavTarget) + Send + Sync>;

#[derive(Debug, Error)]
pub enum SessionError {
    /// Credentials were refused; the existing session is untouched
    #[error("Invalid email or password: {0}")]
    AuthRejected(String),

    /// Tokens were obtained but the user record could not be loaded; the
    /// session has been ended
    #[error("Could not load the current user: {0}")]
    IdentityFetchFailed(#[source] ClientError),

    #[error("Server issued an unreadable token: {0}")]
    Decode(#[from] DecodeError),

    #[error("Could not persist session tokens: {0}")]
    Storage(#[from] StorageError),

    /// The session was ended elsewhere while this operation was in flight
    #[error("Session was ended before the operation completed")]
    Interrupted,

    #[error(transparent)]
    Client(#[from] ClientError),
}

struct Shared {
    state: watch::Sender<SessionState>,
    navigator: Navigator,
    store: TokenStore,
    /// Bumped on every identity resolution and every logout so that a late
    /// identity response cannot resurrect an ended session
    generation: AtomicU64,
}

impl Shared {
    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Clear tokens and become anonymous; navigates to login only on an
    /// actual transition, so repeated calls have no further effect
    fn end_session(&self, reason: &'static str) -> bool {
        self.store.clear();
        self.next_generation();

        let ended = self.state.send_if_modified(|state| {
            if matches!(state, SessionState::Anonymous) {
                false
            } else {
                *state = SessionState::Anonymous;
                true
            }
        });

        if ended {
            info!(reason, "session ended");
            (self.navigator)(NavTarget::Login);
        }
        ended
    }
}

/// Application-wide session state machine
#[derive(Clone)]
pub struct SessionController {
    shared: Arc<Shared>,
    client: ApiClient,
}

impl SessionController {
    /// Build the controller and the API client it drives
    ///
    /// Any `on_unauthorized` handler already in `config` still runs, after the
    /// controller has ended the session.
    pub fn new(
        config: ClientConfig,
        store: TokenStore,
        navigator: Navigator,
    ) -> Result<Self, ClientError> {
        let (state, _) = watch::channel(SessionState::Initializing);
        let shared = Arc::new(Shared {
            state,
            navigator,
            store: store.clone(),
            generation: AtomicU64::new(0),
        });

        let weak = Arc::downgrade(&shared);
        let downstream = config.on_unauthorized.clone();
        let on_unauthorized: UnauthorizedHandler = Arc::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.end_session("token refresh failed");
            }
            if let Some(handler) = &downstream {
                handler();
            }
        });

        let client = ApiClient::new(config.with_unauthorized_handler(on_unauthorized), store)?;

        Ok(Self { shared, client })
    }

    /// Client whose failed refreshes end this session
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn state(&self) -> SessionState {
        self.shared.state.borrow().clone()
    }

    /// Current user; `Some` exactly when the state is `Authenticated`
    pub fn user(&self) -> Option<SessionUser> {
        self.shared.state.borrow().user().cloned()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.shared.state.subscribe()
    }

    /// Resolve the persisted session at startup
    pub async fn initialize(&self) -> SessionState {
        if let Err(error) = self.resync().await {
            debug!(%error, "stored session could not be restored");
        }
        self.state()
    }

    /// Re-derive the session from the token store
    ///
    /// Called whenever the stored pair may have changed: at startup, after a
    /// login, or when another tab writes the storage key. With no pair the
    /// session becomes anonymous; otherwise the user is fetched from the
    /// server and a failure ends the session.
    pub async fn resync(&self) -> Result<Option<SessionUser>, SessionError> {
        let generation = self.shared.next_generation();

        if self.shared.store.load().is_none() {
            let was_initializing = self.shared.state.send_if_modified(|state| {
                if state.is_initializing() {
                    *state = SessionState::Anonymous;
                    true
                } else {
                    false
                }
            });
            if !was_initializing {
                self.shared.end_session("tokens removed");
            }
            return Ok(None);
        }

        match self.client.me().await {
            Ok(user) if self.shared.is_current(generation) => {
                info!(user_id = user.id, username = %user.username, "session authenticated");
                self.shared
                    .state
                    .send_replace(SessionState::Authenticated(user.clone()));
                Ok(Some(user))
            }
            Ok(_) => {
                debug!("discarding identity response for a superseded session");
                Ok(self.user())
            }
            Err(error) => {
                if self.shared.is_current(generation) {
                    warn!(%error, "identity fetch failed");
                    self.shared.end_session("identity fetch failed");
                }
                Err(SessionError::IdentityFetchFailed(error))
            }
        }
    }

    /// Log in with credentials
    ///
    /// On success the tokens are stored, the user is fetched and the UI is
    /// sent to the default view. Rejected credentials leave the current
    /// session exactly as it was.
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionUser, SessionError> {
        let pair = match self.client.obtain_tokens(credentials).await {
            Ok(pair) => pair,
            Err(ClientError::AuthenticationFailed(message) | ClientError::BadRequest(message)) => {
                info!(email = %credentials.email, "login rejected");
                return Err(SessionError::AuthRejected(message));
            }
            Err(error) => return Err(error.into()),
        };

        decode_claims(&pair.access)?;
        self.shared.store.save(&pair)?;

        match self.resync().await? {
            Some(user) => {
                (self.shared.navigator)(NavTarget::Home);
                Ok(user)
            }
            None => Err(SessionError::Interrupted),
        }
    }

    /// Log out; a no-op when already anonymous
    pub fn logout(&self) {
        if !self.shared.end_session("user logged out") {
            debug!("logout requested without an active session");
        }
    }

    /// Replace the current user after a successful profile edit
    ///
    /// Returns false, changing nothing, when no one is logged in.
    pub fn update_user(&self, user: SessionUser) -> bool {
        let updated = self.shared.state.send_if_modified(|state| match state {
            SessionState::Authenticated(current) => {
                *current = user;
                true
            }
            _ => false,
        });

        if !updated {
            warn!("ignoring user update without an authenticated session");
        }
        updated
    }

    /// Save profile changes and publish the server's copy of the user
    pub async fn update_profile(&self, update: &UserUpdate) -> Result<SessionUser, SessionError> {
        let user = self.client.update_me(update).await?;
        if self.update_user(user.clone()) {
            Ok(user)
        } else {
            Err(SessionError::Interrupted)
        }
    }
}
