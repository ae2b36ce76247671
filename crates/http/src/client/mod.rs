//! Vyshivka API client
//!
//! [`ApiClient`] owns the request interceptor: before an authenticated call is
//! sent it reads the current token pair from the [`TokenStore`], attaches the
//! access token when it is still fresh, and otherwise refreshes it first.
//! Concurrent requests that find the same expired token share one refresh.

pub mod auth;
pub mod config;
pub mod error;
pub mod refresh;
pub mod schemes;

use crate::store::TokenStore;
use crate::token::check_freshness;
use crate::types::TokenPair;
use config::{ClientBuilder, ClientConfig, UnauthorizedHandler};
use error::{ClientError, RefreshError};
use refresh::RefreshClient;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Vyshivka API client
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: Client,
    base_url: String,
    store: TokenStore,
    refresher: RefreshClient,
    /// Held for the duration of a refresh; callers queue here instead of
    /// starting their own exchange
    refresh_gate: Mutex<Option<RefreshOutcome>>,
    on_unauthorized: Option<UnauthorizedHandler>,
}

/// Latest refresh result, keyed by the access token it replaced
struct RefreshOutcome {
    replaced: String,
    result: Result<TokenPair, RefreshError>,
}

impl ApiClient {
    /// Create a client from an explicit configuration
    pub fn new(config: ClientConfig, store: TokenStore) -> Result<Self, ClientError> {
        if config.base_url.is_empty() {
            return Err(ClientError::Configuration("base_url is required".into()));
        }

        let http = build_http_client(&config)?;
        let refresher = RefreshClient::new(http.clone(), &config.base_url);

        Ok(Self {
            inner: Arc::new(Inner {
                http,
                base_url: config.base_url,
                store,
                refresher,
                refresh_gate: Mutex::new(None),
                on_unauthorized: config.on_unauthorized,
            }),
        })
    }

    /// Create a new client builder
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn store(&self) -> &TokenStore {
        &self.inner.store
    }

    /// Resolve a path against the API root; absolute URLs pass through
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.inner.base_url, path)
        }
    }

    /// Create a request builder; authentication is added when it is executed
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.inner.http.request(method, self.url(path))
    }

    /// Attach the current bearer token to a request, refreshing it if needed
    pub async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        Ok(match self.bearer_token().await? {
            Some(access) => request.bearer_auth(access),
            None => request,
        })
    }

    /// The access token the next request should carry
    ///
    /// `Ok(None)` means there is no session and the request goes out
    /// anonymously. An error means there was a session but its token could
    /// not be refreshed; the store has been cleared by then.
    pub async fn bearer_token(&self) -> Result<Option<String>, ClientError> {
        let Some(pair) = self.inner.store.load() else {
            return Ok(None);
        };

        if check_freshness(&pair.access).is_fresh() {
            return Ok(Some(pair.access));
        }

        let refreshed = self.refresh_expired(pair).await?;
        Ok(Some(refreshed.access))
    }

    async fn refresh_expired(&self, stale: TokenPair) -> Result<TokenPair, ClientError> {
        let mut gate = self.inner.refresh_gate.lock().await;

        if let Some(outcome) = gate.as_ref()
            && outcome.replaced == stale.access
        {
            debug!(ok = outcome.result.is_ok(), "reusing result of concurrent token refresh");
            return outcome.result.clone().map_err(ClientError::from);
        }

        // The pair may have changed while we queued, from a login or another tab
        let current = match self.inner.store.load() {
            Some(current)
                if current.access != stale.access && check_freshness(&current.access).is_fresh() =>
            {
                return Ok(current);
            }
            Some(current) => current,
            None => return Err(RefreshError::SessionCleared.into()),
        };

        let result = match self.inner.refresher.refresh(&current).await {
            Ok(pair) => match self.inner.store.save(&pair) {
                Ok(()) => {
                    info!("access token refreshed");
                    Ok(pair)
                }
                Err(error) => {
                    // The old refresh token may already be spent
                    error!(%error, "failed to persist refreshed tokens, ending session");
                    self.inner.store.clear();
                    Err(RefreshError::Persist(error.to_string()))
                }
            },
            Err(error) => match self.inner.store.load() {
                // Another tab sharing the store won the rotation
                Some(latest)
                    if latest.access != current.access
                        && check_freshness(&latest.access).is_fresh() =>
                {
                    info!(%error, "token refreshed elsewhere, using stored pair");
                    Ok(latest)
                }
                _ => {
                    warn!(%error, "token refresh failed, ending session");
                    self.inner.store.clear();
                    Err(error)
                }
            },
        };

        *gate = Some(RefreshOutcome {
            replaced: current.access,
            result: result.clone(),
        });
        drop(gate);

        if result.is_err()
            && let Some(handler) = &self.inner.on_unauthorized
        {
            handler();
        }

        result.map_err(ClientError::from)
    }

    /// Execute an authenticated request and decode its JSON body
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    /// Execute an authenticated request whose response has no body
    pub async fn execute_empty(&self, request: RequestBuilder) -> Result<(), ClientError> {
        self.send(request).await?;
        Ok(())
    }

    /// Execute a request without touching the token store
    pub async fn execute_public<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = check_status(request.send().await?).await?;
        Ok(response.json().await?)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let request = self.authorize(request).await?;
        check_status(request.send().await?).await
    }
}

async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();

    if status.is_success() {
        Ok(response)
    } else {
        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        debug!(status = status.as_u16(), "API request failed");
        Err(ClientError::from_status(status, message))
    }
}

fn build_http_client(config: &ClientConfig) -> Result<Client, ClientError> {
    #[cfg(not(target_arch = "wasm32"))]
    let client = {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()?
    };

    #[cfg(target_arch = "wasm32")]
    let client = {
        let _ = config; // The browser owns user agent and timeouts
        Client::builder().build()?
    };

    Ok(client)
}
