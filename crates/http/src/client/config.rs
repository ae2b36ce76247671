//! Client configuration

use super::ApiClient;
use super::error::ClientError;
use crate::store::TokenStore;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Default API root of a locally running backend
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";

/// Default user agent sent by native builds
pub const DEFAULT_USER_AGENT: &str = concat!("vyshivka-client/", env!("CARGO_PKG_VERSION"));

/// Called once whenever a failed refresh ends the session
pub type UnauthorizedHandler = Arc<dyn Fn() + Send + Sync>;

/// Everything the client needs, fixed at construction
#[derive(Clone)]
pub struct ClientConfig {
    /// API root, without a trailing slash
    pub base_url: String,
    pub on_unauthorized: Option<UnauthorizedHandler>,
    /// Ignored on wasm, where the browser owns timeouts
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            on_unauthorized: None,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_unauthorized_handler(mut self, handler: UnauthorizedHandler) -> Self {
        self.on_unauthorized = Some(handler);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("on_unauthorized", &self.on_unauthorized.is_some())
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn normalize_base_url(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

/// Builder for [`ApiClient`]
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    on_unauthorized: Option<UnauthorizedHandler>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the handler invoked when a failed refresh logs the session out
    pub fn on_unauthorized(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(handler));
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the configuration without creating a client
    pub fn build_config(self) -> Result<ClientConfig, ClientError> {
        let base_url = self
            .base_url
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        Ok(ClientConfig {
            base_url: normalize_base_url(base_url),
            on_unauthorized: self.on_unauthorized,
            timeout: self.timeout,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
        })
    }

    /// Build the client over the given token store
    pub fn build(self, store: TokenStore) -> Result<ApiClient, ClientError> {
        ApiClient::new(self.build_config()?, store)
    }
}
