//! Frontend configuration

use vyshivka_http::client::config::DEFAULT_BASE_URL;

/// Build-time application configuration
pub struct AppConfig;

impl AppConfig {
    /// API root, overridable at build time with `VYSHIVKA_API_BASE_URL`
    pub const API_BASE_URL: &'static str = match option_env!("VYSHIVKA_API_BASE_URL") {
        Some(url) => url,
        None => DEFAULT_BASE_URL,
    };

    /// Default log level for the browser console
    pub const LOG_LEVEL: tracing::Level = tracing::Level::INFO;
}
