//! Client error types

use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Malformed URL, e.g. a pagination link
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The access token could not be refreshed; the session has been ended
    #[error("Session expired: {0}")]
    RefreshFailed(#[from] RefreshError),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// True when the request failed because the session was logged out
    /// underneath it, as opposed to the request itself being rejected
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::RefreshFailed(_))
    }

    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(error) => error.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Why a token refresh did not produce a new pair
///
/// Cloneable so every request waiting on the same refresh receives the same
/// outcome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    /// Refresh endpoint unreachable
    #[error("refresh request failed: {0}")]
    Transport(String),

    /// Refresh endpoint answered with a non-success status
    #[error("refresh rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// Refresh endpoint answered 2xx with an unusable body
    #[error("refresh response unusable: {0}")]
    InvalidResponse(String),

    /// New pair could not be written to the token store
    #[error("refreshed tokens could not be stored: {0}")]
    Persist(String),

    /// Tokens were removed (logout) while the request waited for a refresh
    #[error("session ended before the token could be refreshed")]
    SessionCleared,
}
