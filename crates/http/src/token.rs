//! Access token inspection
//!
//! The client never verifies token signatures; that is the server's job. It
//! only reads the payload to learn when the access token stops being usable.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Remaining lifetime, in seconds, below which an access token counts as expired
pub const EXPIRY_MARGIN_SECS: i64 = 1;

/// Reasons a bearer token could not be read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Not a `header.payload.signature` triple
    #[error("token is not a three-part JWT")]
    Malformed,

    /// Payload segment is not URL-safe base64
    #[error("token payload is not valid base64: {0}")]
    Base64(String),

    /// Payload decoded but is not a claims object with an `exp`
    #[error("token payload is not a valid claims object: {0}")]
    Payload(String),
}

/// Token subject, numeric for the site's user ids but strings are accepted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Subject {
    Id(u64),
    Name(String),
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Standard subject claim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<Subject>,
    /// Subject as issued by the backend's token library
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Subject>,
    /// Expiration time (as UTC timestamp)
    pub exp: i64,
    /// Issued at (as UTC timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl Claims {
    /// The user this token was issued to, whichever claim carried it
    pub fn subject(&self) -> Option<&Subject> {
        self.sub.as_ref().or(self.user_id.as_ref())
    }

    /// Seconds left before expiry relative to `now`; negative once expired
    pub fn remaining_secs(&self, now: i64) -> i64 {
        self.exp.saturating_sub(now)
    }
}

/// Decode the payload of a bearer token without verifying its signature
pub fn decode_claims(token: &str) -> Result<Claims, DecodeError> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(DecodeError::Malformed);
    };

    if header.is_empty() || payload.is_empty() {
        return Err(DecodeError::Malformed);
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| DecodeError::Base64(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| DecodeError::Payload(e.to_string()))
}

/// Result of the freshness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    /// Expired, about to expire, or unreadable
    Expired,
}

impl Freshness {
    pub fn is_fresh(self) -> bool {
        self == Self::Fresh
    }
}

/// Check an access token against a fixed clock reading
pub fn check_freshness_at(token: &str, now: i64) -> Freshness {
    match decode_claims(token) {
        Ok(claims) if claims.remaining_secs(now) >= EXPIRY_MARGIN_SECS => Freshness::Fresh,
        Ok(claims) => {
            trace!(exp = claims.exp, now, "access token expired");
            Freshness::Expired
        }
        Err(error) => {
            debug!(%error, "access token could not be decoded, treating as expired");
            Freshness::Expired
        }
    }
}

/// Check an access token against the current time
pub fn check_freshness(token: &str) -> Freshness {
    check_freshness_at(token, now_unix())
}

/// Current UTC time in seconds since the epoch
pub fn now_unix() -> i64 {
    Utc::now().timestamp()
}
