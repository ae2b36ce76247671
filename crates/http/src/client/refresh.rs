//! Token refresh exchange

use super::error::RefreshError;
use crate::token::decode_claims;
use crate::types::{RefreshRequest, RefreshResponse, TokenPair};
use reqwest::Client;

/// Path of the refresh endpoint relative to the API root
pub const REFRESH_PATH: &str = "/auth/jwt/refresh/";

/// Exchanges a refresh token for a new pair
///
/// Exactly one POST per call. Retrying is the caller's decision and the
/// interceptor never does, since a spent refresh token cannot be reused.
#[derive(Clone)]
pub struct RefreshClient {
    http: Client,
    endpoint: String,
}

impl RefreshClient {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{base_url}{REFRESH_PATH}"),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn refresh(&self, current: &TokenPair) -> Result<TokenPair, RefreshError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&RefreshRequest {
                refresh: current.refresh.clone(),
            })
            .send()
            .await
            .map_err(|e| RefreshError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(RefreshError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: RefreshResponse = response
            .json()
            .await
            .map_err(|e| RefreshError::InvalidResponse(e.to_string()))?;

        let pair = body.merge_with(current);
        decode_claims(&pair.access).map_err(|e| RefreshError::InvalidResponse(e.to_string()))?;

        debug!(rotated = pair.refresh != current.refresh, "token pair refreshed");
        Ok(pair)
    }
}
