//! Authentication and account endpoints

use super::{ApiClient, ClientError};
use crate::types::{
    Credentials, PublicProfile, RegisterRequest, RegisteredUser, SessionUser, TokenPair,
    UserUpdate,
};
use reqwest::Method;

pub const TOKEN_CREATE_PATH: &str = "/auth/jwt/create/";
pub const REGISTER_PATH: &str = "/auth/users/";
pub const ME_PATH: &str = "/users/me/";

impl ApiClient {
    /// Exchange credentials for a token pair (public endpoint)
    pub async fn obtain_tokens(&self, credentials: &Credentials) -> Result<TokenPair, ClientError> {
        let request = self
            .request(Method::POST, TOKEN_CREATE_PATH)
            .json(credentials);
        self.execute_public(request).await
    }

    /// Create an account (public endpoint)
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisteredUser, ClientError> {
        if !request.passwords_match() {
            return Err(ClientError::BadRequest("passwords do not match".into()));
        }

        let req = self.request(Method::POST, REGISTER_PATH).json(request);
        self.execute_public(req).await
    }

    /// Get the authoritative record of the logged-in user
    pub async fn me(&self) -> Result<SessionUser, ClientError> {
        let request = self.request(Method::GET, ME_PATH);
        self.execute(request).await
    }

    /// Update the logged-in user's account and profile
    pub async fn update_me(&self, update: &UserUpdate) -> Result<SessionUser, ClientError> {
        let request = self.request(Method::PATCH, ME_PATH).json(update);
        self.execute(request).await
    }

    /// Get another user's public profile
    pub async fn user_profile(&self, username: &str) -> Result<PublicProfile, ClientError> {
        let request = self.request(Method::GET, &format!("/users/{username}/"));
        self.execute(request).await
    }
}
