//! Auth gateway: login, refresh, identity

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::session::TokenPair;
use reqwest::header;
use serde::{Deserialize, Serialize};

// ==================== Types ====================

/// Claims of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Subject (user id)
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshRequest {
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct MeResponse {
    user: AuthUser,
}

// ==================== Operations ====================

impl ApiClient {
    /// Sign in with password credentials.
    ///
    /// On success the pair is stored in the session before returning, so
    /// subsequent requests carry the new bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair> {
        let url = format!("{}/auth/login", self.config.base_url);

        let response = self
            .authorize(self.client.post(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        let tokens: TokenPair = self.handle_response(response).await?;

        self.session().store(tokens.clone());
        Ok(tokens)
    }

    /// Exchange the stored refresh token for a fresh pair.
    ///
    /// Fails with [`ApiError::Unauthorized`] when signed out; on a rejected
    /// refresh token the session has already been cleared.
    pub async fn refresh(&self) -> Result<TokenPair> {
        let refresh_token = self
            .session()
            .refresh_token()
            .ok_or(ApiError::Unauthorized)?;
        let url = format!("{}/auth/refresh", self.config.base_url);

        let response = self
            .authorize(self.client.post(&url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;
        let tokens: TokenPair = self.handle_response(response).await?;

        self.session().store(tokens.clone());
        Ok(tokens)
    }

    /// Fetch the signed-in user's claims
    pub async fn me(&self) -> Result<AuthUser> {
        let url = format!("{}/auth/me", self.config.base_url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        let body: MeResponse = self.handle_response(response).await?;
        Ok(body.user)
    }
}
