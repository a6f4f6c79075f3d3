//! HTTP client core for the content API

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::session::Session;
use reqwest::{header, Client, RequestBuilder, StatusCode};
use std::time::Duration;

/// HTTP client for the content API.
///
/// One instance is shared by every store. The injected [`Session`]
/// supplies the bearer token for each request; any 401 response clears
/// both of the session's tokens before the error is returned, so callers
/// can treat [`ApiError::Unauthorized`] as "signed out" without retrying.
pub struct ApiClient {
    pub(crate) config: ApiConfig,
    pub(crate) client: Client,
    session: Session,
}

impl ApiClient {
    /// Create a new client over the given config and session
    pub fn new(config: ApiConfig, session: Session) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            config,
            client,
            session,
        }
    }

    /// The session this client attaches tokens from
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    // ==================== Helper Methods ====================

    /// Attach the bearer token when the session holds one
    pub(crate) fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.access_token() {
            Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Map a response to a typed value or an [`ApiError`].
    ///
    /// Success bodies are read as text and parsed afterwards so that a
    /// shape mismatch surfaces as [`ApiError::Json`] rather than a
    /// half-populated value.
    pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::debug!("401 response, clearing session tokens");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound("Resource not found".to_string()));
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
