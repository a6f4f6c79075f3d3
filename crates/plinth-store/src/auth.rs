//! Auth store: sign-in state over the shared session

use crate::error::{Result, StoreError};
use crate::status::RequestStatus;
use plinth_api::auth::AuthUser;
use plinth_api::ApiClient;
use std::sync::Arc;

// ==================== State ====================

/// Auth state, mutated only through [`AuthState::apply`]
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    /// Claims of the signed-in user, once verified
    pub user: Option<AuthUser>,
    pub is_authenticated: bool,
    pub status: RequestStatus,
    pub error: Option<String>,
}

// ==================== Events ====================

/// Everything that can change auth state
#[derive(Debug, Clone)]
pub enum AuthEvent {
    LoginStarted,
    LoginSucceeded,
    LoginFailed { message: String },
    /// Identity check succeeded
    SessionVerified { user: AuthUser },
    /// Identity check failed; tokens are already gone
    SessionRejected,
    LoggedOut,
    ErrorCleared,
}

impl AuthState {
    /// Fold one event into the state
    pub fn apply(&mut self, event: AuthEvent) {
        match event {
            AuthEvent::LoginStarted => {
                self.status = RequestStatus::Loading;
                self.error = None;
            }
            AuthEvent::LoginSucceeded => {
                self.status = RequestStatus::Idle;
                self.is_authenticated = true;
            }
            AuthEvent::LoginFailed { message } => {
                self.status = RequestStatus::Failed;
                self.error = Some(message);
                self.is_authenticated = false;
            }
            AuthEvent::SessionVerified { user } => {
                self.user = Some(user);
                self.is_authenticated = true;
            }
            AuthEvent::SessionRejected | AuthEvent::LoggedOut => {
                self.user = None;
                self.is_authenticated = false;
            }
            AuthEvent::ErrorCleared => {
                self.error = None;
            }
        }
    }
}

// ==================== Store ====================

/// Auth store; tracks sign-in state for the client's shared session
pub struct AuthStore {
    client: Arc<ApiClient>,
    state: AuthState,
}

impl AuthStore {
    /// Build the store; a session holding persisted tokens starts
    /// authenticated until proven otherwise.
    pub fn new(client: Arc<ApiClient>) -> Self {
        let state = AuthState {
            is_authenticated: client.session().is_authenticated(),
            ..Default::default()
        };
        Self { client, state }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Apply an externally produced event
    pub fn apply(&mut self, event: AuthEvent) {
        self.state.apply(event);
    }

    /// Sign in; on success the session holds the new token pair
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        self.state.apply(AuthEvent::LoginStarted);

        match self.client.login(email, password).await {
            Ok(_) => {
                self.state.apply(AuthEvent::LoginSucceeded);
                Ok(())
            }
            Err(err) => {
                let err = StoreError::from_api(err, "Invalid credentials");
                self.state.apply(AuthEvent::LoginFailed {
                    message: "Invalid credentials".to_string(),
                });
                Err(err)
            }
        }
    }

    /// Verify the session by fetching the user's claims.
    ///
    /// Any failure drops both tokens and signs the user out.
    pub async fn check_auth(&mut self) -> Result<()> {
        match self.client.me().await {
            Ok(user) => {
                self.state.apply(AuthEvent::SessionVerified { user });
                Ok(())
            }
            Err(_) => {
                self.client.session().clear();
                self.state.apply(AuthEvent::SessionRejected);
                Err(StoreError::Unauthorized)
            }
        }
    }

    /// Sign out locally, dropping both tokens
    pub fn logout(&mut self) {
        self.client.session().clear();
        self.state.apply(AuthEvent::LoggedOut);
    }

    pub fn clear_error(&mut self) {
        self.state.apply(AuthEvent::ErrorCleared);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plinth_api::{ApiConfig, Session, TokenPair};

    fn client_with(session: Session) -> Arc<ApiClient> {
        Arc::new(ApiClient::new(ApiConfig::default(), session))
    }

    #[test]
    fn test_store_starts_authenticated_with_persisted_tokens() {
        let session = Session::with_tokens(TokenPair {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
        });
        let store = AuthStore::new(client_with(session));
        assert!(store.state().is_authenticated);
        assert!(store.state().user.is_none());
    }

    #[test]
    fn test_store_starts_signed_out_with_empty_session() {
        let store = AuthStore::new(client_with(Session::new()));
        assert!(!store.state().is_authenticated);
    }

    #[test]
    fn test_login_lifecycle() {
        let mut state = AuthState::default();

        state.apply(AuthEvent::LoginStarted);
        assert_eq!(state.status, RequestStatus::Loading);
        assert_eq!(state.error, None);

        state.apply(AuthEvent::LoginSucceeded);
        assert_eq!(state.status, RequestStatus::Idle);
        assert!(state.is_authenticated);
        assert!(state.user.is_none());
    }

    #[test]
    fn test_failed_login_records_message_and_signs_out() {
        let mut state = AuthState {
            is_authenticated: true,
            ..Default::default()
        };

        state.apply(AuthEvent::LoginStarted);
        state.apply(AuthEvent::LoginFailed {
            message: "Invalid credentials".to_string(),
        });

        assert_eq!(state.status, RequestStatus::Failed);
        assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
        assert!(!state.is_authenticated);
    }

    #[test]
    fn test_verified_session_sets_user() {
        let mut state = AuthState::default();

        state.apply(AuthEvent::SessionVerified {
            user: AuthUser {
                sub: "user-1".to_string(),
                email: Some("jo@example.test".to_string()),
            },
        });

        assert!(state.is_authenticated);
        assert_eq!(state.user.as_ref().unwrap().sub, "user-1");
    }

    #[test]
    fn test_logout_clears_user_and_flag() {
        let mut state = AuthState {
            user: Some(AuthUser {
                sub: "user-1".to_string(),
                email: None,
            }),
            is_authenticated: true,
            ..Default::default()
        };

        state.apply(AuthEvent::LoggedOut);

        assert!(state.user.is_none());
        assert!(!state.is_authenticated);
    }
}
