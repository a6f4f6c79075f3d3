//! Shared authentication session

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// Access/refresh token pair as issued by the auth endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Shared token cell for one signed-in session.
///
/// Cloning is cheap and every clone observes the same tokens, so the
/// client and all stores built over it share one sign-in state. Login
/// stores a pair; logout and any 401 response clear both together.
#[derive(Debug, Clone, Default)]
pub struct Session {
    tokens: Arc<RwLock<Option<TokenPair>>>,
}

impl Session {
    /// Create an empty (signed-out) session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session seeded with previously persisted tokens
    pub fn with_tokens(tokens: TokenPair) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(Some(tokens))),
        }
    }

    /// Store a token pair, replacing any previous one
    pub fn store(&self, tokens: TokenPair) {
        *self.tokens.write().expect("session lock poisoned") = Some(tokens);
    }

    /// Drop both tokens
    pub fn clear(&self) {
        *self.tokens.write().expect("session lock poisoned") = None;
    }

    /// Current access token, if signed in
    pub fn access_token(&self) -> Option<String> {
        self.tokens
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|t| t.access_token.clone())
    }

    /// Current refresh token, if signed in
    pub fn refresh_token(&self) -> Option<String> {
        self.tokens
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|t| t.refresh_token.clone())
    }

    /// Whether a token pair is currently held
    pub fn is_authenticated(&self) -> bool {
        self.tokens.read().expect("session lock poisoned").is_some()
    }

    /// Snapshot of the current pair, if any
    pub fn tokens(&self) -> Option<TokenPair> {
        self.tokens.read().expect("session lock poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> TokenPair {
        TokenPair {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
        }
    }

    #[test]
    fn test_new_session_is_signed_out() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert_eq!(session.access_token(), None);
        assert_eq!(session.refresh_token(), None);
    }

    #[test]
    fn test_store_and_clear() {
        let session = Session::new();
        session.store(pair());
        assert!(session.is_authenticated());
        assert_eq!(session.access_token().as_deref(), Some("access"));

        session.clear();
        assert!(!session.is_authenticated());
        assert_eq!(session.tokens(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let session = Session::new();
        let observer = session.clone();

        session.store(pair());
        assert!(observer.is_authenticated());

        observer.clear();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_store_replaces_previous_pair() {
        let session = Session::with_tokens(pair());
        session.store(TokenPair {
            access_token: "next".to_string(),
            refresh_token: "next-refresh".to_string(),
        });
        assert_eq!(session.access_token().as_deref(), Some("next"));
        assert_eq!(session.refresh_token().as_deref(), Some("next-refresh"));
    }
}
