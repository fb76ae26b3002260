//! Token storage for the signed-in user

use adaptive_list::TokenProvider;
use log::{debug, warn};
use std::sync::RwLock;

/// Keeps the bearer token in memory and forgets it when the backend rejects it
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    /// Stores the token issued at sign-in
    pub fn set_token(&self, token: impl Into<String>) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(token.into());
        debug!("Stored access token");
    }

    /// Forgets the current token (sign-out)
    pub fn clear(&self) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    pub fn is_signed_in(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

impl TokenProvider for InMemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn on_unauthorized(&self) {
        warn!("Access token rejected by the API, signing out");
        self.clear();
    }
}
