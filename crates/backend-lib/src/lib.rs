// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core library for the Signet credential issuance service.

pub mod auth;
pub mod config;
pub mod error;
pub mod router;
pub mod store;
pub mod validation;

use crate::auth::{AuthService, TokenIssuer};
use crate::config::Settings;
use crate::error::AppError;
use crate::store::CredentialStore;
use chrono::Duration;
use std::sync::Arc;

/// Application state shared across all handlers
pub struct AppState<S> {
    /// Authentication service
    pub auth: Arc<AuthService<S>>,
    /// Settings manager
    pub settings: Arc<Settings>,
}

impl<S: CredentialStore> AppState<S> {
    /// Create a new application state.
    ///
    /// Fails when the signing secret is empty: that is a startup
    /// precondition violation and the process must not come up.
    pub fn new(store: S, settings: Settings) -> Result<Self, AppError> {
        let ttl = Duration::seconds(settings.token_ttl_secs as i64);
        let tokens = TokenIssuer::new(&settings.token_secret, ttl)?;
        let auth = AuthService::new(store, tokens, settings.password_requirements.clone());

        Ok(Self {
            auth: Arc::new(auth),
            settings: Arc::new(settings),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_app_state_rejects_missing_secret() {
        // Settings::default has no secret; the process must not start
        let result = AppState::new(MemoryStore::new(), Settings::default());
        assert!(matches!(result, Err(AppError::Signing(_))));
    }

    #[test]
    fn test_app_state_with_secret() {
        let settings = Settings {
            token_secret: "test-secret-0123456789abcdef".to_string(),
            ..Settings::default()
        };
        assert!(AppState::new(MemoryStore::new(), settings).is_ok());
    }
}
