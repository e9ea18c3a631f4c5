// ============================
// crates/backend-lib/src/auth/service.rs
// ============================
//! Register and Login orchestration.
use metrics::counter;
use signet_common::{AuthResponse, LoginRequest, RegisterRequest};
use zeroize::Zeroize;

use crate::auth::password;
use crate::auth::token::TokenIssuer;
use crate::config::PasswordRequirements;
use crate::error::AppError;
use crate::store::{CredentialStore, NewUser};
use crate::validation;

/// Orchestrates the credential flows over a store, the password
/// hasher, and the token issuer. Holds no mutable state: every request
/// is independent, and the one register/register race is resolved by
/// the store's atomic insert.
pub struct AuthService<S> {
    store: S,
    tokens: TokenIssuer,
    password_requirements: PasswordRequirements,
}

impl<S: CredentialStore> AuthService<S> {
    pub fn new(store: S, tokens: TokenIssuer, password_requirements: PasswordRequirements) -> Self {
        Self {
            store,
            tokens,
            password_requirements,
        }
    }

    /// Register a new account and issue its first session token.
    pub async fn register(&self, req: RegisterRequest) -> Result<AuthResponse, AppError> {
        let username = validation::validate_username(&req.username)?.to_string();
        validation::validate_email(&req.email)?;
        let email = validation::normalize_email(&req.email);
        validation::validate_password(&req.password, &self.password_requirements)?;

        // Fast-path duplicate check. Not authoritative: the store's
        // insert re-checks under its own lock.
        if self
            .store
            .find_by_username_or_email(&username, &email)
            .await?
            .is_some()
        {
            counter!("auth.register.duplicate").increment(1);
            return Err(AppError::DuplicateUser);
        }

        let mut plain = req.password;
        let password_hash =
            tokio::task::spawn_blocking(move || password::hash_password_secure(&mut plain))
                .await
                .map_err(|e| AppError::Internal(format!("hashing task failed: {e}")))??;

        let record = self
            .store
            .insert_unique(NewUser {
                username,
                email,
                password_hash,
            })
            .await
            .inspect_err(|e| {
                if matches!(e, AppError::DuplicateUser) {
                    counter!("auth.register.duplicate").increment(1);
                }
            })?;

        // The record stands even if issuance fails here: the client can
        // still log in, so nothing is rolled back.
        let token = self.tokens.issue(record.id)?;

        counter!("auth.register.success").increment(1);
        tracing::info!(user_id = %record.id, username = %record.username, "user registered");

        Ok(AuthResponse {
            user: record.view(),
            token,
        })
    }

    /// Authenticate an existing account and issue a session token.
    ///
    /// An unknown email and a wrong password are indistinguishable to
    /// the caller: both fail with the same `InvalidCredentials`.
    pub async fn login(&self, req: LoginRequest) -> Result<AuthResponse, AppError> {
        validation::validate_email(&req.email)?;
        validation::validate_password_present(&req.password)?;
        let email = validation::normalize_email(&req.email);

        let Some(record) = self.store.find_by_email(&email).await? else {
            counter!("auth.login.failure").increment(1);
            return Err(AppError::InvalidCredentials);
        };

        let hash = record.password_hash.clone();
        let mut plain = req.password;
        let matched = tokio::task::spawn_blocking(move || {
            let result = password::verify_password(&hash, &plain);
            plain.zeroize();
            result
        })
        .await
        .map_err(|e| AppError::Internal(format!("verification task failed: {e}")))??;

        if !matched {
            counter!("auth.login.failure").increment(1);
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(record.id)?;

        counter!("auth.login.success").increment(1);
        tracing::info!(user_id = %record.id, "user logged in");

        Ok(AuthResponse {
            user: record.view(),
            token,
        })
    }

    /// The issuer, for consumers that need to verify presented tokens
    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }
}
