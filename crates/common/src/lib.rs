// ================
// crates/common/src/lib.rs
// ================
//! Common types and structures
//! shared between the Signet credential service and its clients.
//! This module defines the HTTP request and response bodies for the
//! authentication endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of `POST /api/auth/register`
/// # Fields
/// * `username` - Desired account name (3-50 alphanumeric characters)
/// * `email` - Contact address; stored in normalized form
/// * `password` - Plaintext password, hashed server-side and never stored
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/auth/login`
/// # Fields
/// * `email` - Address used at registration (any alias form accepted)
/// * `password` - Plaintext password to verify
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Sanitized view of a user record. Never carries the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Successful response for both register and login.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    pub user: UserView,
    /// Signed session token (compact JWS); opaque to clients
    pub token: String,
}

/// Error envelope returned on every failure path.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ErrorDetail {
    /// Machine-readable error code, e.g. `AUTH_001`
    pub code: String,
    /// Human-readable message, sanitized for clients
    pub message: String,
}
