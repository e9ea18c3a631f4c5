// ============================
// crates/backend-lib/src/error.rs
// ============================
//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use signet_common::{ErrorBody, ErrorDetail};
use thiserror::Error;

use crate::validation::ValidationError;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("User already exists with this username or email")]
    DuplicateUser,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Token is invalid")]
    TokenInvalid,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Token signing error: {0}")]
    Signing(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateUser => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::TokenInvalid | AppError::TokenExpired => {
                StatusCode::UNAUTHORIZED
            },
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VAL_001",
            AppError::InvalidCredentials => "AUTH_001",
            AppError::TokenInvalid | AppError::TokenExpired => "AUTH_002",
            AppError::DuplicateUser => "AUTH_003",
            AppError::Hashing(_) => "HASH_001",
            AppError::Signing(_) => "SIGN_001",
            AppError::Internal(_) => "INT_001",
            AppError::Io(_) => "IO_001",
            AppError::Json(_) => "JSON_001",
        }
    }

    /// Get a sanitized message suitable for production use
    ///
    /// `InvalidCredentials` deliberately carries a single fixed message:
    /// the caller must not be able to tell an unknown email from a wrong
    /// password.
    pub fn sanitized_message(&self) -> String {
        match self {
            // Validation failures describe what the client must fix
            AppError::Validation(e) => e.to_string(),
            AppError::DuplicateUser => {
                "User already exists with this username or email".to_string()
            },
            AppError::InvalidCredentials => "Invalid email or password".to_string(),
            AppError::TokenInvalid | AppError::TokenExpired => "Authentication failed".to_string(),
            AppError::Hashing(_)
            | AppError::Signing(_)
            | AppError::Internal(_)
            | AppError::Io(_)
            | AppError::Json(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Infrastructure detail stays in the server log, never in the body
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(code = error_code, error = %self, "request failed");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: error_code.to_string(),
                message: self.sanitized_message(),
            },
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}
