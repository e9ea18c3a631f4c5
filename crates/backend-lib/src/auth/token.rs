// ============================
// crates/backend-lib/src/auth/token.rs
// ============================
//! Signed session token issuance and verification.
//!
//! Tokens are compact HS256 JWTs carrying `{sub, iat, exp}`. They are
//! stateless: validity is determined solely by the signature and the
//! expiry claim, with no server-side session store.
use crate::error::AppError;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claim set embedded in every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id the token was issued for
    pub sub: Uuid,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

/// Issues and verifies signed session tokens.
///
/// Built once at startup from the process-wide signing secret and held
/// immutably for the process lifetime; key rotation is out of scope.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer from the signing secret.
    ///
    /// An empty secret is a startup precondition violation: callers
    /// must treat the error as fatal to the process, not retry it.
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, AppError> {
        if secret.is_empty() {
            return Err(AppError::Signing(
                "signing secret is empty; set token_secret before starting".to_string(),
            ));
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    /// Issue a token for the given subject, expiring `ttl` from now
    pub fn issue(&self, subject: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Signing(e.to_string()))
    }

    /// Verify a token's signature and expiry.
    ///
    /// Returns `TokenExpired` for a well-signed token past its expiry
    /// and `TokenInvalid` for everything else; callers can distinguish
    /// the two even though both surface as unauthenticated.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(AppError::TokenExpired),
                _ => Err(AppError::TokenInvalid),
            },
        }
    }
}
