// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Input-shape validation and email normalization.
//!
//! This is the pre-condition filter applied before any credential flow
//! runs: it checks the shape of usernames, emails, and passwords, and
//! folds email addresses into their canonical form so that uniqueness
//! and lookups see one spelling per mailbox.

use crate::config::PasswordRequirements;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

// Common validation constants
pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 50;
pub const MAX_PASSWORD_LENGTH: usize = 128;
pub const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit

// Regex patterns for validation
static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Possible validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a username
pub fn validate_username(username: &str) -> ValidationResult<&str> {
    if username.len() < MIN_USERNAME_LENGTH || username.len() > MAX_USERNAME_LENGTH {
        return Err(ValidationError::InvalidUsername(format!(
            "Username must be between {MIN_USERNAME_LENGTH} and {MAX_USERNAME_LENGTH} characters"
        )));
    }

    if !USERNAME_REGEX.is_match(username) {
        return Err(ValidationError::InvalidUsername(
            "Username must contain only letters and numbers".to_string(),
        ));
    }

    Ok(username)
}

/// Validate an email address's shape
pub fn validate_email(email: &str) -> ValidationResult<&str> {
    if email.is_empty() {
        return Err(ValidationError::InvalidEmail(
            "Email must not be empty".to_string(),
        ));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail(format!(
            "Email must be at most {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail(
            "Please enter a valid email address".to_string(),
        ));
    }

    Ok(email)
}

/// Fold an email address into its canonical form.
///
/// All addresses are lowercased. Gmail mailboxes additionally ignore
/// dots in the local part and anything after a `+`, and `googlemail.com`
/// is the same service as `gmail.com`, so those aliases collapse to one
/// canonical spelling. Call only after [`validate_email`].
pub fn normalize_email(email: &str) -> String {
    let lowered = email.to_lowercase();
    let Some((local, domain)) = lowered.split_once('@') else {
        return lowered;
    };

    match domain {
        "gmail.com" | "googlemail.com" => {
            let local = local.split('+').next().unwrap_or(local);
            let local: String = local.chars().filter(|c| *c != '.').collect();
            format!("{local}@gmail.com")
        },
        _ => lowered,
    }
}

/// Validate a password against the complexity requirements
pub fn validate_password(password: &str, req: &PasswordRequirements) -> ValidationResult<()> {
    if password.len() < req.min_length {
        return Err(ValidationError::InvalidPassword(format!(
            "Password must be at least {} characters long",
            req.min_length
        )));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::InvalidPassword(format!(
            "Password must be at most {MAX_PASSWORD_LENGTH} characters"
        )));
    }

    if req.require_uppercase && !password.chars().any(|c| c.is_uppercase()) {
        return Err(ValidationError::InvalidPassword(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }

    if req.require_lowercase && !password.chars().any(|c| c.is_lowercase()) {
        return Err(ValidationError::InvalidPassword(
            "Password must contain at least one lowercase letter".to_string(),
        ));
    }

    if req.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPassword(
            "Password must contain at least one number".to_string(),
        ));
    }

    if req.require_special && !password.chars().any(|c| !c.is_alphanumeric()) {
        return Err(ValidationError::InvalidPassword(
            "Password must contain at least one special character".to_string(),
        ));
    }

    Ok(())
}

/// Login only requires that a password was supplied at all
pub fn validate_password_present(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::InvalidPassword(
            "Password is required".to_string(),
        ));
    }
    Ok(())
}
