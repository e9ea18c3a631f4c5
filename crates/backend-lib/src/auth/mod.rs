// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
mod service;
pub mod token;

pub use password::{hash_password, hash_password_secure, verify_password, HASH_COST};
pub use service::AuthService;
pub use token::{Claims, TokenIssuer};
