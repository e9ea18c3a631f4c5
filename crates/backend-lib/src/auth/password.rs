// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use crate::error::AppError;
use zeroize::Zeroize;

/// bcrypt cost factor (2^12 rounds). Chosen to keep a single login in
/// the tens-to-low-hundreds of milliseconds on commodity hardware while
/// staying expensive for offline brute force.
pub const HASH_COST: u32 = 12;

/// Hash a password using bcrypt
///
/// A fresh salt is generated per call and embedded in the output
/// string, so two hashes of the same password differ.
pub fn hash_password(plain: &str) -> Result<String, AppError> {
    let hash = bcrypt::hash(plain, HASH_COST)?;
    Ok(hash)
}

/// Hash a password and zeroize the plaintext buffer
///
/// The plaintext must not outlive the hashing call.
pub fn hash_password_secure(plain: &mut String) -> Result<String, AppError> {
    let hash = hash_password(plain);
    plain.zeroize();
    hash
}

/// Verify a password against a stored hash
///
/// A wrong password is `Ok(false)`, never an error. `Err` means the
/// stored hash string itself is structurally malformed.
pub fn verify_password(hash: &str, plain: &str) -> Result<bool, AppError> {
    let matched = bcrypt::verify(plain, hash)?;
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cost 12 makes each hash slow by design, so these tests hash as
    // few times as possible.

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Abcdef1").unwrap();
        assert_ne!(hash, "Abcdef1");
        assert!(verify_password(&hash, "Abcdef1").unwrap());
        assert!(!verify_password(&hash, "wrong_password").unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let hash1 = hash_password("Abcdef1").unwrap();
        let hash2 = hash_password("Abcdef1").unwrap();
        // Fresh salt per call
        assert_ne!(hash1, hash2);
        assert!(verify_password(&hash1, "Abcdef1").unwrap());
        assert!(verify_password(&hash2, "Abcdef1").unwrap());
    }

    #[test]
    fn test_verify_malformed_hash_is_error() {
        let result = verify_password("not-a-bcrypt-hash", "Abcdef1");
        assert!(matches!(result, Err(AppError::Hashing(_))));
    }

    #[test]
    fn test_hash_password_secure_zeroizes() {
        let mut plain = "Abcdef1".to_string();
        let hash = hash_password_secure(&mut plain).unwrap();
        assert!(plain.is_empty());
        assert!(verify_password(&hash, "Abcdef1").unwrap());
    }
}
