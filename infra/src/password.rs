//! bcrypt-backed password verification
//!
//! Hashing policy (cost selection, migration) is owned by the hosting
//! environment; this module only verifies candidates and offers a hashing
//! helper for account provisioning.

use ak_core::errors::DomainError;
use ak_core::services::auth::PasswordVerifier;

/// Password verifier backed by bcrypt
pub struct BcryptPasswordVerifier;

impl BcryptPasswordVerifier {
    pub fn new() -> Self {
        Self
    }

    /// Hash a password with the default bcrypt cost
    pub fn hash(password: &str) -> Result<String, DomainError> {
        bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
    }
}

impl Default for BcryptPasswordVerifier {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordVerifier for BcryptPasswordVerifier {
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, DomainError> {
        bcrypt::verify(password, password_hash).map_err(|e| DomainError::Internal {
            message: format!("Failed to verify password: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        // Minimum cost keeps the test fast (bcrypt's MIN_COST is 4, but private)
        let hash = bcrypt::hash("hunter2", 4).unwrap();
        let verifier = BcryptPasswordVerifier::new();

        assert!(verifier.verify("hunter2", &hash).unwrap());
        assert!(!verifier.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let verifier = BcryptPasswordVerifier::new();
        assert!(verifier.verify("hunter2", "not-a-bcrypt-hash").is_err());
    }
}
