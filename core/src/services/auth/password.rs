//! Password verification seam
//!
//! Hashing policy is owned by the hosting environment; this trait only lets
//! the login flow check a candidate password against a stored hash. The
//! bcrypt-backed implementation lives in the infrastructure crate.

use crate::errors::DomainError;

/// Verifies a candidate password against a stored hash
pub trait PasswordVerifier: Send + Sync {
    /// # Returns
    ///
    /// * `Ok(true)` - The password matches
    /// * `Ok(false)` - The password does not match
    /// * `Err(DomainError)` - The stored hash is malformed
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, DomainError>;
}
