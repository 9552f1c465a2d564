//! Refresh credential repository trait defining the persistence interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::RefreshCredential;
use crate::errors::DomainError;

/// Repository trait for RefreshCredential persistence operations
///
/// Each operation must be individually atomic; no multi-record transaction is
/// required. Quota eviction, rotation, and revocation each touch records
/// independently and idempotently.
///
/// # Security Considerations
/// - Only token hashes are stored; the raw opaque token never reaches the repository
/// - `deactivate` is a conditional update so racing refreshes cannot both rotate
///   a single-use credential
/// - Expired credentials must be cleaned up by the periodic sweep
#[async_trait]
pub trait RefreshCredentialRepository: Send + Sync {
    /// Save a new refresh credential to the repository
    ///
    /// # Returns
    /// * `Ok(RefreshCredential)` - The saved credential
    /// * `Err(DomainError)` - Save failed (e.g., duplicate token hash)
    async fn save(&self, credential: RefreshCredential) -> Result<RefreshCredential, DomainError>;

    /// Find a usable credential by its hashed token value
    ///
    /// Matches on hash AND `is_active` AND `expires_at > now`. An inactive or
    /// expired credential is reported as absent.
    async fn find_active(&self, token_hash: &str) -> Result<Option<RefreshCredential>, DomainError>;

    /// Stamp the last-used timestamp, conditionally
    ///
    /// The update applies only while the credential is still usable.
    ///
    /// # Returns
    /// * `Ok(true)` - The credential was usable and has been stamped
    /// * `Ok(false)` - The credential died (deactivated/expired) in the meantime
    async fn touch(&self, id: Uuid, when: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Deactivate a credential, compare-and-swap style
    ///
    /// Flips `is_active` to false only if it is currently true. Callers that
    /// ignore the returned flag get idempotent logout semantics; rotation
    /// callers require `true` to prove they won the race.
    ///
    /// # Returns
    /// * `Ok(true)` - This call performed the deactivation
    /// * `Ok(false)` - Credential absent or already inactive
    async fn deactivate(&self, token_hash: &str) -> Result<bool, DomainError>;

    /// Deactivate every active credential for a user
    ///
    /// Idempotent: repeating the call deactivates nothing further.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of credentials deactivated by this call
    async fn deactivate_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Find all usable credentials for a user, newest first
    async fn find_active_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RefreshCredential>, DomainError>;

    /// Delete the user's expired and inactive credentials
    ///
    /// Invoked at issuance time before quota enforcement.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of credentials deleted
    async fn prune_for_user(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Delete expired credentials across all users
    ///
    /// This method backs the periodic sweep; request handlers never invoke it
    /// synchronously.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of expired credentials deleted
    async fn delete_expired(&self) -> Result<usize, DomainError>;

    /// Count usable credentials for a user
    async fn count_active_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let credentials = self.find_active_for_user(user_id).await?;
        Ok(credentials.len())
    }
}
