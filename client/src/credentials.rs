//! Client credential storage seam

use std::sync::RwLock;

/// The pair of tokens a client holds between requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    /// Current signed access token
    pub access_token: String,
    /// Current opaque refresh token
    pub refresh_token: String,
}

/// Storage for the client's current credentials
///
/// Implementations wrap whatever the host platform offers (keychain, secure
/// storage, plain memory). Under rotation the store MUST persist the new
/// refresh token durably before the old one is discarded; a crash between the
/// server-side rotation and that persistence logs the device out. That risk
/// is accepted by the scheme's design.
pub trait CredentialStore: Send + Sync {
    /// Load the current credentials, if any
    fn load(&self) -> Option<StoredCredentials>;

    /// Replace the current credentials
    fn store(&self, credentials: StoredCredentials);

    /// Drop all credentials, forcing re-authentication
    fn clear(&self);
}

/// In-memory credential store for tests and short-lived processes
pub struct InMemoryCredentialStore {
    credentials: RwLock<Option<StoredCredentials>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            credentials: RwLock::new(None),
        }
    }

    /// Create a store pre-populated with credentials
    pub fn with_credentials(credentials: StoredCredentials) -> Self {
        Self {
            credentials: RwLock::new(Some(credentials)),
        }
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Option<StoredCredentials> {
        self.credentials.read().unwrap().clone()
    }

    fn store(&self, credentials: StoredCredentials) {
        *self.credentials.write().unwrap() = Some(credentials);
    }

    fn clear(&self) {
        *self.credentials.write().unwrap() = None;
    }
}
