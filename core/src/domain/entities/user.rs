//! User entity - session-relevant fields of a registered account.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role carried in access-token claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A reader consuming published content
    Reader,
    /// An author publishing content
    Author,
    /// A platform administrator
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Reader => "reader",
            Role::Author => "author",
            Role::Admin => "admin",
        }
    }
}

/// User entity representing a registered account
///
/// Only the fields the session subsystem reads or mutates are modelled here;
/// profile data lives with the excluded CRUD layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address used for login
    pub email: String,

    /// Hashed password; hashing policy is owned by the hosting environment
    pub password_hash: String,

    /// Role of the user
    pub role: Role,

    /// Whether the user's email address has been verified
    pub email_verified: bool,

    /// Whether the account is active
    pub is_active: bool,

    /// Timestamp of the most recent password change
    pub password_changed_at: Option<DateTime<Utc>>,

    /// Consecutive failed login attempts since the last success
    pub failed_login_attempts: u32,

    /// Timestamp until which the account is locked
    pub lock_until: Option<DateTime<Utc>>,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new User instance
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            role: Role::Reader,
            email_verified: false,
            is_active: true,
            password_changed_at: None,
            failed_login_attempts: 0,
            lock_until: None,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Checks whether the account is currently locked
    ///
    /// Invariant: locked iff a lock deadline exists and lies in the future.
    /// The lock heals itself by expiry; no unlock write is required.
    pub fn is_locked(&self) -> bool {
        self.lock_until.map_or(false, |until| until > Utc::now())
    }

    /// Checks whether the password changed after a token was issued
    ///
    /// An access token issued before the most recent password change must be
    /// rejected even if its signature and TTL are otherwise valid.
    pub fn changed_password_after(&self, token_issued_at: i64) -> bool {
        self.password_changed_at
            .map_or(false, |changed| changed.timestamp() > token_issued_at)
    }

    /// Records a failed login attempt, locking the account at the threshold
    pub fn record_failed_login(&mut self, max_attempts: u32, lock_duration: Duration) {
        self.failed_login_attempts += 1;
        if self.failed_login_attempts >= max_attempts {
            self.lock_until = Some(Utc::now() + lock_duration);
        }
        self.updated_at = Utc::now();
    }

    /// Clears the failed-login counter and any lock after a successful login
    pub fn reset_login_failures(&mut self) {
        self.failed_login_attempts = 0;
        self.lock_until = None;
        self.updated_at = Utc::now();
    }

    /// Stamps the password-change timestamp
    pub fn mark_password_changed(&mut self) {
        self.password_changed_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Marks the user's email address as verified
    pub fn verify_email(&mut self) {
        self.email_verified = true;
        self.updated_at = Utc::now();
    }

    /// Deactivates the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Changes the user's role
    ///
    /// Takes effect in claims only at the next refresh or re-login.
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_creation() {
        let user = User::new("reader@example.com", "hashed_password");

        assert_eq!(user.email, "reader@example.com");
        assert_eq!(user.role, Role::Reader);
        assert!(user.is_active);
        assert!(!user.email_verified);
        assert_eq!(user.failed_login_attempts, 0);
        assert!(!user.is_locked());
        assert!(user.password_changed_at.is_none());
    }

    #[test]
    fn test_lock_invariant() {
        let mut user = User::new("a@example.com", "hash");

        // A lock deadline in the past does not count as locked
        user.lock_until = Some(Utc::now() - Duration::minutes(1));
        assert!(!user.is_locked());

        user.lock_until = Some(Utc::now() + Duration::minutes(30));
        assert!(user.is_locked());
    }

    #[test]
    fn test_failed_login_threshold() {
        let mut user = User::new("a@example.com", "hash");

        for _ in 0..4 {
            user.record_failed_login(5, Duration::minutes(30));
        }
        assert_eq!(user.failed_login_attempts, 4);
        assert!(!user.is_locked());

        user.record_failed_login(5, Duration::minutes(30));
        assert_eq!(user.failed_login_attempts, 5);
        assert!(user.is_locked());
    }

    #[test]
    fn test_reset_login_failures() {
        let mut user = User::new("a@example.com", "hash");

        for _ in 0..5 {
            user.record_failed_login(5, Duration::minutes(30));
        }
        assert!(user.is_locked());

        user.reset_login_failures();
        assert_eq!(user.failed_login_attempts, 0);
        assert!(!user.is_locked());
    }

    #[test]
    fn test_changed_password_after() {
        let mut user = User::new("a@example.com", "hash");
        let issued_at = Utc::now().timestamp() - 60;

        // No password change recorded
        assert!(!user.changed_password_after(issued_at));

        user.mark_password_changed();
        assert!(user.changed_password_after(issued_at));

        // A token issued after the change stays valid
        let fresh_issued_at = Utc::now().timestamp() + 1;
        assert!(!user.changed_password_after(fresh_issued_at));
    }

    #[test]
    fn test_update_last_login() {
        let mut user = User::new("a@example.com", "hash");

        assert!(user.last_login_at.is_none());
        user.update_last_login();
        assert!(user.last_login_at.is_some());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Reader).unwrap(), "\"reader\"");
        assert_eq!(serde_json::to_string(&Role::Author).unwrap(), "\"author\"");
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }
}
