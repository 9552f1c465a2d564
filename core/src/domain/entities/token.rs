//! Token entities for the stateless-access/stateful-refresh scheme.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::device::DeviceInfo;
use super::user::Role;

/// Claims structure for the signed access token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Role of the user at issuance time
    pub role: Role,

    /// Whether the user's email address was verified at issuance time
    pub email_verified: bool,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Token ID (unique identifier, used for log correlation only)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for an access token
    ///
    /// Role and email-verified state are snapshot at issuance time; they are
    /// not re-read from storage until the next refresh or re-login.
    pub fn new_access(
        user_id: Uuid,
        role: Role,
        email_verified: bool,
        ttl: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let now = Utc::now();
        let expiry = now + ttl;

        Self {
            sub: user_id.to_string(),
            role,
            email_verified,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets the user ID from the claims
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Refresh credential entity stored in the database
///
/// The raw opaque token is never persisted; only its SHA-256 hash is. A
/// credential is usable for refresh only while `is_active` and not expired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshCredential {
    /// Unique identifier for the credential
    pub id: Uuid,

    /// User ID this credential belongs to
    pub user_id: Uuid,

    /// Hashed token value for security
    pub token_hash: String,

    /// Device metadata captured at creation
    pub device: DeviceInfo,

    /// Timestamp when the credential was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the credential expires
    pub expires_at: DateTime<Utc>,

    /// Timestamp of the last successful refresh with this credential
    pub last_used_at: Option<DateTime<Utc>>,

    /// Whether the credential can still be presented for refresh
    pub is_active: bool,
}

impl RefreshCredential {
    /// Creates a new active refresh credential
    pub fn new(user_id: Uuid, token_hash: String, device: DeviceInfo, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            device,
            created_at: now,
            expires_at: now + ttl,
            last_used_at: None,
            is_active: true,
        }
    }

    /// Checks if the credential has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the credential can be presented for refresh
    pub fn is_usable(&self) -> bool {
        self.is_active && !self.is_expired()
    }

    /// Deactivates the credential
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Stamps the last-used timestamp
    pub fn touch(&mut self, when: DateTime<Utc>) {
        self.last_used_at = Some(when);
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::device::DeviceInfo;

    #[test]
    fn test_access_claims_creation() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_access(
            user_id,
            Role::Author,
            true,
            Duration::minutes(15),
            "authkeep",
            "authkeep-clients",
        );

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, Role::Author);
        assert!(claims.email_verified);
        assert_eq!(claims.iss, "authkeep");
        assert_eq!(claims.aud, "authkeep-clients");
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_claims_user_id_parsing() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new_access(
            user_id,
            Role::Reader,
            false,
            Duration::minutes(15),
            "authkeep",
            "authkeep-clients",
        );

        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_claims_expiration() {
        let user_id = Uuid::new_v4();
        let mut claims = Claims::new_access(
            user_id,
            Role::Reader,
            false,
            Duration::minutes(15),
            "authkeep",
            "authkeep-clients",
        );

        claims.exp = Utc::now().timestamp() - 1;
        assert!(claims.is_expired());
    }

    #[test]
    fn test_refresh_credential_creation() {
        let user_id = Uuid::new_v4();
        let credential = RefreshCredential::new(
            user_id,
            "hashed_token_value".to_string(),
            DeviceInfo::unknown(),
            Duration::days(30),
        );

        assert_eq!(credential.user_id, user_id);
        assert_eq!(credential.token_hash, "hashed_token_value");
        assert!(credential.is_active);
        assert!(credential.last_used_at.is_none());
        assert!(!credential.is_expired());
        assert!(credential.is_usable());
    }

    #[test]
    fn test_refresh_credential_deactivation() {
        let mut credential = RefreshCredential::new(
            Uuid::new_v4(),
            "hash".to_string(),
            DeviceInfo::unknown(),
            Duration::days(30),
        );

        assert!(credential.is_usable());
        credential.deactivate();
        assert!(!credential.is_active);
        assert!(!credential.is_usable());
    }

    #[test]
    fn test_refresh_credential_expiration() {
        let mut credential = RefreshCredential::new(
            Uuid::new_v4(),
            "hash".to_string(),
            DeviceInfo::unknown(),
            Duration::days(30),
        );

        credential.expires_at = Utc::now() - Duration::days(1);
        assert!(credential.is_expired());
        assert!(!credential.is_usable());
    }

    #[test]
    fn test_refresh_credential_touch() {
        let mut credential = RefreshCredential::new(
            Uuid::new_v4(),
            "hash".to_string(),
            DeviceInfo::unknown(),
            Duration::days(30),
        );

        let when = Utc::now();
        credential.touch(when);
        assert_eq!(credential.last_used_at, Some(when));
    }

    #[test]
    fn test_token_pair_serialization() {
        let pair = TokenPair::new("access".to_string(), "refresh".to_string(), 900);

        let json = serde_json::to_string(&pair).unwrap();
        let deserialized: TokenPair = serde_json::from_str(&json).unwrap();

        assert_eq!(pair, deserialized);
    }

    #[test]
    fn test_claims_serialization() {
        let claims = Claims::new_access(
            Uuid::new_v4(),
            Role::Admin,
            true,
            Duration::minutes(15),
            "authkeep",
            "authkeep-clients",
        );

        let json = serde_json::to_string(&claims).unwrap();
        let deserialized: Claims = serde_json::from_str(&json).unwrap();

        assert_eq!(claims, deserialized);
    }
}
