//! Authentication response value objects.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenPair};
use crate::domain::entities::user::{Role, User};

/// Session-safe projection of a user, stripped of the password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub email_verified: bool,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            email_verified: user.email_verified,
        }
    }
}

/// Response returned after login, session establishment, or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Signed access token
    pub access_token: String,

    /// Opaque refresh token
    pub refresh_token: String,

    /// Access token expiration time in seconds
    pub expires_in: i64,

    /// The user the session belongs to
    pub user: PublicUser,
}

impl AuthResponse {
    /// Builds a response from an issued token pair and the owning user
    pub fn from_parts(token_pair: TokenPair, user: &User) -> Self {
        Self {
            access_token: token_pair.access_token,
            refresh_token: token_pair.refresh_token,
            expires_in: token_pair.expires_in,
            user: PublicUser::from(user),
        }
    }
}

/// Authenticated request context produced by a successful access-token check
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The user loaded from storage during verification
    pub user: User,

    /// The verified access-token claims
    pub claims: Claims,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::token::TokenPair;

    #[test]
    fn test_public_user_excludes_password_hash() {
        let user = User::new("author@example.com", "bcrypt-hash");
        let public = PublicUser::from(&user);

        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("bcrypt-hash"));
        assert!(json.contains("author@example.com"));
    }

    #[test]
    fn test_auth_response_from_parts() {
        let user = User::new("reader@example.com", "hash");
        let pair = TokenPair::new("access".to_string(), "refresh".to_string(), 900);

        let response = AuthResponse::from_parts(pair, &user);
        assert_eq!(response.access_token, "access");
        assert_eq!(response.refresh_token, "refresh");
        assert_eq!(response.expires_in, 900);
        assert_eq!(response.user.id, user.id);
    }
}
