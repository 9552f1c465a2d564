//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ak_core::domain::entities::user::{Role, User};
use ak_core::errors::DomainError;
use ak_core::repositories::UserRepository;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        let role: String = row
            .try_get("role")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get role: {}", e) })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            password_hash: row.try_get("password_hash").map_err(|e| DomainError::Internal {
                message: format!("Failed to get password_hash: {}", e),
            })?,
            role: Self::parse_role(&role),
            email_verified: row.try_get("email_verified").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email_verified: {}", e),
            })?,
            is_active: row.try_get("is_active").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_active: {}", e),
            })?,
            password_changed_at: row.try_get("password_changed_at").map_err(|e| {
                DomainError::Internal {
                    message: format!("Failed to get password_changed_at: {}", e),
                }
            })?,
            failed_login_attempts: row.try_get("failed_login_attempts").map_err(|e| {
                DomainError::Internal {
                    message: format!("Failed to get failed_login_attempts: {}", e),
                }
            })?,
            lock_until: row.try_get("lock_until").map_err(|e| DomainError::Internal {
                message: format!("Failed to get lock_until: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
            last_login_at: row.try_get("last_login_at").map_err(|e| DomainError::Internal {
                message: format!("Failed to get last_login_at: {}", e),
            })?,
        })
    }

    fn parse_role(value: &str) -> Role {
        match value {
            "admin" => Role::Admin,
            "author" => Role::Author,
            _ => Role::Reader,
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let exists_query = "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?) AS present";
        let exists_row = sqlx::query(exists_query)
            .bind(&user.email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check user existence: {}", e),
            })?;

        let present: i8 = exists_row.try_get("present").map_err(|e| DomainError::Internal {
            message: format!("Failed to get existence result: {}", e),
        })?;

        if present == 1 {
            return Err(DomainError::Validation {
                message: "Email already registered".to_string(),
            });
        }

        let query = r#"
            INSERT INTO users (
                id, email, password_hash, role, email_verified, is_active,
                password_changed_at, failed_login_attempts, lock_until,
                created_at, updated_at, last_login_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.email_verified)
            .bind(user.is_active)
            .bind(user.password_changed_at)
            .bind(user.failed_login_attempts)
            .bind(user.lock_until)
            .bind(user.created_at)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to create user: {}", e),
            })?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, password_hash, role, email_verified, is_active,
                   password_changed_at, failed_login_attempts, lock_until,
                   created_at, updated_at, last_login_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, password_hash, role, email_verified, is_active,
                   password_changed_at, failed_login_attempts, lock_until,
                   created_at, updated_at, last_login_at
            FROM users
            WHERE email = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users
            SET email = ?, password_hash = ?, role = ?, email_verified = ?,
                is_active = ?, password_changed_at = ?, failed_login_attempts = ?,
                lock_until = ?, updated_at = ?, last_login_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.email_verified)
            .bind(user.is_active)
            .bind(user.password_changed_at)
            .bind(user.failed_login_attempts)
            .bind(user.lock_until)
            .bind(user.updated_at)
            .bind(user.last_login_at)
            .bind(user.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update user: {}", e),
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: format!("user {}", user.id),
            });
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!(MySqlUserRepository::parse_role("admin"), Role::Admin);
        assert_eq!(MySqlUserRepository::parse_role("author"), Role::Author);
        assert_eq!(MySqlUserRepository::parse_role("reader"), Role::Reader);
        // Unknown roles fall back to the least-privileged
        assert_eq!(MySqlUserRepository::parse_role("owner"), Role::Reader);
    }
}
