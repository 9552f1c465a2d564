//! MySQL implementation of the RefreshCredentialRepository trait.
//!
//! The compare-and-swap operations (`deactivate`, `touch`) rely on
//! conditional `UPDATE ... WHERE` clauses plus `rows_affected`, so two racing
//! refresh calls cannot both claim a single-use credential.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use ak_core::domain::entities::device::{DeviceClass, DeviceInfo};
use ak_core::domain::entities::token::RefreshCredential;
use ak_core::errors::DomainError;
use ak_core::repositories::RefreshCredentialRepository;

/// MySQL implementation of RefreshCredentialRepository
pub struct MySqlCredentialRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlCredentialRepository {
    /// Create a new MySQL credential repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshCredential entity
    fn row_to_credential(row: &sqlx::mysql::MySqlRow) -> Result<RefreshCredential, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        let user_id: String = row.try_get("user_id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get user_id: {}", e),
        })?;

        let device_class: String =
            row.try_get("device_class").map_err(|e| DomainError::Internal {
                message: format!("Failed to get device_class: {}", e),
            })?;

        Ok(RefreshCredential {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid credential UUID: {}", e),
            })?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            token_hash: row.try_get("token_hash").map_err(|e| DomainError::Internal {
                message: format!("Failed to get token_hash: {}", e),
            })?,
            device: DeviceInfo {
                user_agent: row.try_get("user_agent").map_err(|e| DomainError::Internal {
                    message: format!("Failed to get user_agent: {}", e),
                })?,
                ip: row.try_get("ip_address").map_err(|e| DomainError::Internal {
                    message: format!("Failed to get ip_address: {}", e),
                })?,
                device_class: Self::parse_device_class(&device_class),
            },
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
            last_used_at: row.try_get("last_used_at").map_err(|e| DomainError::Internal {
                message: format!("Failed to get last_used_at: {}", e),
            })?,
            is_active: row.try_get("is_active").map_err(|e| DomainError::Internal {
                message: format!("Failed to get is_active: {}", e),
            })?,
        })
    }

    fn parse_device_class(value: &str) -> DeviceClass {
        match value {
            "mobile" => DeviceClass::Mobile,
            "tablet" => DeviceClass::Tablet,
            "desktop" => DeviceClass::Desktop,
            _ => DeviceClass::Unknown,
        }
    }
}

#[async_trait]
impl RefreshCredentialRepository for MySqlCredentialRepository {
    async fn save(&self, credential: RefreshCredential) -> Result<RefreshCredential, DomainError> {
        let query = r#"
            INSERT INTO refresh_credentials (
                id, user_id, token_hash, user_agent, ip_address, device_class,
                created_at, expires_at, last_used_at, is_active
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(credential.id.to_string())
            .bind(credential.user_id.to_string())
            .bind(&credential.token_hash)
            .bind(&credential.device.user_agent)
            .bind(&credential.device.ip)
            .bind(credential.device.device_class.as_str())
            .bind(credential.created_at)
            .bind(credential.expires_at)
            .bind(credential.last_used_at)
            .bind(credential.is_active)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to save refresh credential: {}", e),
            })?;

        Ok(credential)
    }

    async fn find_active(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshCredential>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, user_agent, ip_address, device_class,
                   created_at, expires_at, last_used_at, is_active
            FROM refresh_credentials
            WHERE token_hash = ? AND is_active = TRUE AND expires_at > ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find refresh credential: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_credential(&row)?)),
            None => Ok(None),
        }
    }

    async fn touch(&self, id: Uuid, when: DateTime<Utc>) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE refresh_credentials
            SET last_used_at = ?
            WHERE id = ? AND is_active = TRUE AND expires_at > ?
        "#;

        let result = sqlx::query(query)
            .bind(when)
            .bind(id.to_string())
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to touch refresh credential: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn deactivate(&self, token_hash: &str) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE refresh_credentials
            SET is_active = FALSE
            WHERE token_hash = ? AND is_active = TRUE
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to deactivate credential: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn deactivate_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let query = r#"
            UPDATE refresh_credentials
            SET is_active = FALSE
            WHERE user_id = ? AND is_active = TRUE
        "#;

        let result = sqlx::query(query)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to deactivate user credentials: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }

    async fn find_active_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RefreshCredential>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, user_agent, ip_address, device_class,
                   created_at, expires_at, last_used_at, is_active
            FROM refresh_credentials
            WHERE user_id = ? AND is_active = TRUE AND expires_at > ?
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id.to_string())
            .bind(Utc::now())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find user credentials: {}", e),
            })?;

        let mut credentials = Vec::new();
        for row in rows {
            credentials.push(Self::row_to_credential(&row)?);
        }

        Ok(credentials)
    }

    async fn prune_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let query = r#"
            DELETE FROM refresh_credentials
            WHERE user_id = ? AND (expires_at < ? OR is_active = FALSE)
        "#;

        let result = sqlx::query(query)
            .bind(user_id.to_string())
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to prune user credentials: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let query = r#"
            DELETE FROM refresh_credentials
            WHERE expires_at < ?
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete expired credentials: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_class_parsing() {
        assert_eq!(
            MySqlCredentialRepository::parse_device_class("mobile"),
            DeviceClass::Mobile
        );
        assert_eq!(
            MySqlCredentialRepository::parse_device_class("tablet"),
            DeviceClass::Tablet
        );
        assert_eq!(
            MySqlCredentialRepository::parse_device_class("desktop"),
            DeviceClass::Desktop
        );
        // Unrecognised values degrade to unknown rather than erroring
        assert_eq!(
            MySqlCredentialRepository::parse_device_class("smart-fridge"),
            DeviceClass::Unknown
        );
    }
}
