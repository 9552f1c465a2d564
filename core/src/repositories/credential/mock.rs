//! Mock implementation of RefreshCredentialRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshCredential;
use crate::errors::DomainError;

use super::r#trait::RefreshCredentialRepository;

/// Mock credential repository for testing, keyed by token hash
pub struct MockCredentialRepository {
    credentials: Arc<RwLock<HashMap<String, RefreshCredential>>>,
}

impl MockCredentialRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            credentials: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Total number of stored records, regardless of state
    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }
}

impl Default for MockCredentialRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RefreshCredentialRepository for MockCredentialRepository {
    async fn save(&self, credential: RefreshCredential) -> Result<RefreshCredential, DomainError> {
        let mut credentials = self.credentials.write().await;

        if credentials.contains_key(&credential.token_hash) {
            return Err(DomainError::Validation {
                message: "Credential already exists".to_string(),
            });
        }

        credentials.insert(credential.token_hash.clone(), credential.clone());
        Ok(credential)
    }

    async fn find_active(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshCredential>, DomainError> {
        let credentials = self.credentials.read().await;
        Ok(credentials
            .get(token_hash)
            .filter(|c| c.is_usable())
            .cloned())
    }

    async fn touch(&self, id: Uuid, when: DateTime<Utc>) -> Result<bool, DomainError> {
        let mut credentials = self.credentials.write().await;

        match credentials.values_mut().find(|c| c.id == id) {
            Some(credential) if credential.is_usable() => {
                credential.touch(when);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn deactivate(&self, token_hash: &str) -> Result<bool, DomainError> {
        let mut credentials = self.credentials.write().await;

        match credentials.get_mut(token_hash) {
            Some(credential) if credential.is_active => {
                credential.deactivate();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn deactivate_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut credentials = self.credentials.write().await;
        let mut count = 0;

        for credential in credentials.values_mut() {
            if credential.user_id == user_id && credential.is_active {
                credential.deactivate();
                count += 1;
            }
        }

        Ok(count)
    }

    async fn find_active_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<RefreshCredential>, DomainError> {
        let credentials = self.credentials.read().await;
        let mut found: Vec<RefreshCredential> = credentials
            .values()
            .filter(|c| c.user_id == user_id && c.is_usable())
            .cloned()
            .collect();

        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn prune_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut credentials = self.credentials.write().await;
        let initial_count = credentials.len();

        credentials.retain(|_, c| !(c.user_id == user_id && (c.is_expired() || !c.is_active)));

        Ok(initial_count - credentials.len())
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let mut credentials = self.credentials.write().await;
        let initial_count = credentials.len();

        credentials.retain(|_, c| !c.is_expired());

        Ok(initial_count - credentials.len())
    }
}
