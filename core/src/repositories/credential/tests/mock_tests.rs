//! Unit tests for the mock credential repository

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::device::DeviceInfo;
use crate::domain::entities::token::RefreshCredential;
use crate::repositories::credential::mock::MockCredentialRepository;
use crate::repositories::credential::RefreshCredentialRepository;

fn credential_for(user_id: Uuid, hash: &str) -> RefreshCredential {
    RefreshCredential::new(
        user_id,
        hash.to_string(),
        DeviceInfo::unknown(),
        Duration::days(30),
    )
}

#[tokio::test]
async fn test_save_and_find_active() {
    let repo = MockCredentialRepository::new();
    let user_id = Uuid::new_v4();

    repo.save(credential_for(user_id, "hash-1")).await.unwrap();

    let found = repo.find_active("hash-1").await.unwrap();
    assert!(found.is_some());
    assert_eq!(found.unwrap().user_id, user_id);

    assert!(repo.find_active("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_rejects_duplicate_hash() {
    let repo = MockCredentialRepository::new();
    let user_id = Uuid::new_v4();

    repo.save(credential_for(user_id, "hash-1")).await.unwrap();
    let result = repo.save(credential_for(user_id, "hash-1")).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_find_active_excludes_expired_and_inactive() {
    let repo = MockCredentialRepository::new();
    let user_id = Uuid::new_v4();

    let mut expired = credential_for(user_id, "expired");
    expired.expires_at = Utc::now() - Duration::days(1);
    repo.save(expired).await.unwrap();

    let mut inactive = credential_for(user_id, "inactive");
    inactive.deactivate();
    repo.save(inactive).await.unwrap();

    assert!(repo.find_active("expired").await.unwrap().is_none());
    assert!(repo.find_active("inactive").await.unwrap().is_none());
}

#[tokio::test]
async fn test_deactivate_is_compare_and_swap() {
    let repo = MockCredentialRepository::new();
    let user_id = Uuid::new_v4();

    repo.save(credential_for(user_id, "hash-1")).await.unwrap();

    // First call performs the flip, second call reports it lost
    assert!(repo.deactivate("hash-1").await.unwrap());
    assert!(!repo.deactivate("hash-1").await.unwrap());

    // Absent credential is not an error
    assert!(!repo.deactivate("missing").await.unwrap());
}

#[tokio::test]
async fn test_touch_requires_usable_credential() {
    let repo = MockCredentialRepository::new();
    let user_id = Uuid::new_v4();

    let credential = repo.save(credential_for(user_id, "hash-1")).await.unwrap();

    let when = Utc::now();
    assert!(repo.touch(credential.id, when).await.unwrap());

    let stored = repo.find_active("hash-1").await.unwrap().unwrap();
    assert_eq!(stored.last_used_at, Some(when));

    // A deactivated credential cannot be touched
    repo.deactivate("hash-1").await.unwrap();
    assert!(!repo.touch(credential.id, Utc::now()).await.unwrap());
}

#[tokio::test]
async fn test_deactivate_all_for_user() {
    let repo = MockCredentialRepository::new();
    let user_id = Uuid::new_v4();
    let other_user = Uuid::new_v4();

    repo.save(credential_for(user_id, "a")).await.unwrap();
    repo.save(credential_for(user_id, "b")).await.unwrap();
    repo.save(credential_for(other_user, "c")).await.unwrap();

    assert_eq!(repo.deactivate_all_for_user(user_id).await.unwrap(), 2);
    // Idempotent on repeat
    assert_eq!(repo.deactivate_all_for_user(user_id).await.unwrap(), 0);

    // The other user's credential is untouched
    assert!(repo.find_active("c").await.unwrap().is_some());
}

#[tokio::test]
async fn test_find_active_for_user_orders_newest_first() {
    let repo = MockCredentialRepository::new();
    let user_id = Uuid::new_v4();

    for hash in ["first", "second", "third"] {
        repo.save(credential_for(user_id, hash)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let active = repo.find_active_for_user(user_id).await.unwrap();
    assert_eq!(active.len(), 3);
    assert_eq!(active[0].token_hash, "third");
    assert_eq!(active[2].token_hash, "first");
}

#[tokio::test]
async fn test_prune_for_user_removes_dead_records() {
    let repo = MockCredentialRepository::new();
    let user_id = Uuid::new_v4();

    repo.save(credential_for(user_id, "live")).await.unwrap();

    let mut expired = credential_for(user_id, "expired");
    expired.expires_at = Utc::now() - Duration::days(1);
    repo.save(expired).await.unwrap();

    let mut inactive = credential_for(user_id, "inactive");
    inactive.deactivate();
    repo.save(inactive).await.unwrap();

    assert_eq!(repo.prune_for_user(user_id).await.unwrap(), 2);
    assert_eq!(repo.len().await, 1);
    assert!(repo.find_active("live").await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_expired_sweeps_all_users() {
    let repo = MockCredentialRepository::new();

    for _ in 0..3 {
        let mut expired = credential_for(Uuid::new_v4(), &Uuid::new_v4().to_string());
        expired.expires_at = Utc::now() - Duration::hours(1);
        repo.save(expired).await.unwrap();
    }
    repo.save(credential_for(Uuid::new_v4(), "live"))
        .await
        .unwrap();

    assert_eq!(repo.delete_expired().await.unwrap(), 3);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_count_active_for_user() {
    let repo = MockCredentialRepository::new();
    let user_id = Uuid::new_v4();

    repo.save(credential_for(user_id, "a")).await.unwrap();
    repo.save(credential_for(user_id, "b")).await.unwrap();
    repo.deactivate("b").await.unwrap();

    assert_eq!(repo.count_active_for_user(user_id).await.unwrap(), 1);
}
