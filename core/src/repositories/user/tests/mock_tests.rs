//! Unit tests for the mock user repository

use crate::domain::entities::user::User;
use crate::repositories::user::mock::MockUserRepository;
use crate::repositories::user::UserRepository;

#[tokio::test]
async fn test_create_and_find() {
    let repo = MockUserRepository::new();
    let user = User::new("reader@example.com", "hash");
    let user_id = user.id;

    repo.create(user).await.unwrap();

    let by_id = repo.find_by_id(user_id).await.unwrap();
    assert!(by_id.is_some());

    let by_email = repo.find_by_email("reader@example.com").await.unwrap();
    assert_eq!(by_email.unwrap().id, user_id);
}

#[tokio::test]
async fn test_create_rejects_duplicate_email() {
    let repo = MockUserRepository::new();

    repo.create(User::new("a@example.com", "hash")).await.unwrap();
    let result = repo.create(User::new("a@example.com", "other")).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_update_roundtrip() {
    let repo = MockUserRepository::new();
    let mut user = repo.create(User::new("a@example.com", "hash")).await.unwrap();

    user.mark_password_changed();
    repo.update(user.clone()).await.unwrap();

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.password_changed_at.is_some());
}

#[tokio::test]
async fn test_update_unknown_user_fails() {
    let repo = MockUserRepository::new();
    let result = repo.update(User::new("ghost@example.com", "hash")).await;

    assert!(result.is_err());
}
