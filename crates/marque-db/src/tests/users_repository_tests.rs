//! User repository integration tests.

use crate::test_fixtures::TestDatabase;
use crate::{CreateUserRequest, Error, UserRepository};
use uuid::Uuid;

#[tokio::test]
async fn test_insert_and_fetch_user() {
    let test_db = TestDatabase::new().await;
    let email = format!("fetch-{}@example.com", Uuid::new_v4().simple());

    let user = test_db
        .db
        .users
        .insert(CreateUserRequest {
            email: email.clone(),
            name: Some("Test User".to_string()),
        })
        .await
        .expect("insert user");

    let fetched = test_db.db.users.fetch(user.id).await.expect("fetch user");
    assert_eq!(fetched.email, email);
    assert_eq!(fetched.name.as_deref(), Some("Test User"));
}

#[tokio::test]
async fn test_insert_rejects_duplicate_email() {
    let test_db = TestDatabase::new().await;
    let email = format!("dup-{}@example.com", Uuid::new_v4().simple());

    test_db
        .db
        .users
        .insert(CreateUserRequest {
            email: email.clone(),
            name: None,
        })
        .await
        .expect("first insert");

    // Uniqueness is case-insensitive
    let err = test_db
        .db
        .users
        .insert(CreateUserRequest {
            email: email.to_uppercase(),
            name: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn test_insert_rejects_invalid_email() {
    let test_db = TestDatabase::new().await;

    let err = test_db
        .db
        .users
        .insert(CreateUserRequest {
            email: "not-an-email".to_string(),
            name: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn test_fetch_missing_user_is_not_found() {
    let test_db = TestDatabase::new().await;

    let err = test_db.db.users.fetch(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, Error::UserNotFound(_)));
}

#[tokio::test]
async fn test_list_includes_link_counts() {
    let test_db = TestDatabase::new().await;
    let user_id = test_db.create_user("counted").await;
    test_db.create_link(user_id, "https://example.com/1", &[]).await;
    test_db.create_link(user_id, "https://example.com/2", &[]).await;

    let users = test_db.db.users.list().await.expect("list users");
    let entry = users
        .iter()
        .find(|u| u.id == user_id)
        .expect("seeded user listed");
    assert_eq!(entry.link_count, 2);
}
