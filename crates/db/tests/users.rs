//! Integration tests for the user store:
//! - Create and lookup (by id and by username)
//! - Username/email uniqueness, including the update-excluding-self check
//! - Partial update and the separate password path
//! - Delete

use sqlx::PgPool;

use planner_db::models::user::{CreateUserData, UpdateUserData};
use planner_db::repositories::UserRepo;
use planner_db::unique_violation_constraint;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(username: &str, email: &str) -> CreateUserData {
    CreateUserData {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        username: username.to_string(),
        email: email.to_string(),
        role: "Tester".to_string(),
        position: "QA Analyst".to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$testsalt$testhash".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_lookup(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("jdoe", "jdoe@example.com"))
        .await
        .unwrap();

    assert_eq!(user.username, "jdoe");
    assert!(user.is_active); // active by default
    assert!(!user.is_staff);

    let by_id = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "jdoe@example.com");

    let by_name = UserRepo::find_by_username(&pool, "jdoe")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_name.id, user.id);

    assert!(UserRepo::find_by_username(&pool, "nobody")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_username_and_email(pool: PgPool) {
    UserRepo::create(&pool, &new_user("jdoe", "jdoe@example.com"))
        .await
        .unwrap();

    let err = UserRepo::create(&pool, &new_user("jdoe", "other@example.com"))
        .await
        .unwrap_err();
    assert_eq!(
        unique_violation_constraint(&err).as_deref(),
        Some("uq_users_username")
    );

    let err = UserRepo::create(&pool, &new_user("other", "jdoe@example.com"))
        .await
        .unwrap_err();
    assert_eq!(
        unique_violation_constraint(&err).as_deref(),
        Some("uq_users_email")
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_uniqueness_checks_exclude_self(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("jdoe", "jdoe@example.com"))
        .await
        .unwrap();

    assert!(UserRepo::username_exists(&pool, "jdoe", None).await.unwrap());
    // An update keeping the same username must not see itself as a conflict.
    assert!(!UserRepo::username_exists(&pool, "jdoe", Some(user.id))
        .await
        .unwrap());
    assert!(
        !UserRepo::email_exists(&pool, "jdoe@example.com", Some(user.id))
            .await
            .unwrap()
    );
    assert!(UserRepo::email_exists(&pool, "jdoe@example.com", None)
        .await
        .unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_partial_update(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("jdoe", "jdoe@example.com"))
        .await
        .unwrap();

    let updated = UserRepo::update(
        &pool,
        user.id,
        &UpdateUserData {
            role: Some("Lead".to_string()),
            is_staff: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(updated.role, "Lead");
    assert!(updated.is_staff);
    // Untouched fields survive.
    assert_eq!(updated.username, "jdoe");
    assert_eq!(updated.password_hash, user.password_hash);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_password_update_is_separate(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("jdoe", "jdoe@example.com"))
        .await
        .unwrap();

    let changed = UserRepo::update_password(&pool, user.id, "$argon2id$new-hash")
        .await
        .unwrap();
    assert!(changed);

    let fetched = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(fetched.password_hash, "$argon2id$new-hash");
    // Everything else untouched.
    assert_eq!(fetched.username, user.username);

    assert!(
        !UserRepo::update_password(&pool, uuid::Uuid::new_v4(), "$argon2id$x")
            .await
            .unwrap()
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_user(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("jdoe", "jdoe@example.com"))
        .await
        .unwrap();

    assert!(UserRepo::delete(&pool, user.id).await.unwrap());
    assert!(UserRepo::find_by_id(&pool, user.id).await.unwrap().is_none());
    assert!(!UserRepo::delete(&pool, user.id).await.unwrap());
}
