//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use planner_core::types::{EntityId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub position: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub password_hash: String,
    pub created_at: Timestamp,
}

/// Safe user representation for API responses (no password fields).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub position: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            username: user.username,
            email: user.email,
            role: user.role,
            position: user.position,
            is_active: user.is_active,
            is_staff: user.is_staff,
            created_at: user.created_at,
        }
    }
}

/// Validated data for inserting a user. The password has already been
/// policy-checked and hashed; the confirmation was discarded.
#[derive(Debug, Clone)]
pub struct CreateUserData {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub position: String,
    pub password_hash: String,
}

/// Validated partial update. The generic path never carries a password;
/// password changes go through [`crate::repositories::UserRepo::update_password`].
#[derive(Debug, Clone, Default)]
pub struct UpdateUserData {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub position: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
}
