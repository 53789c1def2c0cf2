//! Handlers for the `/users` resource.
//!
//! The generic update path never carries a password; password changes go
//! through the dedicated, re-validated `PUT /api/users/{id}/password`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use planner_core::error::CoreError;
use planner_core::types::EntityId;
use planner_core::validation::{self, FieldErrors, USER_FIELD_MAX_LEN};
use planner_db::models::user::{CreateUserData, UpdateUserData, UserResponse};
use planner_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/users`.
///
/// Required fields deserialize as `Option` so an absent key becomes a
/// `This field is required.` entry in the 400 body rather than a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub position: Option<String>,
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

/// Request body for `PUT /api/users/{id}`. All fields optional, no password.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub position: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
}

/// Request body for `PUT /api/users/{id}/password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: Option<String>,
    pub confirm_password: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/users
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let mut errors = FieldErrors::new();

    let first_name =
        validation::require_field(&mut errors, "first_name", input.first_name.as_deref());
    let last_name = validation::require_field(&mut errors, "last_name", input.last_name.as_deref());
    let username = validation::require_field(&mut errors, "username", input.username.as_deref());
    let email = validation::require_field(&mut errors, "email", input.email.as_deref());
    let role = validation::require_field(&mut errors, "role", input.role.as_deref());
    let position = validation::require_field(&mut errors, "position", input.position.as_deref());
    let password = validation::require_field(&mut errors, "password", input.password.as_deref());
    let confirm_password =
        validation::require_field(&mut errors, "confirm_password", input.confirm_password.as_deref());

    if let Some(first_name) = first_name {
        validation::validate_required_text(&mut errors, "first_name", first_name, USER_FIELD_MAX_LEN);
    }
    if let Some(last_name) = last_name {
        validation::validate_required_text(&mut errors, "last_name", last_name, USER_FIELD_MAX_LEN);
    }
    if let Some(username) = username {
        validation::validate_required_text(&mut errors, "username", username, USER_FIELD_MAX_LEN);
    }
    if let Some(email) = email {
        validation::validate_email_format(&mut errors, email);
    }
    if let Some(role) = role {
        validation::validate_required_text(&mut errors, "role", role, USER_FIELD_MAX_LEN);
    }
    if let Some(position) = position {
        validation::validate_required_text(&mut errors, "position", position, USER_FIELD_MAX_LEN);
    }
    if let Some(password) = password {
        validation::validate_password(&mut errors, password);
    }
    if let (Some(password), Some(confirm)) = (password, confirm_password) {
        validation::validate_password_confirmation(&mut errors, password, confirm);
    }

    // Store-backed uniqueness checks; uq_users_* still backs the race.
    if let Some(username) = username {
        if errors.get("username").is_none()
            && UserRepo::username_exists(&state.pool, username, None).await?
        {
            errors.push("username", "This username is already in use.");
        }
    }
    if let Some(email) = email {
        if errors.get("email").is_none() && UserRepo::email_exists(&state.pool, email, None).await? {
            errors.push("email", "This email address is already in use.");
        }
    }

    errors.into_result()?;

    // Every None above comes with a recorded field error, so after
    // into_result all required values are present.
    let (
        Some(first_name),
        Some(last_name),
        Some(username),
        Some(email),
        Some(role),
        Some(position),
        Some(password),
    ) = (
        input.first_name,
        input.last_name,
        input.username,
        input.email,
        input.role,
        input.position,
        input.password,
    )
    else {
        return Err(AppError::InternalError(
            "required field missing after validation".into(),
        ));
    };

    // Hash the password; the confirmation is discarded here.
    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let data = CreateUserData {
        first_name,
        last_name,
        username,
        email,
        role,
        position,
        password_hash,
    };

    let user = UserRepo::create(&state.pool, &data).await?;
    tracing::info!(user_id = %user.id, "user created");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/users
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<EntityId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user.into()))
}

/// PUT /api/users/{id}
///
/// Partial update. Uniqueness re-checks exclude the user being updated.
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    if UserRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound { entity: "User", id }));
    }

    let mut errors = FieldErrors::new();

    if let Some(first_name) = &input.first_name {
        validation::validate_required_text(&mut errors, "first_name", first_name, USER_FIELD_MAX_LEN);
    }
    if let Some(last_name) = &input.last_name {
        validation::validate_required_text(&mut errors, "last_name", last_name, USER_FIELD_MAX_LEN);
    }
    if let Some(username) = &input.username {
        validation::validate_required_text(&mut errors, "username", username, USER_FIELD_MAX_LEN);
        if errors.get("username").is_none()
            && UserRepo::username_exists(&state.pool, username, Some(id)).await?
        {
            errors.push("username", "This username is already in use.");
        }
    }
    if let Some(email) = &input.email {
        validation::validate_email_format(&mut errors, email);
        if errors.get("email").is_none()
            && UserRepo::email_exists(&state.pool, email, Some(id)).await?
        {
            errors.push("email", "This email address is already in use.");
        }
    }
    if let Some(role) = &input.role {
        validation::validate_required_text(&mut errors, "role", role, USER_FIELD_MAX_LEN);
    }
    if let Some(position) = &input.position {
        validation::validate_required_text(&mut errors, "position", position, USER_FIELD_MAX_LEN);
    }

    errors.into_result()?;

    let data = UpdateUserData {
        first_name: input.first_name,
        last_name: input.last_name,
        username: input.username,
        email: input.email,
        role: input.role,
        position: input.position,
        is_active: input.is_active,
        is_staff: input.is_staff,
    };

    let user = UserRepo::update(&state.pool, id, &data)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user.into()))
}

/// PUT /api/users/{id}/password
///
/// The distinct password change path; the full policy is re-applied.
pub async fn change_password(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<EntityId>,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let mut errors = FieldErrors::new();
    let password = validation::require_field(&mut errors, "password", input.password.as_deref());
    let confirm_password =
        validation::require_field(&mut errors, "confirm_password", input.confirm_password.as_deref());
    if let Some(password) = password {
        validation::validate_password(&mut errors, password);
    }
    if let (Some(password), Some(confirm)) = (password, confirm_password) {
        validation::validate_password_confirmation(&mut errors, password, confirm);
    }
    errors.into_result()?;

    let Some(password) = input.password else {
        return Err(AppError::InternalError(
            "required field missing after validation".into(),
        ));
    };
    let password_hash = hash_password(&password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::update_password(&state.pool, id, &password_hash).await?;
    if updated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}

/// DELETE /api/users/{id}
///
/// Removes the user; the store cascades to projects they created.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let deleted = UserRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "User", id }))
    }
}
