//! Handlers for login and token refresh.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use planner_db::repositories::UserRepo;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, validate_token, TokenType};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `POST /api/login/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Token pair returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Constant-shape login failure: the response never reveals whether the
/// username was unknown, the password wrong, or the account disabled.
fn invalid_credentials() -> AppError {
    AppError::BadRequest("Incorrect credentials".into())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/login
///
/// Authenticate with username + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<TokenPair>> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !user.is_active {
        return Err(invalid_credentials());
    }

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(invalid_credentials());
    }

    tracing::info!(user_id = %user.id, "user logged in");
    Ok(Json(issue_token_pair(&state, user.id)?))
}

/// POST /api/login/refresh
///
/// Exchange a valid refresh token for a new access + refresh pair.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<TokenPair>> {
    let claims =
        validate_token(&input.refresh, &state.config.jwt).map_err(|_| invalid_credentials())?;

    if claims.token_type != TokenType::Refresh {
        return Err(invalid_credentials());
    }

    // The user must still exist and be active.
    let user = UserRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(invalid_credentials)?;

    Ok(Json(issue_token_pair(&state, user.id)?))
}

/// Generate a fresh access + refresh token pair for a user.
fn issue_token_pair(state: &AppState, user_id: planner_core::types::EntityId) -> AppResult<TokenPair> {
    let access = generate_access_token(user_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let refresh = generate_refresh_token(user_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(TokenPair { access, refresh })
}
