use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use planner_core::error::CoreError;
use planner_core::validation::FieldErrors;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses:
/// field-scoped validation failures serialize as `{"field": ["message"]}`,
/// everything else as `{"error": ..., "code": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `planner_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message (login failures).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A missing resource without a typed entity/id pair (route-level 404s).
    #[error("Not found: {0}")]
    NotFound(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                // Field-scoped body, not the {error, code} envelope.
                CoreError::Validation(errors) => {
                    return (StatusCode::BAD_REQUEST, axum::Json(errors)).into_response();
                }
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => {
                // A unique violation on a known constraint is the race twin
                // of the synchronous duplicate check: re-report it as the
                // same field-scoped validation error.
                if let Some(constraint) = planner_db::unique_violation_constraint(&err) {
                    if let Some((field, message)) = duplicate_field_for_constraint(&constraint) {
                        return (
                            StatusCode::BAD_REQUEST,
                            axum::Json(FieldErrors::single(field, message)),
                        )
                            .into_response();
                    }
                }
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a `uq_*` constraint name to the duplicated field and its message.
fn duplicate_field_for_constraint(constraint: &str) -> Option<(&'static str, &'static str)> {
    match constraint {
        "uq_projects_name" => Some(("name", "A project with this name already exists.")),
        "uq_users_username" => Some(("username", "This username is already in use.")),
        "uq_users_email" => Some(("email", "This email address is already in use.")),
        "uq_planning_records_project_activity" => Some((
            "activity_kind",
            "A planning record for this activity already exists for the project.",
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_constraints_map_to_fields() {
        assert_eq!(
            duplicate_field_for_constraint("uq_projects_name").map(|(f, _)| f),
            Some("name")
        );
        assert_eq!(
            duplicate_field_for_constraint("uq_users_email").map(|(f, _)| f),
            Some("email")
        );
        assert!(duplicate_field_for_constraint("pk_projects").is_none());
    }
}
