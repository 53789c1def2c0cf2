//! Route definitions for login and token refresh.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at the API root.
///
/// ```text
/// POST /login          -> login
/// POST /login/refresh  -> refresh
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/login/refresh", post(auth::refresh))
}
