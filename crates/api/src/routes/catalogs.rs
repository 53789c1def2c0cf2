//! Route definitions for the read-only `/catalogs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalogs;
use crate::state::AppState;

/// Routes mounted at `/catalogs`. All public.
///
/// ```text
/// GET /              -> combined
/// GET /{kind}        -> list_kind
/// GET /{kind}/{id}   -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalogs::combined))
        .route("/{kind}", get(catalogs::list_kind))
        .route("/{kind}/{id}", get(catalogs::get_by_id))
}
