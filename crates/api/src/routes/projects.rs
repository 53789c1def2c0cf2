//! Route definitions for the `/projects` resource.
//!
//! Also nests the project-scoped traceability routes under
//! `/projects/{project_id}/...`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{projects, traceability};
use crate::state::AppState;

/// Routes mounted at `/projects`. All require authentication.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> delete
///
/// GET    /{id}/planning         -> list_planning
/// POST   /{id}/planning         -> record_planning
/// GET    /{id}/estimations      -> list_estimations
/// POST   /{id}/estimations      -> record_estimation
/// GET    /{id}/design-cp        -> list_design_cp
/// POST   /{id}/design-cp        -> record_design_cp
/// GET    /{id}/executions       -> list_executions
/// POST   /{id}/executions       -> record_execution
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route(
            "/{id}",
            get(projects::get_by_id)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route(
            "/{id}/planning",
            get(traceability::list_planning).post(traceability::record_planning),
        )
        .route(
            "/{id}/estimations",
            get(traceability::list_estimations).post(traceability::record_estimation),
        )
        .route(
            "/{id}/design-cp",
            get(traceability::list_design_cp).post(traceability::record_design_cp),
        )
        .route(
            "/{id}/executions",
            get(traceability::list_executions).post(traceability::record_execution),
        )
}
