//! Handlers for the traceability records nested under a project.
//!
//! Records are immutable once written: the only routes are list and record,
//! and rows disappear solely through project cascade deletion.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use planner_core::error::CoreError;
use planner_core::types::EntityId;
use planner_core::validation::{self, FieldErrors};
use planner_db::models::traceability::{
    CreateDesignCp, CreateEstimation, CreateExecution, CreatePlanning, DesignCpRecord,
    EstimationRecord, ExecutionRecord, PlanningRecord,
};
use planner_db::repositories::{
    DesignCpRepo, EstimationRepo, ExecutionRepo, PlanningRepo, ProjectRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// 404 unless the project exists.
async fn require_project(state: &AppState, id: EntityId) -> Result<(), AppError> {
    if ProjectRepo::exists(&state.pool, id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// GET /api/projects/{id}/planning
pub async fn list_planning(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(project_id): Path<EntityId>,
) -> AppResult<Json<Vec<PlanningRecord>>> {
    require_project(&state, project_id).await?;
    let records = PlanningRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(records))
}

/// POST /api/projects/{id}/planning
///
/// At most one record per (project, activity kind); the duplicate pre-check
/// races behind `uq_planning_records_project_activity`, and the error layer
/// maps a constraint hit to the same duplicate message.
pub async fn record_planning(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(project_id): Path<EntityId>,
    Json(input): Json<CreatePlanning>,
) -> AppResult<(StatusCode, Json<PlanningRecord>)> {
    require_project(&state, project_id).await?;

    if PlanningRepo::exists(&state.pool, project_id, input.activity_kind).await? {
        return Err(AppError::Core(CoreError::Validation(FieldErrors::single(
            "activity_kind",
            "A planning record for this activity already exists for the project.",
        ))));
    }

    let record = PlanningRepo::create(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

// ---------------------------------------------------------------------------
// Estimation
// ---------------------------------------------------------------------------

/// GET /api/projects/{id}/estimations
pub async fn list_estimations(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(project_id): Path<EntityId>,
) -> AppResult<Json<Vec<EstimationRecord>>> {
    require_project(&state, project_id).await?;
    let records = EstimationRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(records))
}

/// POST /api/projects/{id}/estimations
///
/// Append-only; `recorded_by` is always the acting user.
pub async fn record_estimation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<EntityId>,
    Json(input): Json<CreateEstimation>,
) -> AppResult<(StatusCode, Json<EstimationRecord>)> {
    require_project(&state, project_id).await?;
    let record = EstimationRepo::create(&state.pool, project_id, &input, auth.user_id).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

// ---------------------------------------------------------------------------
// Design CP
// ---------------------------------------------------------------------------

/// GET /api/projects/{id}/design-cp
pub async fn list_design_cp(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(project_id): Path<EntityId>,
) -> AppResult<Json<Vec<DesignCpRecord>>> {
    require_project(&state, project_id).await?;
    let records = DesignCpRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(records))
}

/// POST /api/projects/{id}/design-cp
pub async fn record_design_cp(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<EntityId>,
    Json(input): Json<CreateDesignCp>,
) -> AppResult<(StatusCode, Json<DesignCpRecord>)> {
    require_project(&state, project_id).await?;
    let record = DesignCpRepo::create(&state.pool, project_id, &input, auth.user_id).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// GET /api/projects/{id}/executions
pub async fn list_executions(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(project_id): Path<EntityId>,
) -> AppResult<Json<Vec<ExecutionRecord>>> {
    require_project(&state, project_id).await?;
    let records = ExecutionRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(records))
}

/// POST /api/projects/{id}/executions
///
/// Append-only; validates the iteration is 1, 2, or 3.
pub async fn record_execution(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(project_id): Path<EntityId>,
    Json(input): Json<CreateExecution>,
) -> AppResult<(StatusCode, Json<ExecutionRecord>)> {
    require_project(&state, project_id).await?;

    let mut errors = FieldErrors::new();
    validation::validate_iteration(&mut errors, input.iteration);
    errors.into_result()?;

    let record = ExecutionRepo::create(&state.pool, project_id, &input, auth.user_id).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
