//! Handlers for the `/projects` resource.
//!
//! All field validation is aggregated into one [`FieldErrors`] collection per
//! request so a single bad POST reports every failing field. Catalog
//! references arrive as strings and are parsed here, which keeps malformed
//! ids field-scoped instead of failing body deserialization wholesale.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use planner_core::error::CoreError;
use planner_core::types::EntityId;
use planner_core::validation::{self, FieldErrors};
use planner_db::models::catalog::CatalogKind;
use planner_db::models::project::{CreateProjectData, Project, UpdateProjectData};
use planner_db::repositories::{CatalogRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/projects`. There is deliberately no `creator`
/// field: the creator is always the authenticated caller.
///
/// Required fields deserialize as `Option` so an absent key becomes a
/// `This field is required.` entry in the 400 body rather than a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    pub process: Option<String>,
    pub line: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    pub client: Option<String>,
    pub task_link: Option<String>,
    pub developer: Option<String>,
}

/// Request body for `PUT /api/projects/{id}`. All fields are optional; absent
/// fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub process: Option<String>,
    pub line: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    pub client: Option<String>,
    pub task_link: Option<String>,
    pub developer: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let mut errors = FieldErrors::new();

    // Presence first, then synchronous field checks, in a fixed order.
    let name = validation::require_field(&mut errors, "name", input.name.as_deref());
    let process = validation::require_field(&mut errors, "process", input.process.as_deref());
    let line = validation::require_field(&mut errors, "line", input.line.as_deref());
    let project_type =
        validation::require_field(&mut errors, "type", input.project_type.as_deref());
    let task_link = validation::require_field(&mut errors, "task_link", input.task_link.as_deref());
    let developer = validation::require_field(&mut errors, "developer", input.developer.as_deref());

    if let Some(name) = name {
        validation::validate_project_name(&mut errors, name);
    }
    if let Some(developer) = developer {
        validation::validate_developer(&mut errors, developer);
    }
    if let Some(task_link) = task_link {
        validation::validate_task_link(&mut errors, task_link);
    }

    // Store-backed uniqueness check. The insert below still races behind
    // uq_projects_name; the error layer maps that to the same message.
    let name = name.map(|n| n.trim().to_string());
    if let Some(name) = &name {
        if errors.get("name").is_none() && ProjectRepo::name_exists(&state.pool, name).await? {
            errors.push("name", "A project with this name already exists.");
        }
    }

    // Catalog references: parse, then resolve against the matching kind.
    let process_id = match process {
        Some(p) => {
            resolve_catalog_ref(&state, &mut errors, "process", CatalogKind::Process, p).await?
        }
        None => None,
    };
    let line_id = match line {
        Some(l) => resolve_catalog_ref(&state, &mut errors, "line", CatalogKind::Line, l).await?,
        None => None,
    };
    let type_id = match project_type {
        Some(t) => resolve_catalog_ref(&state, &mut errors, "type", CatalogKind::Type, t).await?,
        None => None,
    };
    let client_id = match &input.client {
        Some(client) => {
            resolve_catalog_ref(&state, &mut errors, "client", CatalogKind::Client, client).await?
        }
        None => None,
    };

    errors.into_result()?;

    // Every None above comes with a recorded field error, so after
    // into_result all required values are present.
    let (Some(name), Some(process_id), Some(line_id), Some(type_id), Some(task_link), Some(developer)) =
        (name, process_id, line_id, type_id, input.task_link, input.developer)
    else {
        return Err(AppError::InternalError(
            "required field missing after validation".into(),
        ));
    };

    let data = CreateProjectData {
        name,
        process_id,
        line_id,
        type_id,
        client_id,
        task_link,
        developer,
        creator_id: auth.user_id,
    };

    let project = ProjectRepo::create(&state.pool, &data).await?;
    tracing::info!(project_id = %project.id, creator = %auth.user_id, "project created");

    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/projects
pub async fn list(State(state): State<AppState>, _auth: AuthUser) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<EntityId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// PUT /api/projects/{id}
///
/// Partial update; id, creator, and creation time are immutable.
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<EntityId>,
    Json(input): Json<UpdateProjectRequest>,
) -> AppResult<Json<Project>> {
    if !ProjectRepo::exists(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }

    let mut errors = FieldErrors::new();
    let mut data = UpdateProjectData::default();

    if let Some(name) = &input.name {
        validation::validate_project_name(&mut errors, name);
        let name = name.trim().to_string();
        if errors.get("name").is_none()
            && ProjectRepo::name_exists_excluding(&state.pool, &name, id).await?
        {
            errors.push("name", "A project with this name already exists.");
        }
        data.name = Some(name);
    }
    if let Some(developer) = &input.developer {
        validation::validate_developer(&mut errors, developer);
        data.developer = Some(developer.clone());
    }
    if let Some(task_link) = &input.task_link {
        validation::validate_task_link(&mut errors, task_link);
        data.task_link = Some(task_link.clone());
    }
    if let Some(process) = &input.process {
        data.process_id =
            resolve_catalog_ref(&state, &mut errors, "process", CatalogKind::Process, process)
                .await?;
    }
    if let Some(line) = &input.line {
        data.line_id =
            resolve_catalog_ref(&state, &mut errors, "line", CatalogKind::Line, line).await?;
    }
    if let Some(project_type) = &input.project_type {
        data.type_id =
            resolve_catalog_ref(&state, &mut errors, "type", CatalogKind::Type, project_type)
                .await?;
    }
    if let Some(client) = &input.client {
        data.client_id =
            resolve_catalog_ref(&state, &mut errors, "client", CatalogKind::Client, client).await?;
    }

    errors.into_result()?;

    let project = ProjectRepo::update(&state.pool, id, &data)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// DELETE /api/projects/{id}
///
/// Removes the project; the store cascades to its traceability records.
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<EntityId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a catalog reference and resolve it against its kind's table.
///
/// A malformed id records `Invalid id.` on the field; a well-formed id with
/// no matching row records `The related object does not exist.`. Returns the
/// id only when it resolved cleanly.
async fn resolve_catalog_ref(
    state: &AppState,
    errors: &mut FieldErrors,
    field: &str,
    kind: CatalogKind,
    raw: &str,
) -> Result<Option<EntityId>, AppError> {
    let Ok(id) = raw.parse::<Uuid>() else {
        errors.push(field, "Invalid id.");
        return Ok(None);
    };

    if !CatalogRepo::exists(&state.pool, kind, id).await? {
        errors.push(field, "The related object does not exist.");
        return Ok(None);
    }

    Ok(Some(id))
}
