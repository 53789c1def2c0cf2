//! Handlers for the read-only `/catalogs` resource.
//!
//! Catalogs are seeded administratively; the API only exposes reads, and
//! they are the one resource readable without authentication.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use planner_core::error::CoreError;
use planner_db::models::catalog::{CatalogEntry, CatalogItem, CatalogKind};
use planner_db::repositories::CatalogRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Combined listing of all four catalogs.
#[derive(Debug, Serialize)]
pub struct CatalogOverview {
    pub processes: Vec<CatalogItem>,
    pub lines: Vec<CatalogItem>,
    pub clients: Vec<CatalogItem>,
    pub types: Vec<CatalogItem>,
}

/// GET /api/catalogs
///
/// All four catalogs in one response, each entry as `{id, name}`.
pub async fn combined(State(state): State<AppState>) -> AppResult<Json<CatalogOverview>> {
    let processes = CatalogRepo::list(&state.pool, CatalogKind::Process).await?;
    let lines = CatalogRepo::list(&state.pool, CatalogKind::Line).await?;
    let clients = CatalogRepo::list(&state.pool, CatalogKind::Client).await?;
    let types = CatalogRepo::list(&state.pool, CatalogKind::Type).await?;

    Ok(Json(CatalogOverview {
        processes,
        lines,
        clients,
        types,
    }))
}

/// GET /api/catalogs/{kind}
pub async fn list_kind(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<Json<Vec<CatalogItem>>> {
    let kind = parse_kind(&kind)?;
    let items = CatalogRepo::list(&state.pool, kind).await?;
    Ok(Json(items))
}

/// GET /api/catalogs/{kind}/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, Uuid)>,
) -> AppResult<Json<CatalogEntry>> {
    let kind = parse_kind(&kind)?;
    let entry = CatalogRepo::find_by_id(&state.pool, kind, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: kind.entity_name(),
            id,
        }))?;
    Ok(Json(entry))
}

/// Unknown catalog kinds are a 404, not a validation failure.
fn parse_kind(segment: &str) -> Result<CatalogKind, AppError> {
    CatalogKind::from_path_segment(segment)
        .ok_or_else(|| AppError::NotFound(format!("Unknown catalog kind: {segment}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_segments_parse() {
        assert!(parse_kind("processes").is_ok());
        assert!(parse_kind("types").is_ok());
        assert!(parse_kind("widgets").is_err());
    }
}
