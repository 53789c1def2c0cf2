//! Project entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use planner_core::types::{EntityId, Timestamp};

/// A project row joined with the display names of its catalog references.
///
/// Serialized field names mirror the API contract: raw reference ids under
/// `process`/`line`/`type`/`client`/`creator`, denormalized display names
/// under `*_name`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "process")]
    pub process_id: EntityId,
    #[serde(rename = "line")]
    pub line_id: EntityId,
    #[serde(rename = "type")]
    pub type_id: EntityId,
    #[serde(rename = "client")]
    pub client_id: Option<EntityId>,
    pub task_link: String,
    pub developer: String,
    #[serde(rename = "creator")]
    pub creator_id: EntityId,
    pub created_at: Timestamp,
    pub process_name: String,
    pub line_name: String,
    pub type_name: String,
    pub client_name: Option<String>,
}

/// Validated data for inserting a project. Catalog references are already
/// parsed and resolved; `creator_id` is always the acting user.
#[derive(Debug, Clone)]
pub struct CreateProjectData {
    pub name: String,
    pub process_id: EntityId,
    pub line_id: EntityId,
    pub type_id: EntityId,
    pub client_id: Option<EntityId>,
    pub task_link: String,
    pub developer: String,
    pub creator_id: EntityId,
}

/// Validated partial update. `None` fields are left unchanged; the id,
/// creator, and creation time are immutable.
#[derive(Debug, Clone, Default)]
pub struct UpdateProjectData {
    pub name: Option<String>,
    pub process_id: Option<EntityId>,
    pub line_id: Option<EntityId>,
    pub type_id: Option<EntityId>,
    pub client_id: Option<EntityId>,
    pub task_link: Option<String>,
    pub developer: Option<String>,
}
