//! Traceability record models: one planning table plus three append-only
//! activity record tables, all owned by a project.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use planner_core::types::EntityId;

/// Activity kinds a planning record can reference. Stored as snake_case text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
pub enum ActivityKind {
    Estimation,
    DesignCp,
    Execution,
    Finished,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Estimation => "estimation",
            ActivityKind::DesignCp => "design_cp",
            ActivityKind::Execution => "execution",
            ActivityKind::Finished => "finished",
        }
    }
}

/// A planned activity date for a project. At most one per
/// (project, activity kind).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlanningRecord {
    pub id: EntityId,
    #[serde(rename = "project")]
    pub project_id: EntityId,
    pub activity_kind: ActivityKind,
    pub date: NaiveDate,
}

/// Input for recording a planned activity date.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlanning {
    pub activity_kind: ActivityKind,
    pub date: NaiveDate,
}

/// Estimated effort for a project, recorded once estimation happens.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EstimationRecord {
    pub id: EntityId,
    #[serde(rename = "project")]
    pub project_id: EntityId,
    pub recorded_on: NaiveDate,
    pub design_cp_hours: Decimal,
    pub execution_hours: Decimal,
    pub story_delivery_date: NaiveDate,
    pub recorded_by: EntityId,
}

/// Input for recording an estimation. `recorded_by` is always the acting user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEstimation {
    pub recorded_on: NaiveDate,
    pub design_cp_hours: Decimal,
    pub execution_hours: Decimal,
    pub story_delivery_date: NaiveDate,
}

/// Actual effort spent on test-case design.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DesignCpRecord {
    pub id: EntityId,
    #[serde(rename = "project")]
    pub project_id: EntityId,
    pub recorded_on: NaiveDate,
    pub actual_hours: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub recorded_by: EntityId,
}

/// Input for recording test-case design effort.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDesignCp {
    pub recorded_on: NaiveDate,
    pub actual_hours: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Actual effort spent on one execution iteration (1-3).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExecutionRecord {
    pub id: EntityId,
    #[serde(rename = "project")]
    pub project_id: EntityId,
    pub recorded_on: NaiveDate,
    pub iteration: i16,
    pub actual_hours: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub recorded_by: EntityId,
}

/// Input for recording execution effort.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExecution {
    pub recorded_on: NaiveDate,
    pub iteration: i16,
    pub actual_hours: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
