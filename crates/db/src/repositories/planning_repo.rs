//! Repository for the `planning_records` table.

use sqlx::PgPool;

use planner_core::types::EntityId;

use crate::models::traceability::{ActivityKind, CreatePlanning, PlanningRecord};

const COLUMNS: &str = "id, project_id, activity_kind, date";

/// Provides operations for planned activity dates. At most one record per
/// (project, activity kind), backed by `uq_planning_records_project_activity`.
pub struct PlanningRepo;

impl PlanningRepo {
    /// Insert a planning record for a project.
    pub async fn create(
        pool: &PgPool,
        project_id: EntityId,
        input: &CreatePlanning,
    ) -> Result<PlanningRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO planning_records (project_id, activity_kind, date)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlanningRecord>(&query)
            .bind(project_id)
            .bind(input.activity_kind)
            .bind(input.date)
            .fetch_one(pool)
            .await
    }

    /// List all planning records for a project.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: EntityId,
    ) -> Result<Vec<PlanningRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM planning_records WHERE project_id = $1 ORDER BY date");
        sqlx::query_as::<_, PlanningRecord>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Whether a record already exists for (project, activity kind).
    pub async fn exists(
        pool: &PgPool,
        project_id: EntityId,
        activity_kind: ActivityKind,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM planning_records
              WHERE project_id = $1 AND activity_kind = $2)",
        )
        .bind(project_id)
        .bind(activity_kind)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }
}
