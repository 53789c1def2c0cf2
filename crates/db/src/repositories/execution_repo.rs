//! Repository for the `execution_records` table. Append-only.

use sqlx::PgPool;

use planner_core::types::EntityId;

use crate::models::traceability::{CreateExecution, ExecutionRecord};

const COLUMNS: &str =
    "id, project_id, recorded_on, iteration, actual_hours, start_date, end_date, recorded_by";

pub struct ExecutionRepo;

impl ExecutionRepo {
    /// Insert an execution record, attributed to `recorded_by`. The iteration
    /// was validated upstream; a CHECK constraint backs it in the store.
    pub async fn create(
        pool: &PgPool,
        project_id: EntityId,
        input: &CreateExecution,
        recorded_by: EntityId,
    ) -> Result<ExecutionRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO execution_records
                (project_id, recorded_on, iteration, actual_hours, start_date, end_date, recorded_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExecutionRecord>(&query)
            .bind(project_id)
            .bind(input.recorded_on)
            .bind(input.iteration)
            .bind(input.actual_hours)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(recorded_by)
            .fetch_one(pool)
            .await
    }

    /// List all execution records for a project, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: EntityId,
    ) -> Result<Vec<ExecutionRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM execution_records WHERE project_id = $1 ORDER BY recorded_on"
        );
        sqlx::query_as::<_, ExecutionRecord>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
