//! Repository for the `estimation_records` table. Append-only.

use sqlx::PgPool;

use planner_core::types::EntityId;

use crate::models::traceability::{CreateEstimation, EstimationRecord};

const COLUMNS: &str =
    "id, project_id, recorded_on, design_cp_hours, execution_hours, story_delivery_date, recorded_by";

pub struct EstimationRepo;

impl EstimationRepo {
    /// Insert an estimation record, attributed to `recorded_by`.
    pub async fn create(
        pool: &PgPool,
        project_id: EntityId,
        input: &CreateEstimation,
        recorded_by: EntityId,
    ) -> Result<EstimationRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO estimation_records
                (project_id, recorded_on, design_cp_hours, execution_hours,
                 story_delivery_date, recorded_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EstimationRecord>(&query)
            .bind(project_id)
            .bind(input.recorded_on)
            .bind(input.design_cp_hours)
            .bind(input.execution_hours)
            .bind(input.story_delivery_date)
            .bind(recorded_by)
            .fetch_one(pool)
            .await
    }

    /// List all estimation records for a project, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: EntityId,
    ) -> Result<Vec<EstimationRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM estimation_records WHERE project_id = $1 ORDER BY recorded_on"
        );
        sqlx::query_as::<_, EstimationRecord>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
