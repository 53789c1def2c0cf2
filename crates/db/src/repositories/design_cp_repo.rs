//! Repository for the `design_cp_records` table. Append-only.

use sqlx::PgPool;

use planner_core::types::EntityId;

use crate::models::traceability::{CreateDesignCp, DesignCpRecord};

const COLUMNS: &str =
    "id, project_id, recorded_on, actual_hours, start_date, end_date, recorded_by";

pub struct DesignCpRepo;

impl DesignCpRepo {
    /// Insert a test-case design record, attributed to `recorded_by`.
    pub async fn create(
        pool: &PgPool,
        project_id: EntityId,
        input: &CreateDesignCp,
        recorded_by: EntityId,
    ) -> Result<DesignCpRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO design_cp_records
                (project_id, recorded_on, actual_hours, start_date, end_date, recorded_by)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DesignCpRecord>(&query)
            .bind(project_id)
            .bind(input.recorded_on)
            .bind(input.actual_hours)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(recorded_by)
            .fetch_one(pool)
            .await
    }

    /// List all design records for a project, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: EntityId,
    ) -> Result<Vec<DesignCpRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM design_cp_records WHERE project_id = $1 ORDER BY recorded_on"
        );
        sqlx::query_as::<_, DesignCpRecord>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
