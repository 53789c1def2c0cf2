//! Repository for the `projects` table.

use sqlx::PgPool;

use planner_core::types::EntityId;

use crate::models::project::{CreateProjectData, Project, UpdateProjectData};

/// Joined select shared across queries: every project read carries the
/// denormalized display names of its catalog references.
const SELECT: &str = "SELECT p.id, p.name, p.process_id, p.line_id, p.type_id, p.client_id,
            p.task_link, p.developer, p.creator_id, p.created_at,
            pr.name AS process_name, l.name AS line_name, t.name AS type_name,
            c.name AS client_name
     FROM projects p
     JOIN processes pr ON pr.id = p.process_id
     JOIN lines l ON l.id = p.line_id
     JOIN project_types t ON t.id = p.type_id
     LEFT JOIN clients c ON c.id = p.client_id";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row with display names.
    ///
    /// Relies on `uq_projects_name` to reject a concurrent duplicate that
    /// slipped past the synchronous uniqueness check.
    pub async fn create(pool: &PgPool, input: &CreateProjectData) -> Result<Project, sqlx::Error> {
        let (id,): (EntityId,) = sqlx::query_as(
            "INSERT INTO projects (name, process_id, line_id, type_id, client_id,
                                   task_link, developer, creator_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(&input.name)
        .bind(input.process_id)
        .bind(input.line_id)
        .bind(input.type_id)
        .bind(input.client_id)
        .bind(&input.task_link)
        .bind(&input.developer)
        .bind(input.creator_id)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Find a project by its id, with denormalized catalog names.
    pub async fn find_by_id(pool: &PgPool, id: EntityId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("{SELECT} WHERE p.id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects, most recently created first. Unscoped: any
    /// authenticated user may read any project.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("{SELECT} ORDER BY p.created_at DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Update a project. Only non-`None` fields in `input` are applied; the
    /// id, creator, and creation time never change.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: EntityId,
        input: &UpdateProjectData,
    ) -> Result<Option<Project>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET
                name = COALESCE($2, name),
                process_id = COALESCE($3, process_id),
                line_id = COALESCE($4, line_id),
                type_id = COALESCE($5, type_id),
                client_id = COALESCE($6, client_id),
                task_link = COALESCE($7, task_link),
                developer = COALESCE($8, developer)
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(input.process_id)
        .bind(input.line_id)
        .bind(input.type_id)
        .bind(input.client_id)
        .bind(&input.task_link)
        .bind(&input.developer)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    /// Delete a project. The store cascades to its traceability records.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: EntityId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Whether a project with this exact name exists (case-sensitive).
    pub async fn name_exists(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM projects WHERE name = $1)")
                .bind(name)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Whether another project (not `id`) already uses this name.
    pub async fn name_exists_excluding(
        pool: &PgPool,
        name: &str,
        id: EntityId,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM projects WHERE name = $1 AND id <> $2)")
                .bind(name)
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// Whether a project with this id exists.
    pub async fn exists(pool: &PgPool, id: EntityId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM projects WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }
}
