//! Read-only repository over the four catalog tables.
//!
//! Catalogs have no write API; rows are seeded administratively. The table
//! name is always taken from [`CatalogKind::table`], never from user input.

use sqlx::PgPool;

use planner_core::types::EntityId;

use crate::models::catalog::{CatalogEntry, CatalogItem, CatalogKind};

/// Provides read operations for catalog entries.
pub struct CatalogRepo;

impl CatalogRepo {
    /// List all entries of one kind as `{id, name}` items, ordered by name.
    pub async fn list(pool: &PgPool, kind: CatalogKind) -> Result<Vec<CatalogItem>, sqlx::Error> {
        let query = format!("SELECT id, name FROM {} ORDER BY name", kind.table());
        sqlx::query_as::<_, CatalogItem>(&query).fetch_all(pool).await
    }

    /// Find one entry of the given kind by id.
    pub async fn find_by_id(
        pool: &PgPool,
        kind: CatalogKind,
        id: EntityId,
    ) -> Result<Option<CatalogEntry>, sqlx::Error> {
        let query = format!("SELECT id, name, is_active FROM {} WHERE id = $1", kind.table());
        sqlx::query_as::<_, CatalogEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether an entry of the given kind exists.
    pub async fn exists(pool: &PgPool, kind: CatalogKind, id: EntityId) -> Result<bool, sqlx::Error> {
        let query = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)", kind.table());
        let (exists,): (bool,) = sqlx::query_as(&query).bind(id).fetch_one(pool).await?;
        Ok(exists)
    }

    /// Insert an entry. Not exposed through the API; used by seeds and tests.
    pub async fn create(
        pool: &PgPool,
        kind: CatalogKind,
        name: &str,
    ) -> Result<CatalogEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (name) VALUES ($1) RETURNING id, name, is_active",
            kind.table()
        );
        sqlx::query_as::<_, CatalogEntry>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Delete an entry, cascading to dependent projects. Administrative only.
    pub async fn delete(pool: &PgPool, kind: CatalogKind, id: EntityId) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&query).bind(id).execute(pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
