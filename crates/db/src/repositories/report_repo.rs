//! Repository for the `reports` table.

use atelier_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::report::{CreateReport, Report};

const COLUMNS: &str = "id, collection_plan_id, owner_id, title, report_type, content, created_at";

/// Provides create/read/delete operations for report snapshots, scoped to
/// the owner.
pub struct ReportRepo;

impl ReportRepo {
    pub async fn create(pool: &PgPool, input: &CreateReport) -> Result<Report, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports (collection_plan_id, owner_id, title, report_type, content)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(input.collection_plan_id)
            .bind(input.owner_id)
            .bind(&input.title)
            .bind(&input.report_type)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: UserId,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// Newest first, optionally restricted to one plan.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: UserId,
        collection_plan_id: Option<DbId>,
    ) -> Result<Vec<Report>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports
             WHERE owner_id = $1 AND ($2::BIGINT IS NULL OR collection_plan_id = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(owner_id)
            .bind(collection_plan_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId, owner_id: UserId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
