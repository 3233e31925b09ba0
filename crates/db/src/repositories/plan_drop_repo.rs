//! Repository for the `drops` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::plan_drop::{CreatePlanDrop, PlanDrop, UpdatePlanDrop};

const COLUMNS: &str = "id, collection_plan_id, name, drop_number, launch_date, end_date, \
    channels, description, created_at, updated_at";

/// Provides CRUD operations for drops.
pub struct PlanDropRepo;

impl PlanDropRepo {
    pub async fn create(pool: &PgPool, input: &CreatePlanDrop) -> Result<PlanDrop, sqlx::Error> {
        let query = format!(
            "INSERT INTO drops (collection_plan_id, name, drop_number, launch_date, end_date,
                                channels, description)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, '{{}}'::TEXT[]), $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlanDrop>(&query)
            .bind(input.collection_plan_id)
            .bind(&input.name)
            .bind(input.drop_number)
            .bind(input.launch_date)
            .bind(input.end_date)
            .bind(&input.channels)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PlanDrop>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM drops WHERE id = $1");
        sqlx::query_as::<_, PlanDrop>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List drops by launch date, optionally restricted to one plan.
    pub async fn list(
        pool: &PgPool,
        collection_plan_id: Option<DbId>,
    ) -> Result<Vec<PlanDrop>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM drops
             WHERE ($1::BIGINT IS NULL OR collection_plan_id = $1)
             ORDER BY launch_date, id"
        );
        sqlx::query_as::<_, PlanDrop>(&query)
            .bind(collection_plan_id)
            .fetch_all(pool)
            .await
    }

    /// Update a drop. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePlanDrop,
    ) -> Result<Option<PlanDrop>, sqlx::Error> {
        let query = format!(
            "UPDATE drops SET
                name = COALESCE($2, name),
                drop_number = COALESCE($3, drop_number),
                launch_date = COALESCE($4, launch_date),
                end_date = COALESCE($5, end_date),
                channels = COALESCE($6, channels),
                description = COALESCE($7, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlanDrop>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.drop_number)
            .bind(input.launch_date)
            .bind(input.end_date)
            .bind(&input.channels)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a drop. SKUs pointing at it are detached, not deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drops WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
