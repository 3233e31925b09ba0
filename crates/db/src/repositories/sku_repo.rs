//! Repository for the `skus` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::sku::{CreateSku, Sku, UpdateSku};

const COLUMNS: &str = "id, collection_plan_id, drop_id, name, reference, family, category, \
    color, pvp, cost, margin, units, channel, launch_date, created_at, updated_at";

/// Provides CRUD operations for SKUs.
pub struct SkuRepo;

impl SkuRepo {
    /// Insert a new SKU, returning the created row.
    ///
    /// The caller is responsible for filling in `margin` when it was omitted.
    pub async fn create(pool: &PgPool, input: &CreateSku) -> Result<Sku, sqlx::Error> {
        let query = format!(
            "INSERT INTO skus (collection_plan_id, drop_id, name, reference, family, category,
                               color, pvp, cost, margin, units, channel, launch_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, COALESCE($11, 0), $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sku>(&query)
            .bind(input.collection_plan_id)
            .bind(input.drop_id)
            .bind(&input.name)
            .bind(&input.reference)
            .bind(&input.family)
            .bind(&input.category)
            .bind(&input.color)
            .bind(input.pvp)
            .bind(input.cost)
            .bind(input.margin)
            .bind(input.units)
            .bind(&input.channel)
            .bind(input.launch_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sku>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skus WHERE id = $1");
        sqlx::query_as::<_, Sku>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List SKUs, optionally restricted to one plan, in creation order.
    pub async fn list(
        pool: &PgPool,
        collection_plan_id: Option<DbId>,
    ) -> Result<Vec<Sku>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM skus
             WHERE ($1::BIGINT IS NULL OR collection_plan_id = $1)
             ORDER BY id"
        );
        sqlx::query_as::<_, Sku>(&query)
            .bind(collection_plan_id)
            .fetch_all(pool)
            .await
    }

    /// Update a SKU. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSku,
    ) -> Result<Option<Sku>, sqlx::Error> {
        let query = format!(
            "UPDATE skus SET
                drop_id = COALESCE($2, drop_id),
                name = COALESCE($3, name),
                reference = COALESCE($4, reference),
                family = COALESCE($5, family),
                category = COALESCE($6, category),
                color = COALESCE($7, color),
                pvp = COALESCE($8, pvp),
                cost = COALESCE($9, cost),
                margin = COALESCE($10, margin),
                units = COALESCE($11, units),
                channel = COALESCE($12, channel),
                launch_date = COALESCE($13, launch_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sku>(&query)
            .bind(id)
            .bind(input.drop_id)
            .bind(&input.name)
            .bind(&input.reference)
            .bind(&input.family)
            .bind(&input.category)
            .bind(&input.color)
            .bind(input.pvp)
            .bind(input.cost)
            .bind(input.margin)
            .bind(input.units)
            .bind(&input.channel)
            .bind(input.launch_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a SKU by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM skus WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
