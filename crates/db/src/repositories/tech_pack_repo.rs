//! Repository for the `tech_packs` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::tech_pack::{CreateTechPack, TechPack, UpdateTechPack};

const COLUMNS: &str = "id, collection_plan_id, sku_id, name, sketch_url, description, specs, \
    created_at, updated_at";

/// Provides CRUD operations for tech packs.
pub struct TechPackRepo;

impl TechPackRepo {
    pub async fn create(pool: &PgPool, input: &CreateTechPack) -> Result<TechPack, sqlx::Error> {
        let query = format!(
            "INSERT INTO tech_packs (collection_plan_id, sku_id, name, sketch_url, description, specs)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, '{{}}'::JSONB))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TechPack>(&query)
            .bind(input.collection_plan_id)
            .bind(input.sku_id)
            .bind(&input.name)
            .bind(&input.sketch_url)
            .bind(&input.description)
            .bind(&input.specs)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TechPack>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tech_packs WHERE id = $1");
        sqlx::query_as::<_, TechPack>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        collection_plan_id: Option<DbId>,
    ) -> Result<Vec<TechPack>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tech_packs
             WHERE ($1::BIGINT IS NULL OR collection_plan_id = $1)
             ORDER BY id"
        );
        sqlx::query_as::<_, TechPack>(&query)
            .bind(collection_plan_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTechPack,
    ) -> Result<Option<TechPack>, sqlx::Error> {
        let query = format!(
            "UPDATE tech_packs SET
                sku_id = COALESCE($2, sku_id),
                name = COALESCE($3, name),
                sketch_url = COALESCE($4, sketch_url),
                description = COALESCE($5, description),
                specs = COALESCE($6, specs)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TechPack>(&query)
            .bind(id)
            .bind(input.sku_id)
            .bind(&input.name)
            .bind(&input.sketch_url)
            .bind(&input.description)
            .bind(&input.specs)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tech_packs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
