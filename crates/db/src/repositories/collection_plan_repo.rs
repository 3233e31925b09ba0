//! Repository for the `collection_plans` table.
//!
//! Every read and write is scoped to an owner; a plan owned by someone
//! else behaves as if it did not exist.

use atelier_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::collection_plan::{
    CollectionPlan, CreateCollectionPlan, UpdateCollectionPlan,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, owner_id, name, season, year, location, status, setup_data, created_at, updated_at";

/// Provides CRUD operations for collection plans.
pub struct CollectionPlanRepo;

impl CollectionPlanRepo {
    /// Insert a new plan, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to `draft`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCollectionPlan,
    ) -> Result<CollectionPlan, sqlx::Error> {
        let query = format!(
            "INSERT INTO collection_plans (owner_id, name, season, year, location, status, setup_data)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'draft'), $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CollectionPlan>(&query)
            .bind(input.owner_id)
            .bind(&input.name)
            .bind(&input.season)
            .bind(input.year)
            .bind(&input.location)
            .bind(&input.status)
            .bind(&input.setup_data)
            .fetch_one(pool)
            .await
    }

    /// Find a plan by ID if it belongs to `owner_id`.
    pub async fn find_by_id_for_owner(
        pool: &PgPool,
        id: DbId,
        owner_id: UserId,
    ) -> Result<Option<CollectionPlan>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM collection_plans WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, CollectionPlan>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's plans, most recently updated first, optionally
    /// filtered by status.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: UserId,
        status: Option<&str>,
    ) -> Result<Vec<CollectionPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collection_plans
             WHERE owner_id = $1 AND ($2::TEXT IS NULL OR status = $2)
             ORDER BY updated_at DESC"
        );
        sqlx::query_as::<_, CollectionPlan>(&query)
            .bind(owner_id)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// List every plan with the given status regardless of owner.
    ///
    /// Used by scheduled jobs, never by user-facing handlers.
    pub async fn list_by_status(
        pool: &PgPool,
        status: &str,
    ) -> Result<Vec<CollectionPlan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM collection_plans WHERE status = $1 ORDER BY id"
        );
        sqlx::query_as::<_, CollectionPlan>(&query)
            .bind(status)
            .fetch_all(pool)
            .await
    }

    /// Update plan metadata. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no plan with the given `id` belongs to `owner_id`.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner_id: UserId,
        input: &UpdateCollectionPlan,
    ) -> Result<Option<CollectionPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE collection_plans SET
                name = COALESCE($3, name),
                season = COALESCE($4, season),
                year = COALESCE($5, year),
                location = COALESCE($6, location),
                status = COALESCE($7, status)
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CollectionPlan>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.season)
            .bind(input.year)
            .bind(&input.location)
            .bind(&input.status)
            .fetch_optional(pool)
            .await
    }

    /// Replace the plan's setup data. `name` and `status` are applied in the
    /// same statement when given.
    ///
    /// Returns `None` if no plan with the given `id` belongs to `owner_id`.
    pub async fn save_setup_data(
        pool: &PgPool,
        id: DbId,
        owner_id: UserId,
        setup_data: &serde_json::Value,
        name: Option<&str>,
        status: Option<&str>,
    ) -> Result<Option<CollectionPlan>, sqlx::Error> {
        let query = format!(
            "UPDATE collection_plans SET
                setup_data = $3,
                name = COALESCE($4, name),
                status = COALESCE($5, status)
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CollectionPlan>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(setup_data)
            .bind(name)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a plan (children cascade). Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, owner_id: UserId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM collection_plans WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
