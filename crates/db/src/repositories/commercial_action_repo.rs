//! Repository for the `commercial_actions` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::commercial_action::{
    CommercialAction, CreateCommercialAction, UpdateCommercialAction,
};

const COLUMNS: &str = "id, collection_plan_id, name, action_type, start_date, end_date, \
    channels, description, created_at, updated_at";

/// Provides CRUD operations for commercial actions.
pub struct CommercialActionRepo;

impl CommercialActionRepo {
    /// Insert a new action. `action_type` defaults to `promotion`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCommercialAction,
    ) -> Result<CommercialAction, sqlx::Error> {
        let query = format!(
            "INSERT INTO commercial_actions (collection_plan_id, name, action_type, start_date,
                                             end_date, channels, description)
             VALUES ($1, $2, COALESCE($3, 'promotion'), $4, $5, COALESCE($6, '{{}}'::TEXT[]), $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CommercialAction>(&query)
            .bind(input.collection_plan_id)
            .bind(&input.name)
            .bind(&input.action_type)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.channels)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CommercialAction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM commercial_actions WHERE id = $1");
        sqlx::query_as::<_, CommercialAction>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List actions by start date, optionally restricted to one plan.
    pub async fn list(
        pool: &PgPool,
        collection_plan_id: Option<DbId>,
    ) -> Result<Vec<CommercialAction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM commercial_actions
             WHERE ($1::BIGINT IS NULL OR collection_plan_id = $1)
             ORDER BY start_date, id"
        );
        sqlx::query_as::<_, CommercialAction>(&query)
            .bind(collection_plan_id)
            .fetch_all(pool)
            .await
    }

    /// Count the actions attached to a plan.
    pub async fn count_for_plan(pool: &PgPool, collection_plan_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM commercial_actions WHERE collection_plan_id = $1")
                .bind(collection_plan_id)
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCommercialAction,
    ) -> Result<Option<CommercialAction>, sqlx::Error> {
        let query = format!(
            "UPDATE commercial_actions SET
                name = COALESCE($2, name),
                action_type = COALESCE($3, action_type),
                start_date = COALESCE($4, start_date),
                end_date = COALESCE($5, end_date),
                channels = COALESCE($6, channels),
                description = COALESCE($7, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CommercialAction>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.action_type)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.channels)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM commercial_actions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
