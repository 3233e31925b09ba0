//! Repository for the `ai_recommendations` table.

use atelier_core::types::DbId;
use sqlx::PgPool;

use crate::models::ai_recommendation::{AiRecommendation, CreateAiRecommendation};

const COLUMNS: &str = "id, collection_plan_id, kind, provider, content, created_at";

pub struct AiRecommendationRepo;

impl AiRecommendationRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateAiRecommendation,
    ) -> Result<AiRecommendation, sqlx::Error> {
        let query = format!(
            "INSERT INTO ai_recommendations (collection_plan_id, kind, provider, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiRecommendation>(&query)
            .bind(input.collection_plan_id)
            .bind(&input.kind)
            .bind(&input.provider)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// The most recent recommendation of each kind for a plan.
    pub async fn latest_for_plan(
        pool: &PgPool,
        collection_plan_id: DbId,
    ) -> Result<Vec<AiRecommendation>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (kind) {COLUMNS} FROM ai_recommendations
             WHERE collection_plan_id = $1
             ORDER BY kind, created_at DESC, id DESC"
        );
        sqlx::query_as::<_, AiRecommendation>(&query)
            .bind(collection_plan_id)
            .fetch_all(pool)
            .await
    }
}
