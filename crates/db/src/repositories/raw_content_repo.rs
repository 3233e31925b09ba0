//! Repository for the `raw_contents` table.

use atelier_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::raw_content::{NewRawContent, RawContent};
use crate::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, source, external_id, author, text, url, engagement, hashtags, \
    published_at, processed_at, created_at";

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 500;

/// Provides ingestion and processing queries for collected posts.
pub struct RawContentRepo;

impl RawContentRepo {
    /// Insert a batch of posts in one transaction, skipping any whose
    /// `(source, external_id)` already exists. Returns the number inserted.
    pub async fn insert_many(pool: &PgPool, items: &[NewRawContent]) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut inserted = 0;
        for item in items {
            let result = sqlx::query(
                "INSERT INTO raw_contents (source, external_id, author, text, url, engagement, published_at)
                 VALUES ($1, $2, $3, $4, $5, $6, $7)
                 ON CONFLICT ON CONSTRAINT uq_raw_contents_source_external_id DO NOTHING",
            )
            .bind(&item.source)
            .bind(&item.external_id)
            .bind(&item.author)
            .bind(&item.text)
            .bind(&item.url)
            .bind(item.engagement)
            .bind(item.published_at)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                tracing::debug!(
                    source = %item.source,
                    external_id = %item.external_id,
                    "Skipping duplicate raw content",
                );
            }
            inserted += result.rows_affected();
        }
        tx.commit().await?;
        Ok(inserted)
    }

    /// List posts, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<RawContent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM raw_contents ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, RawContent>(&query)
            .bind(clamp_limit(limit, DEFAULT_LIMIT, MAX_LIMIT))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Oldest unprocessed posts first.
    pub async fn list_unprocessed(pool: &PgPool, limit: i64) -> Result<Vec<RawContent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM raw_contents
             WHERE processed_at IS NULL
             ORDER BY created_at, id
             LIMIT $1"
        );
        sqlx::query_as::<_, RawContent>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Store extracted hashtags and stamp the post as processed.
    pub async fn mark_processed(
        pool: &PgPool,
        id: DbId,
        hashtags: &[String],
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE raw_contents SET hashtags = $2, processed_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(hashtags)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Processed posts published (or collected, when the publish time is
    /// unknown) at or after `since`.
    pub async fn list_processed_since(
        pool: &PgPool,
        since: Timestamp,
    ) -> Result<Vec<RawContent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM raw_contents
             WHERE processed_at IS NOT NULL
               AND COALESCE(published_at, created_at) >= $1
             ORDER BY id"
        );
        sqlx::query_as::<_, RawContent>(&query)
            .bind(since)
            .fetch_all(pool)
            .await
    }
}
