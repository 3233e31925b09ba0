//! Repository for the `signals` table.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::signal::{CreateSignal, KeywordTotal, Signal, SignalFilter};
use crate::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, source, keyword, mention_count, engagement, period_start, period_end, \
    created_at, updated_at";

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 500;

/// Provides read and write operations for signals.
pub struct SignalRepo;

impl SignalRepo {
    /// Insert a signal. Fails with a unique violation on
    /// `uq_signals_source_keyword_period` if the period is already recorded.
    pub async fn create(pool: &PgPool, input: &CreateSignal) -> Result<Signal, sqlx::Error> {
        let query = format!(
            "INSERT INTO signals (source, keyword, mention_count, engagement, period_start, period_end)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Signal>(&query)
            .bind(&input.source)
            .bind(&input.keyword)
            .bind(input.mention_count)
            .bind(input.engagement)
            .bind(input.period_start)
            .bind(input.period_end)
            .fetch_one(pool)
            .await
    }

    /// Insert or overwrite the counts for `(source, keyword, period_start)`.
    pub async fn upsert(pool: &PgPool, input: &CreateSignal) -> Result<Signal, sqlx::Error> {
        let query = format!(
            "INSERT INTO signals (source, keyword, mention_count, engagement, period_start, period_end)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT ON CONSTRAINT uq_signals_source_keyword_period DO UPDATE SET
                mention_count = EXCLUDED.mention_count,
                engagement = EXCLUDED.engagement,
                period_end = EXCLUDED.period_end
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Signal>(&query)
            .bind(&input.source)
            .bind(&input.keyword)
            .bind(input.mention_count)
            .bind(input.engagement)
            .bind(input.period_start)
            .bind(input.period_end)
            .fetch_one(pool)
            .await
    }

    /// List signals, newest period first, with optional source and
    /// keyword filters. Keyword matching is case-insensitive.
    pub async fn list(pool: &PgPool, filter: &SignalFilter) -> Result<Vec<Signal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM signals
             WHERE ($1::TEXT IS NULL OR source = $1)
               AND ($2::TEXT IS NULL OR keyword = LOWER($2))
             ORDER BY period_start DESC, mention_count DESC, id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Signal>(&query)
            .bind(&filter.source)
            .bind(&filter.keyword)
            .bind(clamp_limit(filter.limit, DEFAULT_LIMIT, MAX_LIMIT))
            .bind(clamp_offset(filter.offset))
            .fetch_all(pool)
            .await
    }

    /// Keywords ranked by total mentions across sources for periods
    /// starting on or after `since`.
    pub async fn top_keywords(
        pool: &PgPool,
        since: NaiveDate,
        limit: Option<i64>,
    ) -> Result<Vec<KeywordTotal>, sqlx::Error> {
        sqlx::query_as::<_, KeywordTotal>(
            "SELECT keyword,
                    SUM(mention_count)::BIGINT AS mention_count,
                    SUM(engagement)::BIGINT AS engagement
             FROM signals
             WHERE period_start >= $1
             GROUP BY keyword
             ORDER BY mention_count DESC, engagement DESC, keyword
             LIMIT $2",
        )
        .bind(since)
        .bind(clamp_limit(limit, 20, 100))
        .fetch_all(pool)
        .await
    }
}
