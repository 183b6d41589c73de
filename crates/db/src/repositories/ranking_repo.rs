//! Time-windowed prompt rankings: trending and top.
//!
//! Both rankings only consider public, non-deleted prompts.

use sqlx::PgPool;

use crate::models::prompt::{PromptListRow, RankingFilter, TrendingPromptRow};
use crate::repositories::prompt_repo::{JOINS, LIST_COLUMNS};

/// Prompts eligible for a ranking. `$1` window start, `$2` category filter.
const ELIGIBLE: &str = "p.is_deleted = false \
    AND p.visibility = 'public' \
    AND ($2::BIGINT IS NULL OR p.category_id = $2)";

/// Queries for ranked prompt listings.
pub struct RankingRepo;

impl RankingRepo {
    /// Prompts ranked by the number of votes received since `filter.since`.
    ///
    /// Ties break by newer prompt first, then higher id. Prompts with no
    /// votes in the window are excluded. The total counts every prompt that
    /// received at least one vote in the window, independent of the page.
    pub async fn trending(
        pool: &PgPool,
        filter: &RankingFilter,
    ) -> Result<(Vec<TrendingPromptRow>, i64), sqlx::Error> {
        // Aggregate and paginate first, then attach author and category to
        // just the page, keeping the rank order.
        let query = format!(
            "WITH ranked AS (
                SELECT v.prompt_id, COUNT(*) AS period_vote_count, p.created_at
                FROM votes v
                JOIN prompts p ON p.id = v.prompt_id
                WHERE v.created_at >= $1 AND {ELIGIBLE}
                GROUP BY v.prompt_id, p.created_at
                ORDER BY period_vote_count DESC, p.created_at DESC, v.prompt_id DESC
                LIMIT $3 OFFSET $4
             )
             SELECT {LIST_COLUMNS}, r.period_vote_count
             FROM ranked r
             JOIN prompts p ON p.id = r.prompt_id
             {JOINS}
             ORDER BY r.period_vote_count DESC, p.created_at DESC, p.id DESC"
        );
        let rows = sqlx::query_as::<_, TrendingPromptRow>(&query)
            .bind(filter.since)
            .bind(filter.category_id)
            .bind(filter.page.limit())
            .bind(filter.page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!(
            "SELECT COUNT(DISTINCT v.prompt_id)
             FROM votes v
             JOIN prompts p ON p.id = v.prompt_id
             WHERE v.created_at >= $1 AND {ELIGIBLE}"
        );
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(filter.since)
            .bind(filter.category_id)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    /// Prompts created since `filter.since`, ranked by all-time vote count.
    pub async fn top(
        pool: &PgPool,
        filter: &RankingFilter,
    ) -> Result<(Vec<PromptListRow>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {LIST_COLUMNS} FROM prompts p {JOINS}
             WHERE p.created_at >= $1 AND {ELIGIBLE}
             ORDER BY p.vote_count DESC, p.created_at DESC, p.id DESC
             LIMIT $3 OFFSET $4"
        );
        let rows = sqlx::query_as::<_, PromptListRow>(&query)
            .bind(filter.since)
            .bind(filter.category_id)
            .bind(filter.page.limit())
            .bind(filter.page.offset())
            .fetch_all(pool)
            .await?;

        let count_query =
            format!("SELECT COUNT(*) FROM prompts p WHERE p.created_at >= $1 AND {ELIGIBLE}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(filter.since)
            .bind(filter.category_id)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }
}
