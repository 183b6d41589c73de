//! Repository for the `prompts` table.
//!
//! Every read filters out soft-deleted rows (`is_deleted = true`).

use promptshare_core::types::DbId;
use sqlx::PgPool;

use crate::models::prompt::{
    CreatePrompt, PromptDetailRow, PromptListFilter, PromptListRow, UpdatePrompt,
};

/// Listing columns, with the author and category joined in. Excludes `content`.
pub(crate) const LIST_COLUMNS: &str = "p.id, p.title, p.description, p.visibility, \
    p.author_id, u.username AS author_username, \
    p.category_id, c.name AS category_name, \
    p.vote_count, p.created_at, p.updated_at";

/// Detail columns, with the author and category joined in.
const DETAIL_COLUMNS: &str = "p.id, p.title, p.description, p.content, p.visibility, \
    p.author_id, u.username AS author_username, \
    p.category_id, c.name AS category_name, \
    p.vote_count, p.created_at, p.updated_at";

/// Joins that resolve `author_username` and `category_name` for a prompt aliased `p`.
pub(crate) const JOINS: &str = "JOIN users u ON u.id = p.author_id \
    JOIN categories c ON c.id = p.category_id";

/// Shared `WHERE` clause for the public listing.
///
/// `$1` category filter, `$2` author filter, `$3` include private prompts.
const LIST_WHERE: &str = "p.is_deleted = false \
    AND ($1::BIGINT IS NULL OR p.category_id = $1) \
    AND ($2::BIGINT IS NULL OR p.author_id = $2) \
    AND ($3 OR p.visibility = 'public')";

/// Provides CRUD operations for prompts.
pub struct PromptRepo;

impl PromptRepo {
    /// Insert a new prompt authored by `author_id`.
    ///
    /// Returns `None` if the category does not exist. The category row is
    /// share-locked so it cannot disappear between the check and the insert.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        input: &CreatePrompt,
    ) -> Result<Option<PromptDetailRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let category: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM categories WHERE id = $1 FOR SHARE")
                .bind(input.category_id)
                .fetch_optional(&mut *tx)
                .await?;
        if category.is_none() {
            return Ok(None);
        }

        let query = format!(
            "WITH p AS (
                INSERT INTO prompts
                    (title, description, content, visibility, author_id, category_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
             )
             SELECT {DETAIL_COLUMNS} FROM p {JOINS}"
        );
        let row = sqlx::query_as::<_, PromptDetailRow>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.content)
            .bind(input.visibility.as_str())
            .bind(author_id)
            .bind(input.category_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(row))
    }

    /// Find a live prompt with its author and category.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PromptDetailRow>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} FROM prompts p {JOINS}
             WHERE p.id = $1 AND p.is_deleted = false"
        );
        sqlx::query_as::<_, PromptDetailRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The author of a live prompt, or `None` if it does not exist.
    pub async fn find_author(pool: &PgPool, id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT author_id FROM prompts WHERE id = $1 AND is_deleted = false")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of the listing plus the total number of matching prompts.
    ///
    /// Rows are ordered by the requested column, then by `id` in the same
    /// direction so pages never overlap.
    pub async fn list(
        pool: &PgPool,
        filter: &PromptListFilter,
    ) -> Result<(Vec<PromptListRow>, i64), sqlx::Error> {
        let direction = filter.order.keyword();
        let query = format!(
            "SELECT {LIST_COLUMNS} FROM prompts p {JOINS}
             WHERE {LIST_WHERE}
             ORDER BY {column} {direction}, p.id {direction}
             LIMIT $4 OFFSET $5",
            column = filter.sort_by.column(),
        );
        let rows = sqlx::query_as::<_, PromptListRow>(&query)
            .bind(filter.category_id)
            .bind(filter.author_id)
            .bind(filter.include_private)
            .bind(filter.page.limit())
            .bind(filter.page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM prompts p WHERE {LIST_WHERE}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(filter.category_id)
            .bind(filter.author_id)
            .bind(filter.include_private)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    /// Apply a partial update to a prompt owned by `author_id`.
    ///
    /// Only fields present in `input` change. Returns `None` if the prompt
    /// does not exist, is deleted, or belongs to someone else. The caller
    /// is responsible for confirming a new `category_id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        author_id: DbId,
        input: &UpdatePrompt,
    ) -> Result<Option<PromptDetailRow>, sqlx::Error> {
        let query = format!(
            "WITH p AS (
                UPDATE prompts SET
                    title = COALESCE($3, title),
                    description = CASE WHEN $4 THEN $5 ELSE description END,
                    content = COALESCE($6, content),
                    visibility = COALESCE($7, visibility),
                    category_id = COALESCE($8, category_id)
                WHERE id = $1 AND author_id = $2 AND is_deleted = false
                RETURNING *
             )
             SELECT {DETAIL_COLUMNS} FROM p {JOINS}"
        );
        sqlx::query_as::<_, PromptDetailRow>(&query)
            .bind(id)
            .bind(author_id)
            .bind(&input.title)
            .bind(input.description.is_some())
            .bind(input.description.clone().flatten())
            .bind(&input.content)
            .bind(input.visibility.map(|v| v.as_str()))
            .bind(input.category_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a prompt owned by `author_id`.
    ///
    /// Returns `true` if a live prompt was marked deleted. Votes are kept.
    pub async fn soft_delete(
        pool: &PgPool,
        id: DbId,
        author_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE prompts SET is_deleted = true
             WHERE id = $1 AND author_id = $2 AND is_deleted = false",
        )
        .bind(id)
        .bind(author_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
