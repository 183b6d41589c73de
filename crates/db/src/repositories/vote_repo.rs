//! Repository for the `votes` table.
//!
//! Casting and removing a vote change the prompt's denormalized
//! `vote_count` in the same transaction, so the counter always equals the
//! number of vote rows for that prompt.

use promptshare_core::types::DbId;
use sqlx::PgPool;

use crate::is_unique_violation;
use crate::models::vote::{CastVote, Vote};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, prompt_id, created_at";

/// Unique constraint guarding one vote per (user, prompt).
const UNIQUE_VOTE: &str = "uq_votes_user_prompt";

/// Provides vote operations.
pub struct VoteRepo;

impl VoteRepo {
    /// Record a vote by `user_id` on `prompt_id` and increment the counter.
    ///
    /// The prompt row is locked for the duration of the transaction, so
    /// concurrent casts on the same prompt serialize.
    pub async fn cast(
        pool: &PgPool,
        user_id: DbId,
        prompt_id: DbId,
    ) -> Result<CastVote, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let live: Option<DbId> = sqlx::query_scalar(
            "SELECT id FROM prompts WHERE id = $1 AND is_deleted = false FOR UPDATE",
        )
        .bind(prompt_id)
        .fetch_optional(&mut *tx)
        .await?;
        if live.is_none() {
            return Ok(CastVote::PromptNotFound);
        }

        let query = format!(
            "INSERT INTO votes (user_id, prompt_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let vote = match sqlx::query_as::<_, Vote>(&query)
            .bind(user_id)
            .bind(prompt_id)
            .fetch_one(&mut *tx)
            .await
        {
            Ok(vote) => vote,
            Err(err) if is_unique_violation(&err, UNIQUE_VOTE) => {
                return Ok(CastVote::AlreadyVoted);
            }
            Err(err) => return Err(err),
        };

        sqlx::query("UPDATE prompts SET vote_count = vote_count + 1 WHERE id = $1")
            .bind(prompt_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(CastVote::Cast(vote))
    }

    /// Remove a vote and decrement the counter.
    ///
    /// Returns `false` if the user had no vote on the prompt. Works on
    /// soft-deleted prompts too, so a vote can always be withdrawn.
    pub async fn remove(
        pool: &PgPool,
        user_id: DbId,
        prompt_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Same lock order as `cast`: prompt row first, then the vote row.
        sqlx::query("SELECT id FROM prompts WHERE id = $1 FOR UPDATE")
            .bind(prompt_id)
            .execute(&mut *tx)
            .await?;

        let removed: Option<DbId> = sqlx::query_scalar(
            "DELETE FROM votes WHERE user_id = $1 AND prompt_id = $2 RETURNING id",
        )
        .bind(user_id)
        .bind(prompt_id)
        .fetch_optional(&mut *tx)
        .await?;
        if removed.is_none() {
            return Ok(false);
        }

        sqlx::query("UPDATE prompts SET vote_count = vote_count - 1 WHERE id = $1")
            .bind(prompt_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Whether `user_id` has voted on `prompt_id`.
    pub async fn has_voted(
        pool: &PgPool,
        user_id: DbId,
        prompt_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM votes WHERE user_id = $1 AND prompt_id = $2)",
        )
        .bind(user_id)
        .bind(prompt_id)
        .fetch_one(pool)
        .await
    }

    /// The subset of `prompt_ids` that `user_id` has voted on.
    pub async fn voted_prompt_ids(
        pool: &PgPool,
        user_id: DbId,
        prompt_ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT prompt_id FROM votes WHERE user_id = $1 AND prompt_id = ANY($2)")
            .bind(user_id)
            .bind(prompt_ids)
            .fetch_all(pool)
            .await
    }
}
