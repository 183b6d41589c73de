//! Repository for the `user_sessions` table.
//!
//! A refresh token is single use: redeeming it goes through [`SessionRepo::rotate`],
//! which retires the old session and opens its replacement atomically.

use promptshare_core::types::DbId;
use sqlx::PgPool;

use crate::models::session::{NewSession, RefreshSession};

const COLUMNS: &str = "id, user_id, rotated_from, user_agent, expires_at, revoked_at, created_at";

/// Insert statement shared by `open` and `rotate`; `$5` is `rotated_from`.
const INSERT: &str = "INSERT INTO user_sessions \
                      (user_id, refresh_token_hash, user_agent, expires_at, rotated_from) \
                      VALUES ($1, $2, $3, $4, $5)";

/// Refresh-token session operations.
pub struct SessionRepo;

impl SessionRepo {
    /// Open a fresh session at sign-in.
    pub async fn open(pool: &PgPool, input: &NewSession) -> Result<RefreshSession, sqlx::Error> {
        let query = format!("{INSERT} RETURNING {COLUMNS}");
        sqlx::query_as::<_, RefreshSession>(&query)
            .bind(input.user_id)
            .bind(&input.refresh_token_hash)
            .bind(&input.user_agent)
            .bind(input.expires_at)
            .bind(None::<DbId>)
            .fetch_one(pool)
            .await
    }

    /// Look up the live session holding `token_hash`: not revoked, not expired.
    pub async fn find_active(
        pool: &PgPool,
        token_hash: &str,
    ) -> Result<Option<RefreshSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE refresh_token_hash = $1
               AND revoked_at IS NULL
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, RefreshSession>(&query)
            .bind(token_hash)
            .fetch_optional(pool)
            .await
    }

    /// Revoke session `old_id` and open `next` in its place, in one transaction.
    ///
    /// Returns `None` without writing anything when `old_id` is no longer live,
    /// which is how a concurrent refresh with the same token loses the race.
    /// Any error rolls back both steps, so the old token stays usable.
    pub async fn rotate(
        pool: &PgPool,
        old_id: DbId,
        next: &NewSession,
    ) -> Result<Option<RefreshSession>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let retired: Option<DbId> = sqlx::query_scalar(
            "UPDATE user_sessions SET revoked_at = NOW()
             WHERE id = $1 AND revoked_at IS NULL AND expires_at > NOW()
             RETURNING id",
        )
        .bind(old_id)
        .fetch_optional(&mut *tx)
        .await?;
        if retired.is_none() {
            return Ok(None);
        }

        let query = format!("{INSERT} RETURNING {COLUMNS}");
        let session = sqlx::query_as::<_, RefreshSession>(&query)
            .bind(next.user_id)
            .bind(&next.refresh_token_hash)
            .bind(&next.user_agent)
            .bind(next.expires_at)
            .bind(old_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(session))
    }

    /// Revoke every live session of a user. Returns how many were revoked.
    pub async fn revoke_all_for_user(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_sessions SET revoked_at = NOW()
             WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
