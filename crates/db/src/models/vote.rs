//! Vote models.

use promptshare_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `votes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vote {
    pub id: DbId,
    pub user_id: DbId,
    pub prompt_id: DbId,
    pub created_at: Timestamp,
}

/// Outcome of casting a vote.
#[derive(Debug)]
pub enum CastVote {
    /// The vote was recorded and the prompt's counter incremented.
    Cast(Vote),
    /// The prompt does not exist or is soft-deleted.
    PromptNotFound,
    /// The user already has a vote on this prompt.
    AlreadyVoted,
}

/// Request body for `POST /votes/batch-check`.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchCheckVotes {
    pub prompt_ids: Vec<DbId>,
}

/// Per-prompt result of a batch vote check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteStatus {
    pub prompt_id: DbId,
    pub has_voted: bool,
}
