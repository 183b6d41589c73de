//! Handlers for casting, removing, and checking votes.
//!
//! All endpoints require authentication via [`AuthUser`].

use std::collections::HashSet;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use promptshare_core::error::CoreError;
use promptshare_core::types::DbId;
use promptshare_db::models::vote::{BatchCheckVotes, CastVote, Vote, VoteStatus};
use promptshare_db::repositories::VoteRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Largest number of prompt ids accepted by a batch vote check.
const MAX_BATCH_CHECK: usize = 100;

/// POST /api/v1/prompts/{id}/vote
///
/// Upvote a prompt. Each user may vote on a prompt once.
pub async fn cast_vote(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(prompt_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<Vote>>)> {
    match VoteRepo::cast(&state.pool, auth.user_id, prompt_id).await? {
        CastVote::Cast(vote) => {
            tracing::info!(prompt_id, user_id = auth.user_id, "Vote cast");
            Ok((StatusCode::CREATED, Json(DataResponse { data: vote })))
        }
        CastVote::PromptNotFound => Err(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id: prompt_id,
        })),
        CastVote::AlreadyVoted => Err(AppError::Core(CoreError::Conflict(
            "You have already voted for this prompt.".into(),
        ))),
    }
}

/// DELETE /api/v1/prompts/{id}/vote
///
/// Withdraw the caller's vote. Returns 204 No Content.
pub async fn remove_vote(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(prompt_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !VoteRepo::remove(&state.pool, auth.user_id, prompt_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Vote for prompt",
            id: prompt_id,
        }));
    }

    tracing::info!(prompt_id, user_id = auth.user_id, "Vote removed");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/votes/batch-check
///
/// Report, for each requested prompt id, whether the caller has voted on it.
/// Results follow the request order.
pub async fn batch_check_votes(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BatchCheckVotes>,
) -> AppResult<Json<DataResponse<Vec<VoteStatus>>>> {
    if input.prompt_ids.is_empty() || input.prompt_ids.len() > MAX_BATCH_CHECK {
        return Err(AppError::Core(CoreError::Validation(format!(
            "prompt_ids must contain between 1 and {MAX_BATCH_CHECK} ids"
        ))));
    }

    let voted: HashSet<DbId> =
        VoteRepo::voted_prompt_ids(&state.pool, auth.user_id, &input.prompt_ids)
            .await?
            .into_iter()
            .collect();

    let data = input
        .prompt_ids
        .iter()
        .map(|&prompt_id| VoteStatus {
            prompt_id,
            has_voted: voted.contains(&prompt_id),
        })
        .collect();

    Ok(Json(DataResponse { data }))
}
