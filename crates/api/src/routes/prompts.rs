//! Route definitions for the `/prompts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{prompts, votes};
use crate::state::AppState;

/// Routes mounted at `/prompts`.
///
/// ```text
/// GET    /            -> list_prompts
/// POST   /            -> create_prompt
/// GET    /trending    -> trending_prompts
/// GET    /top         -> top_prompts
/// GET    /{id}        -> get_prompt
/// PATCH  /{id}        -> update_prompt
/// DELETE /{id}        -> delete_prompt
/// POST   /{id}/vote   -> cast_vote
/// DELETE /{id}/vote   -> remove_vote
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(prompts::list_prompts).post(prompts::create_prompt))
        .route("/trending", get(prompts::trending_prompts))
        .route("/top", get(prompts::top_prompts))
        .route(
            "/{id}",
            get(prompts::get_prompt)
                .patch(prompts::update_prompt)
                .delete(prompts::delete_prompt),
        )
        .route(
            "/{id}/vote",
            post(votes::cast_vote).delete(votes::remove_vote),
        )
}
