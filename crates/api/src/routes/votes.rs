//! Route definitions for the `/votes` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::votes;
use crate::state::AppState;

/// Routes mounted at `/votes`.
pub fn router() -> Router<AppState> {
    Router::new().route("/batch-check", post(votes::batch_check_votes))
}
