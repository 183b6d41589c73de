pub mod auth;
pub mod categories;
pub mod health;
pub mod prompts;
pub mod votes;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                    register (public)
/// /auth/login                       login (public)
/// /auth/refresh                     refresh (public)
/// /auth/logout                      logout (requires auth)
/// /auth/me                          current user (requires auth)
///
/// /categories                       list (public)
///
/// /prompts                          list (public), create (auth)
/// /prompts/trending                 trending ranking (public)
/// /prompts/top                      top ranking (public)
/// /prompts/{id}                     get (public), update, delete (auth)
/// /prompts/{id}/vote                cast, remove (auth)
///
/// /votes/batch-check                vote state for many prompts (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/categories", categories::router())
        .nest("/prompts", prompts::router())
        .nest("/votes", votes::router())
}
