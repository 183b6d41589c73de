//! Handlers for the `/categories` resource.

use axum::extract::State;
use axum::Json;
use promptshare_db::models::category::CategorySummary;
use promptshare_db::repositories::CategoryRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
///
/// All categories, sorted by name. Public.
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategorySummary>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}
