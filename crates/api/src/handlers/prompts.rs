//! Handlers for the `/prompts` resource: CRUD, listing, and rankings.
//!
//! Reads are public and accept an optional bearer token; writes require one.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use promptshare_core::error::CoreError;
use promptshare_core::pagination::{PageRequest, PaginationMeta};
use promptshare_core::prompt::{
    normalize_description, validate_content, validate_title, PromptSortField, SortOrder,
    Visibility,
};
use promptshare_core::trending::{validate_period, window_start};
use promptshare_core::types::DbId;
use promptshare_db::models::prompt::{
    CreatePrompt, PromptDetails, PromptListFilter, PromptResponse, PromptSummary, RankingFilter,
    UpdatePrompt,
};
use promptshare_db::repositories::{CategoryRepo, PromptRepo, RankingRepo, VoteRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query parameters for `GET /prompts`.
#[derive(Debug, Deserialize)]
pub struct ListPromptsParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub category_id: Option<DbId>,
    pub sort_by: Option<PromptSortField>,
    pub order: Option<SortOrder>,
    /// Restrict to one author. When it is the caller, private prompts are included.
    pub user_id: Option<DbId>,
}

/// Query parameters for `GET /prompts/trending` and `GET /prompts/top`.
#[derive(Debug, Deserialize)]
pub struct RankingParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    /// Window length in days.
    pub period: Option<i64>,
    pub category_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/prompts
///
/// Paginated, filterable, sortable listing of public prompts.
pub async fn list_prompts(
    auth: Option<AuthUser>,
    State(state): State<AppState>,
    Query(params): Query<ListPromptsParams>,
) -> AppResult<Json<Paginated<PromptSummary>>> {
    let page = PageRequest::new(params.page, params.page_size)?;
    if let Some(category_id) = params.category_id {
        ensure_category_exists(&state, category_id).await?;
    }

    let include_private = matches!(
        (&auth, params.user_id),
        (Some(user), Some(author)) if user.user_id == author
    );

    let filter = PromptListFilter {
        category_id: params.category_id,
        author_id: params.user_id,
        include_private,
        sort_by: params.sort_by.unwrap_or_default(),
        order: params.order.unwrap_or_default(),
        page,
    };
    let (rows, total) = PromptRepo::list(&state.pool, &filter).await?;

    Ok(Json(Paginated {
        data: rows.into_iter().map(PromptSummary::from).collect(),
        pagination: PaginationMeta::new(page, total),
    }))
}

/// GET /api/v1/prompts/{id}
///
/// Prompt details with the caller's vote state. Private prompts are only
/// visible to their author; everyone else gets 404.
pub async fn get_prompt(
    auth: Option<AuthUser>,
    State(state): State<AppState>,
    Path(prompt_id): Path<DbId>,
) -> AppResult<Json<DataResponse<PromptDetails>>> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id: prompt_id,
        })
    };

    let row = PromptRepo::find_detail(&state.pool, prompt_id)
        .await?
        .ok_or_else(not_found)?;

    let caller = auth.map(|a| a.user_id);
    if row.visibility == Visibility::Private.as_str() && caller != Some(row.author_id) {
        return Err(not_found());
    }

    let has_voted = match caller {
        Some(user_id) => VoteRepo::has_voted(&state.pool, user_id, prompt_id).await?,
        None => false,
    };

    Ok(Json(DataResponse {
        data: PromptDetails::new(row, has_voted),
    }))
}

/// GET /api/v1/prompts/trending
///
/// Public prompts ranked by votes received within the last `period` days.
pub async fn trending_prompts(
    State(state): State<AppState>,
    Query(params): Query<RankingParams>,
) -> AppResult<Json<Paginated<PromptSummary>>> {
    let filter = ranking_filter(&state, &params).await?;
    let (rows, total) = RankingRepo::trending(&state.pool, &filter).await?;

    Ok(Json(Paginated {
        data: rows.into_iter().map(PromptSummary::from).collect(),
        pagination: PaginationMeta::new(filter.page, total),
    }))
}

/// GET /api/v1/prompts/top
///
/// Public prompts created within the last `period` days, ranked by total votes.
pub async fn top_prompts(
    State(state): State<AppState>,
    Query(params): Query<RankingParams>,
) -> AppResult<Json<Paginated<PromptSummary>>> {
    let filter = ranking_filter(&state, &params).await?;
    let (rows, total) = RankingRepo::top(&state.pool, &filter).await?;

    Ok(Json(Paginated {
        data: rows.into_iter().map(PromptSummary::from).collect(),
        pagination: PaginationMeta::new(filter.page, total),
    }))
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// POST /api/v1/prompts
///
/// Create a prompt authored by the caller.
pub async fn create_prompt(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePrompt>,
) -> AppResult<(StatusCode, Json<DataResponse<PromptResponse>>)> {
    validate_content(&input.content)?;
    let input = CreatePrompt {
        title: validate_title(&input.title)?,
        description: normalize_description(input.description.as_deref())?,
        ..input
    };

    let row = PromptRepo::create(&state.pool, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: input.category_id,
        }))?;

    tracing::info!(prompt_id = row.id, user_id = auth.user_id, "Prompt created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PromptResponse::from(row),
        }),
    ))
}

/// PATCH /api/v1/prompts/{id}
///
/// Update the supplied fields of one of the caller's prompts.
pub async fn update_prompt(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(prompt_id): Path<DbId>,
    Json(input): Json<UpdatePrompt>,
) -> AppResult<Json<DataResponse<PromptResponse>>> {
    if input.is_empty() {
        return Err(AppError::BadRequest(
            "At least one field must be provided".into(),
        ));
    }

    if let Some(content) = &input.content {
        validate_content(content)?;
    }
    let input = UpdatePrompt {
        title: input.title.as_deref().map(validate_title).transpose()?,
        description: input
            .description
            .map(|d| normalize_description(d.as_deref()))
            .transpose()?,
        ..input
    };

    if let Some(category_id) = input.category_id {
        if !CategoryRepo::exists(&state.pool, category_id).await? {
            return Err(AppError::BadRequest(format!(
                "Category with id {category_id} does not exist"
            )));
        }
    }

    let row = PromptRepo::update(&state.pool, prompt_id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id: prompt_id,
        }))?;

    tracing::info!(prompt_id, user_id = auth.user_id, "Prompt updated");

    Ok(Json(DataResponse {
        data: PromptResponse::from(row),
    }))
}

/// DELETE /api/v1/prompts/{id}
///
/// Soft-delete one of the caller's prompts. Returns 204 No Content.
pub async fn delete_prompt(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(prompt_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if PromptRepo::soft_delete(&state.pool, prompt_id, auth.user_id).await? {
        tracing::info!(prompt_id, user_id = auth.user_id, "Prompt deleted");
        return Ok(StatusCode::NO_CONTENT);
    }

    match PromptRepo::find_author(&state.pool, prompt_id).await? {
        None => Err(AppError::Core(CoreError::NotFound {
            entity: "Prompt",
            id: prompt_id,
        })),
        Some(_) => Err(AppError::Core(CoreError::Forbidden(
            "You can only delete your own prompts".into(),
        ))),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Return 404 if the category filter names a category that does not exist.
async fn ensure_category_exists(state: &AppState, category_id: DbId) -> AppResult<()> {
    if CategoryRepo::exists(&state.pool, category_id).await? {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }))
    }
}

/// Validate ranking query parameters into a repository filter.
async fn ranking_filter(state: &AppState, params: &RankingParams) -> AppResult<RankingFilter> {
    let page = PageRequest::new(params.page, params.page_size)?;
    let period = validate_period(params.period)?;
    if let Some(category_id) = params.category_id {
        ensure_category_exists(state, category_id).await?;
    }

    Ok(RankingFilter {
        since: window_start(Utc::now(), period),
        category_id: params.category_id,
        page,
    })
}
