//! Prompt models, response shapes, and DTOs.

use promptshare_core::pagination::PageRequest;
use promptshare_core::prompt::{PromptSortField, SortOrder, Visibility};
use promptshare_core::types::{DbId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use crate::models::category::CategorySummary;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A prompt joined with its author and category, without content.
///
/// Used by every listing so pages never carry full prompt bodies.
#[derive(Debug, Clone, FromRow)]
pub struct PromptListRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub visibility: String,
    pub author_id: DbId,
    pub author_username: Option<String>,
    pub category_id: DbId,
    pub category_name: String,
    pub vote_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A listing row plus the number of votes it received inside a trending window.
#[derive(Debug, Clone, FromRow)]
pub struct TrendingPromptRow {
    #[sqlx(flatten)]
    pub prompt: PromptListRow,
    pub period_vote_count: i64,
}

/// A prompt joined with its author and category, including content.
#[derive(Debug, Clone, FromRow)]
pub struct PromptDetailRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub visibility: String,
    pub author_id: DbId,
    pub author_username: Option<String>,
    pub category_id: DbId,
    pub category_name: String,
    pub vote_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// The `{id, username}` author reference embedded in prompt responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorSummary {
    pub id: DbId,
    pub username: Option<String>,
}

/// A prompt as it appears in a listing.
#[derive(Debug, Clone, Serialize)]
pub struct PromptSummary {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub visibility: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author: AuthorSummary,
    pub category: CategorySummary,
    pub vote_count: i32,
    /// Votes received inside the requested window; only set by the trending ranking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_vote_count: Option<i64>,
}

impl From<PromptListRow> for PromptSummary {
    fn from(row: PromptListRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            visibility: row.visibility,
            created_at: row.created_at,
            updated_at: row.updated_at,
            author: AuthorSummary {
                id: row.author_id,
                username: row.author_username,
            },
            category: CategorySummary {
                id: row.category_id,
                name: row.category_name,
            },
            vote_count: row.vote_count,
            period_vote_count: None,
        }
    }
}

impl From<TrendingPromptRow> for PromptSummary {
    fn from(row: TrendingPromptRow) -> Self {
        let mut summary = PromptSummary::from(row.prompt);
        summary.period_vote_count = Some(row.period_vote_count);
        summary
    }
}

/// A prompt with its content, as returned by create and update.
#[derive(Debug, Clone, Serialize)]
pub struct PromptResponse {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    pub visibility: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub author: AuthorSummary,
    pub category: CategorySummary,
}

impl From<PromptDetailRow> for PromptResponse {
    fn from(row: PromptDetailRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            content: row.content,
            visibility: row.visibility,
            created_at: row.created_at,
            updated_at: row.updated_at,
            author: AuthorSummary {
                id: row.author_id,
                username: row.author_username,
            },
            category: CategorySummary {
                id: row.category_id,
                name: row.category_name,
            },
        }
    }
}

/// The detailed view of a single prompt, including the caller's vote state.
#[derive(Debug, Clone, Serialize)]
pub struct PromptDetails {
    #[serde(flatten)]
    pub prompt: PromptResponse,
    pub vote_count: i32,
    pub has_voted: bool,
}

impl PromptDetails {
    pub fn new(row: PromptDetailRow, has_voted: bool) -> Self {
        let vote_count = row.vote_count;
        Self {
            prompt: PromptResponse::from(row),
            vote_count,
            has_voted,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for creating a prompt. The author comes from the authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePrompt {
    pub title: String,
    pub description: Option<String>,
    pub content: String,
    #[serde(default)]
    pub visibility: Visibility,
    pub category_id: DbId,
}

/// DTO for patching a prompt. Absent fields are left unchanged.
///
/// `description` distinguishes "absent" (`None`) from an explicit `null`
/// (`Some(None)`), which clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePrompt {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    pub content: Option<String>,
    pub visibility: Option<Visibility>,
    pub category_id: Option<DbId>,
}

impl UpdatePrompt {
    /// True when the payload carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.content.is_none()
            && self.visibility.is_none()
            && self.category_id.is_none()
    }
}

/// Wrap any present value (including `null`) in `Some`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Query inputs
// ---------------------------------------------------------------------------

/// Filter and ordering for the public prompt listing.
#[derive(Debug, Clone, Default)]
pub struct PromptListFilter {
    pub category_id: Option<DbId>,
    pub author_id: Option<DbId>,
    /// Include private prompts. Only set when listing the caller's own prompts.
    pub include_private: bool,
    pub sort_by: PromptSortField,
    pub order: SortOrder,
    pub page: PageRequest,
}

/// Filter for the time-windowed rankings (trending and top).
#[derive(Debug, Clone)]
pub struct RankingFilter {
    /// Inclusive lower bound of the window.
    pub since: Timestamp,
    pub category_id: Option<DbId>,
    pub page: PageRequest,
}
