//! Category models.

use promptshare_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// The `{id, name}` pair returned by the category listing and embedded in prompts.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CategorySummary {
    pub id: DbId,
    pub name: String,
}
