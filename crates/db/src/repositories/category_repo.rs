//! Repository for the `categories` table.

use promptshare_core::types::DbId;
use sqlx::PgPool;

use crate::models::category::CategorySummary;

/// Read access to prompt categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List every category ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<CategorySummary>, sqlx::Error> {
        sqlx::query_as::<_, CategorySummary>("SELECT id, name FROM categories ORDER BY name")
            .fetch_all(pool)
            .await
    }

    /// Whether a category with the given ID exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
