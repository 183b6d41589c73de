//! Refresh-token sessions.

use promptshare_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A refresh-token session. The token hash is write-only and never read back.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshSession {
    pub id: DbId,
    pub user_id: DbId,
    /// The session this one replaced on refresh, if any.
    pub rotated_from: Option<DbId>,
    pub user_agent: Option<String>,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// A session about to be opened, either at sign-in or by rotation.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub user_agent: Option<String>,
    pub expires_at: Timestamp,
}
