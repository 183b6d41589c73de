//! Shared response envelope types for API handlers.
//!
//! Single resources and plain lists use `{ "data": ... }`; paginated
//! listings add a `pagination` block next to `data`.

use promptshare_core::pagination::PaginationMeta;
use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: categories }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [T], "pagination": {...} }` envelope for paginated listings.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}
