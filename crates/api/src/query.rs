//! Shared query parameter types for API handlers.
//!
//! Values are clamped in the engine, so handlers pass them through untouched.

use serde::Deserialize;

/// Offset pagination (`?limit=&offset=`), used by the like history.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// 1-based page pagination (`?page=&limit=`), used by the overall rating and
/// the purchase history.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
