//! Handlers for the catalog.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use spasibka_core::types::DbId;
use spasibka_db::models::item::{CreateItem, UpdateItem};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/items
///
/// Items that can be bought right now (active and in stock).
pub async fn list_available(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = state.engine.list_available_items().await?;
    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/items/all
pub async fn list_all(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let items = state.engine.list_all_items().await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/items
pub async fn create_item(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateItem>,
) -> AppResult<impl IntoResponse> {
    let item = state.engine.create_item(&input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: item })))
}

/// PATCH /api/v1/items/{id}
pub async fn update_item(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<UpdateItem>,
) -> AppResult<impl IntoResponse> {
    let item = state.engine.update_item(id, &patch).await?;

    Ok(Json(DataResponse { data: item }))
}

/// DELETE /api/v1/items/{id}
pub async fn delete_item(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.engine.delete_item(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
