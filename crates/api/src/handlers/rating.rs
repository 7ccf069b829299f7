//! Leaderboard handlers. Read-only.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use spasibka_core::types::DbId;

use crate::error::AppResult;
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/games/{id}/rating
pub async fn game_rating(
    State(state): State<AppState>,
    Path(game_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let rating = state.engine.rating_for_game(game_id).await?;
    Ok(Json(DataResponse { data: rating }))
}

/// GET /api/v1/games/active/rating
///
/// Empty list when no game is live.
pub async fn active_game_rating(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let rating = state.engine.active_game_rating(chrono::Utc::now()).await?;
    Ok(Json(DataResponse { data: rating }))
}

/// GET /api/v1/rating?page=&limit=
pub async fn overall_rating(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = state
        .engine
        .overall_rating(params.page, params.limit)
        .await?;
    Ok(Json(DataResponse { data: page }))
}
