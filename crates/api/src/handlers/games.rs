//! Handlers for game administration.
//!
//! Reads are public; every mutation requires [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use spasibka_core::types::DbId;
use spasibka_db::models::game::{CreateGame, GameListQuery, UpdateGame};

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/games?is_active=
pub async fn list_games(
    State(state): State<AppState>,
    Query(params): Query<GameListQuery>,
) -> AppResult<impl IntoResponse> {
    let games = state.engine.list_games(&params).await?;
    Ok(Json(DataResponse { data: games }))
}

/// GET /api/v1/games/{id}
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let game = state.engine.get_game(id).await?;
    Ok(Json(DataResponse { data: game }))
}

/// POST /api/v1/games
///
/// Creating an active game deactivates every other game.
pub async fn create_game(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateGame>,
) -> AppResult<impl IntoResponse> {
    let game = state.engine.create_game(&input).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: game })))
}

/// PATCH /api/v1/games/{id}
pub async fn update_game(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<UpdateGame>,
) -> AppResult<impl IntoResponse> {
    let game = state.engine.update_game(id, &patch).await?;

    Ok(Json(DataResponse { data: game }))
}

/// DELETE /api/v1/games/{id}
///
/// 409 when likes were already sent in the game.
pub async fn delete_game(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    state.engine.delete_game(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
