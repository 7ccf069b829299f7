//! Handlers for sending likes and reading like statistics.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use spasibka_core::types::{BitrixId, DbId};
use spasibka_engine::reward::RewardRequest;

use crate::error::AppResult;
use crate::middleware::actor::Actor;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /like`. The sender is always the caller.
#[derive(Debug, Deserialize)]
pub struct SendLikeBody {
    pub recipient_id: BitrixId,
    pub message: Option<String>,
    pub sticker_id: Option<DbId>,
}

/// POST /api/v1/like
///
/// Send one like from the caller to `recipient_id` in the active game.
pub async fn send_like(
    actor: Actor,
    State(state): State<AppState>,
    Json(body): Json<SendLikeBody>,
) -> AppResult<impl IntoResponse> {
    let request = RewardRequest {
        sender_id: actor.bitrix_id,
        recipient_id: body.recipient_id,
        message: body.message,
        sticker_id: body.sticker_id,
    };
    let receipt = state
        .engine
        .submit_reward(&request, chrono::Utc::now())
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: receipt })))
}

/// GET /api/v1/likes-info/{bitrix_id}
pub async fn likes_info(
    State(state): State<AppState>,
    Path(bitrix_id): Path<BitrixId>,
) -> AppResult<impl IntoResponse> {
    let info = state
        .engine
        .likes_info(bitrix_id, chrono::Utc::now())
        .await?;
    Ok(Json(DataResponse { data: info }))
}

/// GET /api/v1/users/{bitrix_id}/likes
///
/// Sent and received likes across every game, newest first.
pub async fn like_history(
    State(state): State<AppState>,
    Path(bitrix_id): Path<BitrixId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = state
        .engine
        .like_history(bitrix_id, params.limit, params.offset)
        .await?;
    Ok(Json(DataResponse { data: page }))
}
