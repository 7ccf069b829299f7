use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use spasibka_core::types::{BitrixId, Coins, DbId};
use spasibka_engine::purchase::PurchaseRequest;

use crate::error::AppResult;
use crate::middleware::actor::Actor;
use crate::query::PageParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /purchase`. The buyer is always the caller.
#[derive(Debug, Deserialize)]
pub struct PurchaseBody {
    pub item_id: DbId,
    pub amount: Coins,
}

/// POST /api/v1/purchase
pub async fn purchase(
    actor: Actor,
    State(state): State<AppState>,
    Json(body): Json<PurchaseBody>,
) -> AppResult<impl IntoResponse> {
    let request = PurchaseRequest {
        buyer_id: actor.bitrix_id,
        item_id: body.item_id,
        amount: body.amount,
    };
    let record = state.engine.submit_purchase(&request).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// GET /api/v1/users/{bitrix_id}/purchases
pub async fn purchase_history(
    State(state): State<AppState>,
    Path(bitrix_id): Path<BitrixId>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = state
        .engine
        .purchase_history(bitrix_id, params.page, params.limit)
        .await?;
    Ok(Json(DataResponse { data: page }))
}
