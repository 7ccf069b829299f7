//! Handlers for the employee directory.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use spasibka_core::types::BitrixId;
use spasibka_db::models::employee::{EmployeeListQuery, UpdateEmployee};

use crate::error::{AppError, AppResult};
use crate::middleware::actor::Actor;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users?only_gamers=&limit=&offset=
pub async fn list_employees(
    State(state): State<AppState>,
    Query(params): Query<EmployeeListQuery>,
) -> AppResult<impl IntoResponse> {
    let employees = state.engine.list_employees(&params).await?;
    Ok(Json(DataResponse { data: employees }))
}

/// GET /api/v1/users/{bitrix_id}
pub async fn get_employee(
    State(state): State<AppState>,
    Path(bitrix_id): Path<BitrixId>,
) -> AppResult<impl IntoResponse> {
    let employee = state.engine.get_employee(bitrix_id).await?;
    Ok(Json(DataResponse { data: employee }))
}

/// PATCH /api/v1/users/{bitrix_id}
///
/// The admin check runs inside the update transaction, so a plain [`Actor`]
/// is enough here.
pub async fn update_employee(
    actor: Actor,
    State(state): State<AppState>,
    Path(bitrix_id): Path<BitrixId>,
    Json(patch): Json<UpdateEmployee>,
) -> AppResult<impl IntoResponse> {
    let employee = state
        .engine
        .update_employee(actor.bitrix_id, bitrix_id, &patch)
        .await?;
    Ok(Json(DataResponse { data: employee }))
}

/// GET /api/v1/users/{bitrix_id}/audit
pub async fn employee_audit(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(bitrix_id): Path<BitrixId>,
) -> AppResult<impl IntoResponse> {
    let entries = state.engine.employee_audit(bitrix_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/users/sync
///
/// Pull the roster from Bitrix24 now instead of waiting for the scheduler.
pub async fn sync_roster(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let provider = state
        .roster_provider
        .as_ref()
        .ok_or_else(|| AppError::BadRequest("Bitrix24 integration is not configured".into()))?;

    let report = state.engine.sync_roster(provider.as_ref()).await?;

    tracing::info!(
        processed = report.processed,
        actor_id = admin.bitrix_id,
        "Manual roster sync finished"
    );

    Ok(Json(DataResponse { data: report }))
}
