//! Administrator gate.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use spasibka_core::error::CoreError;
use spasibka_engine::EngineError;

use super::actor::Actor;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the caller to be a known employee with `is_admin` set. Rejects
/// with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(actor): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub Actor);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor = Actor::from_request_parts(parts, state).await?;
        let is_admin = match state.engine.get_employee(actor.bitrix_id).await {
            Ok(employee) => employee.is_admin,
            Err(EngineError::Core(CoreError::NotFound { .. })) => false,
            Err(other) => return Err(other.into()),
        };
        if !is_admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Administrator rights required".into(),
            )));
        }
        Ok(RequireAdmin(actor))
    }
}
