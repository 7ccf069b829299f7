use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{employees, likes, purchases};
use crate::state::AppState;

/// Employee routes mounted at `/users`.
///
/// ```text
/// GET    /                          -> list_employees
/// POST   /sync                      -> sync_roster (admin)
/// GET    /{bitrix_id}               -> get_employee
/// PATCH  /{bitrix_id}               -> update_employee (admin)
/// GET    /{bitrix_id}/audit         -> employee_audit (admin)
/// GET    /{bitrix_id}/likes         -> like_history
/// GET    /{bitrix_id}/purchases     -> purchase_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(employees::list_employees))
        .route("/sync", post(employees::sync_roster))
        .route(
            "/{bitrix_id}",
            get(employees::get_employee).patch(employees::update_employee),
        )
        .route("/{bitrix_id}/audit", get(employees::employee_audit))
        .route("/{bitrix_id}/likes", get(likes::like_history))
        .route("/{bitrix_id}/purchases", get(purchases::purchase_history))
}
