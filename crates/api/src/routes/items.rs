use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Catalog routes mounted at `/items`.
///
/// ```text
/// GET    /          -> list_available
/// POST   /          -> create_item (admin)
/// GET    /all       -> list_all (admin)
/// PATCH  /{id}      -> update_item (admin)
/// DELETE /{id}      -> delete_item (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list_available).post(items::create_item))
        .route("/all", get(items::list_all))
        .route("/{id}", patch(items::update_item).delete(items::delete_item))
}
