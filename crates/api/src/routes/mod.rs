pub mod employees;
pub mod games;
pub mod health;
pub mod items;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{likes, purchases, rating};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// POST   /like                       -> send_like
/// GET    /likes-info/{bitrix_id}     -> likes_info
/// POST   /purchase                   -> purchase
/// GET    /rating                     -> overall_rating
///
/// /users                             -> employees::router()
/// /games                             -> games::router()
/// /items                             -> items::router()
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/like", post(likes::send_like))
        .route("/likes-info/{bitrix_id}", get(likes::likes_info))
        .route("/purchase", post(purchases::purchase))
        .route("/rating", get(rating::overall_rating))
        .nest("/users", employees::router())
        .nest("/games", games::router())
        .nest("/items", items::router())
}
