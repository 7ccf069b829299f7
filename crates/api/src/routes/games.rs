use axum::routing::get;
use axum::Router;

use crate::handlers::{games, rating};
use crate::state::AppState;

/// Game routes mounted at `/games`.
///
/// ```text
/// GET    /                  -> list_games
/// POST   /                  -> create_game (admin)
/// GET    /active/rating     -> active_game_rating
/// GET    /{id}              -> get_game
/// PATCH  /{id}              -> update_game (admin)
/// DELETE /{id}              -> delete_game (admin)
/// GET    /{id}/rating       -> game_rating
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(games::list_games).post(games::create_game))
        .route("/active/rating", get(rating::active_game_rating))
        .route(
            "/{id}",
            get(games::get_game)
                .patch(games::update_game)
                .delete(games::delete_game),
        )
        .route("/{id}/rating", get(rating::game_rating))
}
