//! Rating Aggregator.
//!
//! Read-only. Rankings are recomputed from the like rows on every call.

use spasibka_core::pagination::{clamp_limit, clamp_page, page_offset, total_pages};
use spasibka_core::types::{DbId, Timestamp};
use spasibka_db::models::rating::{RatingEntry, RatingPage};
use spasibka_db::repositories::{GameRepo, RatingRepo};

use crate::resolver::resolve_active_game;
use crate::{Engine, EngineError};

/// Default page size for the overall rating.
const DEFAULT_RATING_LIMIT: i64 = 10;

/// Maximum page size for the overall rating.
const MAX_RATING_LIMIT: i64 = 100;

impl Engine {
    /// Full ranking for one game. Unknown games are reported as not found.
    pub async fn rating_for_game(&self, game_id: DbId) -> Result<Vec<RatingEntry>, EngineError> {
        if GameRepo::find_by_id(&self.pool, game_id).await?.is_none() {
            return Err(EngineError::not_found("game", game_id));
        }
        let rows = RatingRepo::for_game(&self.pool, game_id).await?;
        Ok(rows.into_iter().map(RatingEntry::from).collect())
    }

    /// Ranking of the game active at `now`; empty when no game is live.
    pub async fn active_game_rating(
        &self,
        now: Timestamp,
    ) -> Result<Vec<RatingEntry>, EngineError> {
        match resolve_active_game(&self.pool, now, self.policy.game_end_grace).await? {
            Some(game) => self.rating_for_game(game.id).await,
            None => Ok(Vec::new()),
        }
    }

    /// One page of the ranking across all games.
    pub async fn overall_rating(
        &self,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<RatingPage, EngineError> {
        let page = clamp_page(page);
        let limit = clamp_limit(limit, DEFAULT_RATING_LIMIT, MAX_RATING_LIMIT);

        let rows = RatingRepo::overall(&self.pool, limit, page_offset(page, limit)).await?;
        let total = RatingRepo::count_overall(&self.pool).await?;

        Ok(RatingPage {
            items: rows.into_iter().map(RatingEntry::from).collect(),
            page,
            limit,
            total,
            total_pages: total_pages(total, limit),
        })
    }
}
