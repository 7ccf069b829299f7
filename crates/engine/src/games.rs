//! Game administration.
//!
//! Activation is serialized with a transaction-scoped advisory lock and
//! deactivates every other game in the same transaction, so two games are
//! never flagged active at once. The partial unique index
//! `uq_games_single_active` backs this up at the storage level.

use spasibka_core::game::validate_window;
use spasibka_core::types::DbId;
use spasibka_db::models::game::{CreateGame, Game, GameListQuery, UpdateGame};
use spasibka_db::repositories::{GameRepo, LikeTransactionRepo};
use validator::Validate;

use crate::{Engine, EngineError};

impl Engine {
    pub async fn list_games(&self, params: &GameListQuery) -> Result<Vec<Game>, EngineError> {
        Ok(GameRepo::list(&self.pool, params).await?)
    }

    pub async fn get_game(&self, id: DbId) -> Result<Game, EngineError> {
        GameRepo::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| EngineError::not_found("game", id))
    }

    pub async fn create_game(&self, input: &CreateGame) -> Result<Game, EngineError> {
        input.validate()?;
        validate_window(input.game_start, input.game_end)?;

        let mut tx = self.pool.begin().await?;
        if input.game_is_active {
            GameRepo::acquire_activation_lock(&mut tx).await?;
            let cleared = GameRepo::deactivate_others(&mut tx, None).await?;
            tracing::debug!(cleared, "Deactivated previous games");
        }
        let game = GameRepo::insert(&mut tx, input).await?;
        tx.commit().await?;

        tracing::info!(game_id = game.id, active = game.game_is_active, "Game created");
        Ok(game)
    }

    /// Partial update. The merged window is re-validated.
    pub async fn update_game(&self, id: DbId, patch: &UpdateGame) -> Result<Game, EngineError> {
        patch.validate()?;

        let mut tx = self.pool.begin().await?;
        GameRepo::acquire_activation_lock(&mut tx).await?;
        let current = GameRepo::lock_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| EngineError::not_found("game", id))?;

        let merged = patch.apply_to(&current);
        validate_window(merged.game_start, merged.game_end)?;

        if merged.game_is_active {
            let cleared = GameRepo::deactivate_others(&mut tx, Some(id)).await?;
            tracing::debug!(cleared, "Deactivated previous games");
        }
        let game = GameRepo::update(&mut tx, id, &merged).await?;
        tx.commit().await?;

        tracing::info!(game_id = id, active = game.game_is_active, "Game updated");
        Ok(game)
    }

    /// Delete a game that has no likes recorded against it.
    pub async fn delete_game(&self, id: DbId) -> Result<(), EngineError> {
        let mut tx = self.pool.begin().await?;
        if GameRepo::lock_by_id(&mut tx, id).await?.is_none() {
            return Err(EngineError::not_found("game", id));
        }
        if LikeTransactionRepo::exists_for_game(&mut *tx, id).await? {
            return Err(EngineError::conflict(
                "Cannot delete a game that already has likes",
            ));
        }
        GameRepo::delete(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!(game_id = id, "Game deleted");
        Ok(())
    }
}
