//! Game Window Resolver.
//!
//! The active game is always read from the database at the moment of use;
//! nothing is cached in-process. A game counts as active when it carries the
//! active flag and `game_start <= now <= game_end + grace`.

use chrono::Duration;
use spasibka_core::types::Timestamp;
use spasibka_db::models::game::Game;
use spasibka_db::repositories::GameRepo;
use sqlx::{PgConnection, PgExecutor};

/// The game accepting likes at `now`, if any.
pub async fn resolve_active_game<'e, E: PgExecutor<'e>>(
    executor: E,
    now: Timestamp,
    grace: Duration,
) -> Result<Option<Game>, sqlx::Error> {
    let game = GameRepo::find_flagged_active(executor).await?;
    Ok(game.filter(|g| g.is_live_at(now, grace)))
}

/// Transactional variant: the flagged game row stays share-locked until the
/// surrounding transaction ends.
///
/// If an activation commits while we wait on the old game's row, the
/// re-checked row is no longer flagged and the new game is outside the
/// statement snapshot, so the first lookup finds nothing. One more lookup
/// runs with a fresh snapshot and sees the switch.
pub async fn resolve_active_game_locked(
    conn: &mut PgConnection,
    now: Timestamp,
    grace: Duration,
) -> Result<Option<Game>, sqlx::Error> {
    let game = match GameRepo::share_flagged_active(&mut *conn).await? {
        Some(game) => Some(game),
        None => GameRepo::share_flagged_active(&mut *conn).await?,
    };
    Ok(game.filter(|g| g.is_live_at(now, grace)))
}
