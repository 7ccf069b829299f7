//! Repository for the `games` table.

use spasibka_core::types::DbId;
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::game::{CreateGame, Game, GameListQuery};

/// Column list for `games` queries.
const COLUMNS: &str = "\
    id, name, description, game_start, game_end, game_is_active, \
    limit_parameter, limit_value, limit_to_one_user, created_at, updated_at";

/// Advisory lock key serializing game activation.
const ACTIVATION_LOCK_KEY: i64 = 0x5350_4153_4741_4d45;

/// Provides CRUD operations and the single-active-game discipline.
pub struct GameRepo;

impl GameRepo {
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE id = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List games, newest start first, optionally filtered by the active flag.
    pub async fn list(pool: &PgPool, params: &GameListQuery) -> Result<Vec<Game>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM games \
             WHERE ($1::BOOLEAN IS NULL OR game_is_active = $1) \
             ORDER BY game_start DESC, id DESC"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(params.is_active)
            .fetch_all(pool)
            .await
    }

    /// The game carrying the active flag, if any. Window bounds are not
    /// applied here.
    pub async fn find_flagged_active<'e, E: PgExecutor<'e>>(
        executor: E,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE game_is_active LIMIT 1");
        sqlx::query_as::<_, Game>(&query)
            .fetch_optional(executor)
            .await
    }

    /// Same as [`Self::find_flagged_active`] but holds a share lock on the row
    /// until the transaction ends, so the game cannot be deactivated or
    /// reconfigured while a reward is being committed against it.
    pub async fn share_flagged_active(
        conn: &mut PgConnection,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE game_is_active LIMIT 1 FOR SHARE");
        sqlx::query_as::<_, Game>(&query)
            .fetch_optional(conn)
            .await
    }

    pub async fn lock_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Take the transaction-scoped activation lock. Released on commit or
    /// rollback.
    pub async fn acquire_activation_lock(conn: &mut PgConnection) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(ACTIVATION_LOCK_KEY)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Clear the active flag on every game except `keep_id`.
    ///
    /// Returns the number of games deactivated.
    pub async fn deactivate_others(
        conn: &mut PgConnection,
        keep_id: Option<DbId>,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE games SET game_is_active = false, updated_at = NOW() \
             WHERE game_is_active AND ($1::BIGINT IS NULL OR id <> $1)",
        )
        .bind(keep_id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn insert(conn: &mut PgConnection, input: &CreateGame) -> Result<Game, sqlx::Error> {
        let query = format!(
            "INSERT INTO games \
                (name, description, game_start, game_end, game_is_active, \
                 limit_parameter, limit_value, limit_to_one_user) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.game_start)
            .bind(input.game_end)
            .bind(input.game_is_active)
            .bind(input.limit_parameter.as_str())
            .bind(input.limit_value)
            .bind(input.limit_to_one_user)
            .fetch_one(conn)
            .await
    }

    /// Overwrite every editable column with the merged values.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &CreateGame,
    ) -> Result<Game, sqlx::Error> {
        let query = format!(
            "UPDATE games SET \
                name = $2, description = $3, game_start = $4, game_end = $5, \
                game_is_active = $6, limit_parameter = $7, limit_value = $8, \
                limit_to_one_user = $9, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.game_start)
            .bind(input.game_end)
            .bind(input.game_is_active)
            .bind(input.limit_parameter.as_str())
            .bind(input.limit_value)
            .bind(input.limit_to_one_user)
            .fetch_one(conn)
            .await
    }

    /// Delete a game. Returns `true` if a row was removed.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
