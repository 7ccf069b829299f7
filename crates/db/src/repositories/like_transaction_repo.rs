//! Repository for the `like_transactions` table.
//!
//! Rows are insert-only. The count queries feed the reward caps and run inside
//! the reward transaction after the party rows are locked.

use spasibka_core::types::{BitrixId, DbId, Timestamp};
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::like_transaction::{CreateLikeTransaction, LikeHistoryRow, LikeTransaction};

/// Column list for `like_transactions` queries.
const COLUMNS: &str = "id, from_bitrix_id, to_bitrix_id, game_id, message, sticker_id, created_at";

/// Provides inserts, cap counts and history for likes.
pub struct LikeTransactionRepo;

impl LikeTransactionRepo {
    pub async fn insert(
        conn: &mut PgConnection,
        input: &CreateLikeTransaction<'_>,
    ) -> Result<LikeTransaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO like_transactions \
                (from_bitrix_id, to_bitrix_id, game_id, message, sticker_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LikeTransaction>(&query)
            .bind(input.from_bitrix_id)
            .bind(input.to_bitrix_id)
            .bind(input.game_id)
            .bind(input.message)
            .bind(input.sticker_id)
            .bind(input.created_at)
            .fetch_one(conn)
            .await
    }

    /// Likes from `sender` to `recipient` over the whole game.
    pub async fn count_between<'e, E: PgExecutor<'e>>(
        executor: E,
        game_id: DbId,
        sender: BitrixId,
        recipient: BitrixId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM like_transactions \
             WHERE game_id = $1 AND from_bitrix_id = $2 AND to_bitrix_id = $3",
        )
        .bind(game_id)
        .bind(sender)
        .bind(recipient)
        .fetch_one(executor)
        .await
    }

    /// Likes sent by `sender` in the game at or after `since`. `None` counts
    /// the whole game.
    pub async fn count_sent_since<'e, E: PgExecutor<'e>>(
        executor: E,
        game_id: DbId,
        sender: BitrixId,
        since: Option<Timestamp>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM like_transactions \
             WHERE game_id = $1 AND from_bitrix_id = $2 \
               AND ($3::TIMESTAMPTZ IS NULL OR created_at >= $3)",
        )
        .bind(game_id)
        .bind(sender)
        .bind(since)
        .fetch_one(executor)
        .await
    }

    /// Likes received by `recipient` in the game.
    pub async fn count_received<'e, E: PgExecutor<'e>>(
        executor: E,
        game_id: DbId,
        recipient: BitrixId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM like_transactions WHERE game_id = $1 AND to_bitrix_id = $2",
        )
        .bind(game_id)
        .bind(recipient)
        .fetch_one(executor)
        .await
    }

    /// Any likes recorded against the game.
    pub async fn exists_for_game<'e, E: PgExecutor<'e>>(
        executor: E,
        game_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM like_transactions WHERE game_id = $1)")
            .bind(game_id)
            .fetch_one(executor)
            .await
    }

    /// Sent and received likes of one employee across all games, newest first.
    pub async fn history(
        pool: &PgPool,
        bitrix_id: BitrixId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LikeHistoryRow>, sqlx::Error> {
        sqlx::query_as::<_, LikeHistoryRow>(
            "SELECT l.id, l.created_at, l.from_bitrix_id, l.to_bitrix_id, \
                    l.message, l.sticker_id, \
                    f.name AS from_name, f.lastname AS from_lastname, \
                    t.name AS to_name, t.lastname AS to_lastname \
             FROM like_transactions l \
             LEFT JOIN employees f ON f.bitrix_id = l.from_bitrix_id \
             LEFT JOIN employees t ON t.bitrix_id = l.to_bitrix_id \
             WHERE l.from_bitrix_id = $1 OR l.to_bitrix_id = $1 \
             ORDER BY l.created_at DESC, l.id DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(bitrix_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    pub async fn count_history(pool: &PgPool, bitrix_id: BitrixId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM like_transactions \
             WHERE from_bitrix_id = $1 OR to_bitrix_id = $1",
        )
        .bind(bitrix_id)
        .fetch_one(pool)
        .await
    }
}
