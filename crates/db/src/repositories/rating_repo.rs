//! Leaderboard queries.
//!
//! Counts are recomputed from `like_transactions` on every call. Employees
//! without a single sent or received like in scope are left out. Ranking is
//! received desc, then sent desc, then `bitrix_id` for a stable order.

use spasibka_core::types::DbId;
use sqlx::PgPool;

use crate::models::rating::RatingRow;

/// Aggregation over likes matching `$1` (a game id, or NULL for every game).
const RANKED: &str = "\
    WITH received AS ( \
        SELECT to_bitrix_id AS bitrix_id, COUNT(*) AS n FROM like_transactions \
        WHERE $1::BIGINT IS NULL OR game_id = $1 GROUP BY to_bitrix_id \
    ), sent AS ( \
        SELECT from_bitrix_id AS bitrix_id, COUNT(*) AS n FROM like_transactions \
        WHERE $1::BIGINT IS NULL OR game_id = $1 GROUP BY from_bitrix_id \
    ) \
    SELECT e.bitrix_id, e.name, e.lastname, \
           COALESCE(r.n, 0) AS received, COALESCE(s.n, 0) AS sent \
    FROM employees e \
    LEFT JOIN received r ON r.bitrix_id = e.bitrix_id \
    LEFT JOIN sent s ON s.bitrix_id = e.bitrix_id \
    WHERE r.n IS NOT NULL OR s.n IS NOT NULL";

pub struct RatingRepo;

impl RatingRepo {
    /// Full ranking for one game.
    pub async fn for_game(pool: &PgPool, game_id: DbId) -> Result<Vec<RatingRow>, sqlx::Error> {
        let query = format!("{RANKED} ORDER BY received DESC, sent DESC, e.bitrix_id");
        sqlx::query_as::<_, RatingRow>(&query)
            .bind(game_id)
            .fetch_all(pool)
            .await
    }

    /// One page of the ranking across all games.
    pub async fn overall(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RatingRow>, sqlx::Error> {
        let query = format!(
            "{RANKED} ORDER BY received DESC, sent DESC, e.bitrix_id LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, RatingRow>(&query)
            .bind(None::<DbId>)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Employees with any activity across all games.
    pub async fn count_overall(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM ( \
                SELECT from_bitrix_id FROM like_transactions \
                UNION \
                SELECT to_bitrix_id FROM like_transactions \
             ) active \
             JOIN employees e ON e.bitrix_id = active.from_bitrix_id",
        )
        .fetch_one(pool)
        .await
    }
}
