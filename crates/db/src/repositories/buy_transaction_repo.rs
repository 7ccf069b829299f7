//! Repository for the `buy_transactions` table.

use spasibka_core::types::{BitrixId, Coins, DbId};
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::buy_transaction::{BuyTransaction, PurchaseHistoryEntry};

/// Column list for `buy_transactions` queries.
const COLUMNS: &str = "id, buyer_bitrix_id, item_id, amount_spent, created_at";

/// Provides inserts and history for purchases.
pub struct BuyTransactionRepo;

impl BuyTransactionRepo {
    pub async fn insert(
        conn: &mut PgConnection,
        buyer: BitrixId,
        item_id: DbId,
        amount_spent: Coins,
    ) -> Result<BuyTransaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO buy_transactions (buyer_bitrix_id, item_id, amount_spent) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BuyTransaction>(&query)
            .bind(buyer)
            .bind(item_id)
            .bind(amount_spent)
            .fetch_one(conn)
            .await
    }

    /// Purchases of one buyer joined with the item name, newest first.
    pub async fn history(
        pool: &PgPool,
        buyer: BitrixId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PurchaseHistoryEntry>, sqlx::Error> {
        sqlx::query_as::<_, PurchaseHistoryEntry>(
            "SELECT b.id, b.item_id, i.name AS item_name, b.amount_spent, b.created_at \
             FROM buy_transactions b \
             JOIN items i ON i.id = b.item_id \
             WHERE b.buyer_bitrix_id = $1 \
             ORDER BY b.created_at DESC, b.id DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(buyer)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    pub async fn count_for_buyer(pool: &PgPool, buyer: BitrixId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM buy_transactions WHERE buyer_bitrix_id = $1")
            .bind(buyer)
            .fetch_one(pool)
            .await
    }

    /// Any purchases recorded against the item.
    pub async fn exists_for_item<'e, E: PgExecutor<'e>>(
        executor: E,
        item_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM buy_transactions WHERE item_id = $1)")
            .bind(item_id)
            .fetch_one(executor)
            .await
    }
}
