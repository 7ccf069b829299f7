//! Purchase transaction model.
//!
//! Purchase rows are immutable once created (no `updated_at`).

use serde::Serialize;
use spasibka_core::types::{BitrixId, Coins, DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `buy_transactions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BuyTransaction {
    pub id: DbId,
    pub buyer_bitrix_id: BitrixId,
    pub item_id: DbId,
    pub amount_spent: Coins,
    pub created_at: Timestamp,
}

/// Purchase joined with the item name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PurchaseHistoryEntry {
    pub id: DbId,
    pub item_id: DbId,
    pub item_name: String,
    pub amount_spent: Coins,
    pub created_at: Timestamp,
}

/// Paginated purchase history.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseHistoryPage {
    pub purchases: Vec<PurchaseHistoryEntry>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
    pub total_pages: i64,
}
