//! Purchase commit and purchase history.
//!
//! Lock order is item row first, then buyer row. Availability and funds are
//! re-checked only after both locks are held.

use serde::Deserialize;
use spasibka_core::pagination::{clamp_limit, clamp_page, page_offset};
use spasibka_core::purchase::{check_purchase, validate_amount, StockState};
use spasibka_core::types::{BitrixId, Coins, DbId};
use spasibka_db::models::buy_transaction::{BuyTransaction, PurchaseHistoryPage};
use spasibka_db::repositories::{BuyTransactionRepo, EmployeeRepo, ItemRepo};

use crate::reward::history_pages;
use crate::{Engine, EngineError};

/// Default page size for purchase history.
const DEFAULT_HISTORY_LIMIT: i64 = 5;

/// Maximum page size for purchase history.
const MAX_HISTORY_LIMIT: i64 = 50;

#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseRequest {
    pub buyer_id: BitrixId,
    pub item_id: DbId,
    /// Coins to debit from the buyer.
    pub amount: Coins,
}

impl Engine {
    /// Buy one unit of an item.
    pub async fn submit_purchase(
        &self,
        request: &PurchaseRequest,
    ) -> Result<BuyTransaction, EngineError> {
        validate_amount(request.amount)?;

        let mut tx = self.pool.begin().await?;

        let item = ItemRepo::lock_by_id(&mut tx, request.item_id).await?;
        let buyer = EmployeeRepo::lock_one(&mut tx, request.buyer_id).await?;

        let stock = item.as_ref().map(|i| StockState {
            is_active: i.is_active,
            stock: i.stock,
        });
        let buyer_coins = buyer.as_ref().map(|b| b.coins);
        if let Err(rejection) = check_purchase(stock, buyer_coins, request.amount) {
            tracing::debug!(
                buyer_id = request.buyer_id,
                item_id = request.item_id,
                reason = rejection.code(),
                "Purchase rejected"
            );
            return Err(rejection.into());
        }

        ItemRepo::decrement_stock(&mut tx, request.item_id).await?;
        EmployeeRepo::debit_coins(&mut tx, request.buyer_id, request.amount).await?;
        let purchase =
            BuyTransactionRepo::insert(&mut tx, request.buyer_id, request.item_id, request.amount)
                .await?;

        tx.commit().await?;

        tracing::info!(
            purchase_id = purchase.id,
            buyer_id = purchase.buyer_bitrix_id,
            item_id = purchase.item_id,
            amount = purchase.amount_spent,
            "Purchase committed"
        );

        Ok(purchase)
    }

    /// One buyer's purchases, newest first, 1-based pages.
    pub async fn purchase_history(
        &self,
        buyer: BitrixId,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<PurchaseHistoryPage, EngineError> {
        let page = clamp_page(page);
        let limit = clamp_limit(limit, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT);

        let purchases =
            BuyTransactionRepo::history(&self.pool, buyer, limit, page_offset(page, limit)).await?;
        let total = BuyTransactionRepo::count_for_buyer(&self.pool, buyer).await?;

        Ok(PurchaseHistoryPage {
            purchases,
            total,
            page,
            size: limit,
            total_pages: history_pages(total, limit),
        })
    }
}
