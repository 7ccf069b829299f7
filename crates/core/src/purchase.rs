//! Purchase checks evaluated while the item and buyer rows are locked.

use crate::error::CoreError;
use crate::types::Coins;

/// Why a purchase was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PurchaseRejection {
    #[error("This item is not available")]
    ItemUnavailable,

    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Buyer not found")]
    BuyerNotFound,
}

impl PurchaseRejection {
    pub fn code(self) -> &'static str {
        match self {
            PurchaseRejection::ItemUnavailable => "ITEM_UNAVAILABLE",
            PurchaseRejection::InsufficientFunds => "INSUFFICIENT_FUNDS",
            PurchaseRejection::BuyerNotFound => "BUYER_NOT_FOUND",
        }
    }

    pub fn is_not_found(self) -> bool {
        matches!(self, PurchaseRejection::BuyerNotFound)
    }
}

/// Locked view of the item row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockState {
    pub is_active: bool,
    pub stock: i32,
}

/// Validate caller input before any row is touched.
pub fn validate_amount(amount: Coins) -> Result<(), CoreError> {
    if amount < 0 {
        return Err(CoreError::Validation(format!(
            "Amount must be non-negative, got {amount}"
        )));
    }
    Ok(())
}

/// Item availability is checked first, then the buyer.
///
/// `item` is `None` when the row does not exist; `buyer_coins` is `None` when
/// the buyer does not exist.
pub fn check_purchase(
    item: Option<StockState>,
    buyer_coins: Option<Coins>,
    amount: Coins,
) -> Result<(), PurchaseRejection> {
    match item {
        Some(StockState {
            is_active: true,
            stock,
        }) if stock > 0 => {}
        _ => return Err(PurchaseRejection::ItemUnavailable),
    }
    match buyer_coins {
        None => Err(PurchaseRejection::BuyerNotFound),
        Some(coins) if coins < amount => Err(PurchaseRejection::InsufficientFunds),
        Some(_) => Ok(()),
    }
}
