mod common;

use assert_matches::assert_matches;
use common::*;
use spasibka_core::error::CoreError;
use spasibka_core::purchase::PurchaseRejection;
use spasibka_engine::purchase::PurchaseRequest;
use spasibka_engine::EngineError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

fn buy(buyer_id: i64, item_id: i64, amount: i64) -> PurchaseRequest {
    PurchaseRequest {
        buyer_id,
        item_id,
        amount,
    }
}

async fn stock_of(pool: &PgPool, item_id: i64) -> i32 {
    sqlx::query_scalar("SELECT stock FROM items WHERE id = $1")
        .bind(item_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purchase_debits_and_decrements(pool: PgPool) {
    let engine = engine(&pool);
    seed_employee(&pool, 1, 500).await;
    let item = seed_item(&pool, 200, 3, true).await;

    let purchase = engine.submit_purchase(&buy(1, item, 200)).await.unwrap();
    assert_eq!(purchase.amount_spent, 200);
    assert_eq!(purchase.buyer_bitrix_id, 1);
    assert_eq!(coins_of(&pool, 1).await, 300);
    assert_eq!(stock_of(&pool, item).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sold_out_item_unavailable_regardless_of_balance(pool: PgPool) {
    let engine = engine(&pool);
    seed_employee(&pool, 1, 1_000_000).await;
    let item = seed_item(&pool, 10, 0, true).await;

    assert_matches!(
        engine.submit_purchase(&buy(1, item, 10)).await,
        Err(EngineError::Purchase(PurchaseRejection::ItemUnavailable))
    );
    assert_eq!(coins_of(&pool, 1).await, 1_000_000);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inactive_and_missing_items_unavailable(pool: PgPool) {
    let engine = engine(&pool);
    seed_employee(&pool, 1, 100).await;
    let item = seed_item(&pool, 10, 5, false).await;

    assert_matches!(
        engine.submit_purchase(&buy(1, item, 10)).await,
        Err(EngineError::Purchase(PurchaseRejection::ItemUnavailable))
    );
    assert_matches!(
        engine.submit_purchase(&buy(1, 9999, 10)).await,
        Err(EngineError::Purchase(PurchaseRejection::ItemUnavailable))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_insufficient_funds_and_unknown_buyer(pool: PgPool) {
    let engine = engine(&pool);
    seed_employee(&pool, 1, 50).await;
    let item = seed_item(&pool, 100, 5, true).await;

    assert_matches!(
        engine.submit_purchase(&buy(1, item, 100)).await,
        Err(EngineError::Purchase(PurchaseRejection::InsufficientFunds))
    );
    assert_matches!(
        engine.submit_purchase(&buy(77, item, 1)).await,
        Err(EngineError::Purchase(PurchaseRejection::BuyerNotFound))
    );
    assert_eq!(stock_of(&pool, item).await, 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_amount_rejected(pool: PgPool) {
    let engine = engine(&pool);
    seed_employee(&pool, 1, 50).await;
    let item = seed_item(&pool, 100, 5, true).await;

    assert_matches!(
        engine.submit_purchase(&buy(1, item, -5)).await,
        Err(EngineError::Core(CoreError::Validation(_)))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_purchases_of_last_unit(pool: PgPool) {
    let engine = engine(&pool);
    for id in 1..=8 {
        seed_employee(&pool, id, 1_000).await;
    }
    let item = seed_item(&pool, 100, 1, true).await;

    let handles: Vec<_> = (1..=8)
        .map(|buyer| {
            let engine = engine.clone();
            tokio::spawn(async move { engine.submit_purchase(&buy(buyer, item, 100)).await })
        })
        .collect();

    let mut ok = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => ok += 1,
            Err(e) => assert_matches!(
                e,
                EngineError::Purchase(PurchaseRejection::ItemUnavailable)
            ),
        }
    }
    assert_eq!(ok, 1);
    assert_eq!(stock_of(&pool, item).await, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_purchases_never_overspend(pool: PgPool) {
    let engine = engine(&pool);
    seed_employee(&pool, 1, 250).await;
    let item = seed_item(&pool, 100, 10, true).await;

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let engine = engine.clone();
            tokio::spawn(async move { engine.submit_purchase(&buy(1, item, 100)).await })
        })
        .collect();

    let mut ok = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            ok += 1;
        }
    }
    assert_eq!(ok, 2);
    assert_eq!(coins_of(&pool, 1).await, 50);
    assert_eq!(stock_of(&pool, item).await, 8);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_purchase_history_pages(pool: PgPool) {
    let engine = engine(&pool);
    seed_employee(&pool, 1, 1_000).await;
    let item = seed_item(&pool, 10, 20, true).await;
    for _ in 0..7 {
        engine.submit_purchase(&buy(1, item, 10)).await.unwrap();
    }

    let page = engine.purchase_history(1, Some(2), None).await.unwrap();
    assert_eq!(page.total, 7);
    assert_eq!(page.size, 5);
    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.purchases.len(), 2);
    assert_eq!(page.purchases[0].item_name, "Mug");

    let clamped = engine.purchase_history(1, Some(0), Some(500)).await.unwrap();
    assert_eq!(clamped.page, 1);
    assert_eq!(clamped.size, 50);

    let empty = engine.purchase_history(2, None, None).await.unwrap();
    assert_eq!(empty.total, 0);
    assert_eq!(empty.total_pages, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_lock_timeout_rolls_back_purchase(
    pool_opts: PgPoolOptions,
    connect_opts: PgConnectOptions,
) {
    let pool = pool_opts
        .connect_with(connect_opts.options([("lock_timeout", "200ms")]))
        .await
        .unwrap();
    let engine = engine(&pool);
    seed_employee(&pool, 1, 500).await;
    let item = seed_item(&pool, 100, 2, true).await;

    let mut holder = pool.begin().await.unwrap();
    sqlx::query("SELECT 1 FROM employees WHERE bitrix_id = 1 FOR UPDATE")
        .execute(&mut *holder)
        .await
        .unwrap();

    let err = engine.submit_purchase(&buy(1, item, 100)).await.unwrap_err();
    assert_matches!(
        err,
        EngineError::Database(sqlx::Error::Database(ref db))
            if db.code().as_deref() == Some("55P03")
    );

    holder.rollback().await.unwrap();
    assert_eq!(stock_of(&pool, item).await, 2);
    assert_eq!(coins_of(&pool, 1).await, 500);

    // The item lock was released with the rollback.
    engine.submit_purchase(&buy(1, item, 100)).await.unwrap();
    assert_eq!(stock_of(&pool, item).await, 1);
}
