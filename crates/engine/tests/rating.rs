mod common;

use assert_matches::assert_matches;
use common::*;
use spasibka_core::error::CoreError;
use spasibka_core::period::LimitParameter;
use spasibka_engine::EngineError;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_game_rating_is_ranked_and_repeatable(pool: PgPool) {
    let engine = engine(&pool);
    for id in 1..=5 {
        seed_employee(&pool, id, 0).await;
    }
    let game = seed_active_game(&engine, LimitParameter::WholeGame, 10, 10).await;

    engine.submit_reward(&like(1, 2), now()).await.unwrap();
    engine.submit_reward(&like(3, 2), now()).await.unwrap();
    engine.submit_reward(&like(2, 3), now()).await.unwrap();

    let first = engine.rating_for_game(game).await.unwrap();
    let ranked: Vec<_> = first.iter().map(|r| (r.bitrix_id, r.received, r.sent)).collect();
    assert_eq!(ranked, vec![(2, 2, 1), (3, 1, 1), (1, 0, 1)]);
    assert_eq!(first[0].name, "Last2 Name2");

    let second = engine.rating_for_game(game).await.unwrap();
    assert_eq!(first, second);

    let active = engine.active_game_rating(now()).await.unwrap();
    assert_eq!(active, first);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_game_rating_is_not_found(pool: PgPool) {
    let engine = engine(&pool);
    assert_matches!(
        engine.rating_for_game(12345).await,
        Err(EngineError::Core(CoreError::NotFound { entity: "game", .. }))
    );
    assert!(engine.active_game_rating(now()).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_overall_rating_page_two_of_three(pool: PgPool) {
    let engine = engine(&pool);
    for id in 1..=13 {
        seed_employee(&pool, id, 0).await;
    }
    seed_active_game(&engine, LimitParameter::WholeGame, 100, 100).await;

    // 2..=12 receive one like each and tie, so they rank by bitrix_id; the
    // sender (1) has nothing received and comes last. 13 stays idle.
    for to in 2..=12 {
        engine.submit_reward(&like(1, to), now()).await.unwrap();
    }

    let page = engine.overall_rating(Some(2), Some(5)).await.unwrap();
    assert_eq!(page.total, 12);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page, 2);
    let ids: Vec<_> = page.items.iter().map(|r| r.bitrix_id).collect();
    assert_eq!(ids, vec![7, 8, 9, 10, 11]);

    let last = engine.overall_rating(Some(3), Some(5)).await.unwrap();
    let ids: Vec<_> = last.items.iter().map(|r| r.bitrix_id).collect();
    assert_eq!(ids, vec![12, 1]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_overall_rating_empty(pool: PgPool) {
    let engine = engine(&pool);
    let page = engine.overall_rating(None, None).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages, 0);
    assert_eq!(page.page, 1);
}
