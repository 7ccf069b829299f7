//! Shared fixtures for engine integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use spasibka_core::period::LimitParameter;
use spasibka_core::types::{BitrixId, Coins, DbId, Timestamp};
use spasibka_db::models::employee::UpsertEmployee;
use spasibka_db::models::game::CreateGame;
use spasibka_db::models::item::CreateItem;
use spasibka_db::repositories::{EmployeeRepo, ItemRepo};
use spasibka_engine::reward::RewardRequest;
use spasibka_engine::{Engine, RewardPolicy};
use spasibka_events::EventBus;
use sqlx::PgPool;

/// Reference "now" used by most tests: Wednesday 2025-06-11 12:00 UTC.
pub fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 6, 11, 12, 0, 0).unwrap()
}

pub fn at(d: u32, h: u32, m: u32, s: u32) -> Timestamp {
    Utc.with_ymd_and_hms(2025, 6, d, h, m, s).unwrap()
}

pub fn engine(pool: &PgPool) -> Engine {
    Engine::new(pool.clone(), RewardPolicy::default(), Arc::new(EventBus::default()))
}

pub async fn seed_employee(pool: &PgPool, bitrix_id: BitrixId, coins: Coins) {
    let mut conn = pool.acquire().await.unwrap();
    EmployeeRepo::upsert_from_roster(
        &mut conn,
        &UpsertEmployee {
            bitrix_id,
            name: format!("Name{bitrix_id}"),
            lastname: format!("Last{bitrix_id}"),
            position: None,
            email: None,
            photo_url: None,
        },
        false,
    )
    .await
    .unwrap();
    sqlx::query("UPDATE employees SET coins = $2 WHERE bitrix_id = $1")
        .bind(bitrix_id)
        .bind(coins)
        .execute(pool)
        .await
        .unwrap();
}

pub fn game_input(
    limit_parameter: LimitParameter,
    limit_value: i32,
    limit_to_one_user: i32,
) -> CreateGame {
    CreateGame {
        name: "June game".to_string(),
        description: Some("Say thanks".to_string()),
        game_start: at(1, 0, 0, 0),
        game_end: at(30, 18, 0, 0),
        game_is_active: true,
        limit_parameter,
        limit_value,
        limit_to_one_user,
    }
}

/// Create and activate a game covering all of June 2025.
pub async fn seed_active_game(
    engine: &Engine,
    limit_parameter: LimitParameter,
    limit_value: i32,
    limit_to_one_user: i32,
) -> DbId {
    engine
        .create_game(&game_input(limit_parameter, limit_value, limit_to_one_user))
        .await
        .unwrap()
        .id
}

pub async fn seed_item(pool: &PgPool, price: Coins, stock: i32, is_active: bool) -> DbId {
    ItemRepo::create(
        pool,
        &CreateItem {
            name: "Mug".to_string(),
            description: None,
            price,
            stock,
            is_active,
        },
    )
    .await
    .unwrap()
    .id
}

pub fn like(from: BitrixId, to: BitrixId) -> RewardRequest {
    RewardRequest {
        sender_id: from,
        recipient_id: to,
        message: Some("Thanks!".to_string()),
        sticker_id: None,
    }
}

pub async fn coins_of(pool: &PgPool, bitrix_id: BitrixId) -> Coins {
    sqlx::query_scalar("SELECT coins FROM employees WHERE bitrix_id = $1")
        .bind(bitrix_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
