mod common;

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use async_trait::async_trait;
use common::*;
use spasibka_core::period::LimitParameter;
use spasibka_engine::roster::RosterSyncScheduler;
use spasibka_engine::EngineError;
use spasibka_events::{BitrixError, RosterEntry, RosterProvider};
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

struct StaticRoster(Vec<RosterEntry>);

#[async_trait]
impl RosterProvider for StaticRoster {
    async fn list_employees(&self) -> Result<Vec<RosterEntry>, BitrixError> {
        Ok(self.0.clone())
    }
}

struct BrokenRoster;

#[async_trait]
impl RosterProvider for BrokenRoster {
    async fn list_employees(&self) -> Result<Vec<RosterEntry>, BitrixError> {
        Err(BitrixError::HttpStatus(503))
    }
}

fn entry(bitrix_id: i64, name: &str) -> RosterEntry {
    RosterEntry {
        bitrix_id,
        name: name.to_string(),
        lastname: "Ivanova".to_string(),
        email: Some(format!("{name}@example.com")),
        position: None,
        photo_url: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_first_synced_employee_becomes_admin(pool: PgPool) {
    let engine = engine(&pool);
    let roster = StaticRoster(vec![entry(10, "Olga"), entry(11, "Irina")]);

    let report = engine.sync_roster(&roster).await.unwrap();
    assert_eq!(report.processed, 2);
    assert_eq!(report.inserted, 2);

    let first = engine.get_employee(10).await.unwrap();
    let second = engine.get_employee(11).await.unwrap();
    assert!(first.is_admin);
    assert!(!second.is_admin);
    assert!(first.is_gamer && second.is_gamer);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sync_updates_and_never_deletes(pool: PgPool) {
    let engine = engine(&pool);
    seed_employee(&pool, 5, 300).await;

    let roster = StaticRoster(vec![entry(5, "Renamed"), entry(6, "New")]);
    let report = engine.sync_roster(&roster).await.unwrap();
    assert_eq!(report.inserted, 1);

    let renamed = engine.get_employee(5).await.unwrap();
    assert_eq!(renamed.name, "Renamed");
    assert_eq!(renamed.coins, 300, "balances survive a sync");
    assert!(!engine.get_employee(6).await.unwrap().is_admin);

    engine.sync_roster(&StaticRoster(Vec::new())).await.unwrap();
    assert!(engine.get_employee(5).await.is_ok());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_roster_ids_are_synced_once(pool: PgPool) {
    let engine = engine(&pool);
    let roster = StaticRoster(vec![entry(8, "Vera"), entry(3, "Nina"), entry(8, "Later")]);

    let report = engine.sync_roster(&roster).await.unwrap();
    assert_eq!(report.processed, 2);
    assert_eq!(report.inserted, 2);
    assert_eq!(engine.get_employee(8).await.unwrap().name, "Vera");
    // Lowest id is inserted first.
    assert!(engine.get_employee(3).await.unwrap().is_admin);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_descending_roster_sync_does_not_deadlock_rewards(pool: PgPool) {
    const SIZE: i64 = 4000;
    let engine = engine(&pool);
    sqlx::query(
        "INSERT INTO employees (bitrix_id, name, lastname) \
         SELECT g, 'Name' || g, 'Last' || g FROM generate_series(1, $1::BIGINT) AS g",
    )
    .bind(SIZE)
    .execute(&pool)
    .await
    .unwrap();
    seed_active_game(&engine, LimitParameter::WholeGame, 100, 100).await;

    let roster = StaticRoster((1..=SIZE).rev().map(|id| entry(id, "Synced")).collect());
    let sync = {
        let engine = engine.clone();
        tokio::spawn(async move { engine.sync_roster(&roster).await })
    };
    tokio::time::sleep(Duration::from_millis(150)).await;

    let rewards: Vec<_> = (0..20)
        .map(|_| {
            let engine = engine.clone();
            tokio::spawn(async move { engine.submit_reward(&like(1, SIZE), now()).await })
        })
        .collect();

    assert_eq!(sync.await.unwrap().unwrap().processed, SIZE as usize);
    for reward in rewards {
        reward.await.unwrap().unwrap();
    }
    assert_eq!(coins_of(&pool, SIZE).await, 2000);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_provider_failure_is_upstream_error(pool: PgPool) {
    let engine = engine(&pool);
    assert_matches!(
        engine.sync_roster(&BrokenRoster).await,
        Err(EngineError::Upstream(_))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_scheduler_syncs_then_stops(pool: PgPool) {
    let engine = engine(&pool);
    let scheduler = RosterSyncScheduler::new(
        engine.clone(),
        Arc::new(StaticRoster(vec![entry(1, "Anna")])),
        Duration::from_secs(3600),
    );
    let cancel = CancellationToken::new();
    let task = {
        let cancel = cancel.clone();
        tokio::spawn(async move { scheduler.run(cancel).await })
    };

    // The first tick fires immediately.
    for _ in 0..50 {
        if engine.get_employee(1).await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(engine.get_employee(1).await.is_ok());

    cancel.cancel();
    task.await.unwrap();
}
