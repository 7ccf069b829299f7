//! Shared fixtures for HTTP-level tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use spasibka_api::app::build_app;
use spasibka_api::config::ServerConfig;
use spasibka_api::middleware::actor::ACTOR_HEADER;
use spasibka_api::state::AppState;
use spasibka_core::types::{BitrixId, Coins};
use spasibka_engine::{Engine, RewardPolicy};
use spasibka_events::{EventBus, RosterProvider};
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: String::new(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        db_lock_timeout_ms: 5_000,
        reward_coins: 100,
        game_end_grace_secs: 0,
        bitrix_webhook_url: None,
        roster_sync_interval_secs: 0,
        log_json: false,
    }
}

/// Build the full application router over `pool`, with the same middleware
/// stack production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_roster(pool, None)
}

pub fn build_test_app_with_roster(
    pool: PgPool,
    roster_provider: Option<Arc<dyn RosterProvider>>,
) -> Router {
    let engine = Engine::new(pool, RewardPolicy::default(), Arc::new(EventBus::default()));
    build_app(AppState {
        engine,
        config: Arc::new(test_config()),
        roster_provider,
    })
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    actor: Option<BitrixId>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header(ACTOR_HEADER, actor.to_string());
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_as(app: Router, uri: &str, actor: BitrixId) -> Response<Body> {
    send(app, Method::GET, uri, Some(actor), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_as(
    app: Router,
    uri: &str,
    actor: BitrixId,
    body: Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(actor), Some(body)).await
}

pub async fn post_as(app: Router, uri: &str, actor: BitrixId) -> Response<Body> {
    send(app, Method::POST, uri, Some(actor), None).await
}

pub async fn patch_json_as(
    app: Router,
    uri: &str,
    actor: BitrixId,
    body: Value,
) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(actor), Some(body)).await
}

pub async fn delete_as(app: Router, uri: &str, actor: BitrixId) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(actor), None).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

pub async fn seed_employee(pool: &PgPool, bitrix_id: BitrixId, coins: Coins, is_admin: bool) {
    sqlx::query(
        "INSERT INTO employees (bitrix_id, name, lastname, coins, is_admin) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(bitrix_id)
    .bind(format!("Name{bitrix_id}"))
    .bind(format!("Last{bitrix_id}"))
    .bind(coins)
    .bind(is_admin)
    .execute(pool)
    .await
    .unwrap();
}

/// JSON body for a game that is live right now.
pub fn live_game_body(limit_value: i32, limit_to_one_user: i32) -> Value {
    let now = Utc::now();
    serde_json::json!({
        "name": "Current game",
        "game_start": now - Duration::days(1),
        "game_end": now + Duration::days(30),
        "game_is_active": true,
        "limit_parameter": "game",
        "limit_value": limit_value,
        "limit_to_one_user": limit_to_one_user,
    })
}

pub async fn coins_of(pool: &PgPool, bitrix_id: BitrixId) -> Coins {
    sqlx::query_scalar("SELECT coins FROM employees WHERE bitrix_id = $1")
        .bind(bitrix_id)
        .fetch_one(pool)
        .await
        .unwrap()
}
