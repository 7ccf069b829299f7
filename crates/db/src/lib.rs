//! Postgres persistence for Spasibka.
//!
//! Connection pool setup, migrations, row models and repositories.

use sqlx::postgres::PgPoolOptions;
use sqlx::Executor;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Pool tuning read from configuration.
#[derive(Debug, Clone, Copy)]
pub struct PoolSettings {
    pub max_connections: u32,
    /// Applied as `SET lock_timeout` on every new connection so a contended
    /// row lock fails instead of blocking forever.
    pub lock_timeout_ms: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 20,
            lock_timeout_ms: 5_000,
        }
    }
}

/// Create a connection pool from a database URL.
pub async fn create_pool(
    database_url: &str,
    settings: PoolSettings,
) -> Result<DbPool, sqlx::Error> {
    let lock_timeout_ms = settings.lock_timeout_ms;
    tracing::debug!(
        max_connections = settings.max_connections,
        lock_timeout_ms,
        "Creating database pool"
    );
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .after_connect(move |conn, _meta| {
            Box::pin(async move {
                let stmt = format!("SET lock_timeout = {lock_timeout_ms}");
                conn.execute(stmt.as_str()).await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
