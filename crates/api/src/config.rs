use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

use spasibka_core::game::{DEFAULT_GAME_END_GRACE_SECS, MAX_GAME_END_GRACE_SECS};
use spasibka_core::types::Coins;
use spasibka_db::PoolSettings;
use spasibka_engine::policy::{DEFAULT_REWARD_COINS, MAX_REWARD_COINS};
use spasibka_engine::RewardPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// Everything except `DATABASE_URL` has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    pub database_url: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub db_max_connections: u32,
    pub db_lock_timeout_ms: u64,
    /// Coins credited per received like.
    pub reward_coins: Coins,
    /// Seconds past `game_end` during which likes are still accepted.
    pub game_end_grace_secs: i64,
    /// Bitrix24 inbound webhook base. `None` disables notifications and
    /// roster sync.
    pub bitrix_webhook_url: Option<String>,
    /// `0` disables the periodic roster sync.
    pub roster_sync_interval_secs: u64,
    /// `json` switches the log formatter to JSON lines.
    pub log_json: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                    |
    /// |-----------------------------|----------------------------|
    /// | `DATABASE_URL`              | required                   |
    /// | `HOST`                      | `0.0.0.0`                  |
    /// | `PORT`                      | `3000`                     |
    /// | `CORS_ORIGINS`              | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                       |
    /// | `DB_MAX_CONNECTIONS`        | `20`                       |
    /// | `DB_LOCK_TIMEOUT_MS`        | `5000`                     |
    /// | `REWARD_COINS`              | `100` (0..=1000000)        |
    /// | `GAME_END_GRACE_SECS`       | `0` (0..=31622400)         |
    /// | `BITRIX_WEBHOOK_URL`        | unset                      |
    /// | `ROSTER_SYNC_INTERVAL_SECS` | `0`                        |
    /// | `LOG_FORMAT`                | `text`                     |
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let pool_defaults = PoolSettings::default();

        let bitrix_webhook_url = std::env::var("BITRIX_WEBHOOK_URL")
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let log_json = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            host,
            port: env_or("PORT", 3000)?,
            database_url,
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30)?,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", pool_defaults.max_connections)?,
            db_lock_timeout_ms: env_or("DB_LOCK_TIMEOUT_MS", pool_defaults.lock_timeout_ms)?,
            reward_coins: env_in_range(
                "REWARD_COINS",
                DEFAULT_REWARD_COINS,
                0..=MAX_REWARD_COINS,
            )?,
            game_end_grace_secs: env_in_range(
                "GAME_END_GRACE_SECS",
                DEFAULT_GAME_END_GRACE_SECS,
                0..=MAX_GAME_END_GRACE_SECS,
            )?,
            bitrix_webhook_url,
            roster_sync_interval_secs: env_or("ROSTER_SYNC_INTERVAL_SECS", 0)?,
            log_json,
        })
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            lock_timeout_ms: self.db_lock_timeout_ms,
        }
    }

    pub fn reward_policy(&self) -> RewardPolicy {
        RewardPolicy {
            coins_per_like: self.reward_coins,
            game_end_grace: chrono::Duration::seconds(self.game_end_grace_secs),
        }
    }
}

/// Parse `var` when set, fall back to `default` otherwise.
fn env_or<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { var, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Like [`env_or`], rejecting values outside `range`.
fn env_in_range<T>(
    var: &'static str,
    default: T,
    range: RangeInclusive<T>,
) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Display,
{
    let value = env_or(var, default)?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::Invalid {
            var,
            value: value.to_string(),
        })
    }
}
