//! Tunables that shape reward behaviour.

use chrono::Duration;
use spasibka_core::game::DEFAULT_GAME_END_GRACE_SECS;
use spasibka_core::types::Coins;

/// Coins credited per received like when nothing is configured.
pub const DEFAULT_REWARD_COINS: Coins = 100;

/// Largest per-like credit a deployment may configure.
pub const MAX_REWARD_COINS: Coins = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardPolicy {
    /// Coins credited to the recipient of each like.
    pub coins_per_like: Coins,
    /// Tolerance past `game_end` during which likes are still accepted.
    pub game_end_grace: Duration,
}

impl Default for RewardPolicy {
    fn default() -> Self {
        Self {
            coins_per_like: DEFAULT_REWARD_COINS,
            game_end_grace: Duration::seconds(DEFAULT_GAME_END_GRACE_SECS),
        }
    }
}
