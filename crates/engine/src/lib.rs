//! Transactional core of Spasibka.
//!
//! [`Engine`] owns the pool, the reward policy and the event bus. Its
//! operations are split by concern:
//!
//! - [`resolver`]: which game (if any) accepts likes right now.
//! - [`reward`]: eligibility checks and the reward commit.
//! - [`purchase`]: the purchase commit and purchase history.
//! - [`rating`]: per-game and overall leaderboards.
//! - [`games`], [`items`], [`employees`]: administrative paths.
//! - [`roster`]: employee directory sync and its scheduler.
//!
//! Every mutation runs in a single `sqlx` transaction. Returning early (or
//! propagating with `?`) drops the transaction, which rolls it back.

pub mod employees;
pub mod error;
pub mod games;
pub mod items;
pub mod policy;
pub mod purchase;
pub mod rating;
pub mod resolver;
pub mod reward;
pub mod roster;

use std::sync::Arc;

use spasibka_db::DbPool;
use spasibka_events::EventBus;

pub use error::EngineError;
pub use policy::RewardPolicy;

/// Shared handle to the engine. Cheap to clone.
#[derive(Clone)]
pub struct Engine {
    pool: DbPool,
    policy: RewardPolicy,
    event_bus: Arc<EventBus>,
}

impl Engine {
    pub fn new(pool: DbPool, policy: RewardPolicy, event_bus: Arc<EventBus>) -> Self {
        Self {
            pool,
            policy,
            event_bus,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn policy(&self) -> &RewardPolicy {
        &self.policy
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }
}
