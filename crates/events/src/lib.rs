//! Spasibka event bus and Bitrix24 integration.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`]: committed domain changes, currently [`RewardSent`].
//! - [`delivery`]: the [`Notifier`] seam and its Bitrix24 implementation.
//! - [`roster`]: the [`RosterProvider`] seam for employee directory sync.
//! - [`NotificationDispatcher`]: background consumer turning committed
//!   rewards into notifications.

pub mod bus;
pub mod delivery;
pub mod dispatcher;
pub mod roster;

pub use bus::{EventBus, PlatformEvent, RewardSent};
pub use delivery::bitrix::{BitrixClient, BitrixError};
pub use delivery::Notifier;
pub use dispatcher::NotificationDispatcher;
pub use roster::{RosterEntry, RosterProvider};
