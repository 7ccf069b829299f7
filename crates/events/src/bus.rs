//! In-process event bus for committed domain changes.
//!
//! The engine publishes a [`PlatformEvent`] only after the transaction that
//! produced it has committed, so subscribers never observe rolled-back work.

use serde::{Deserialize, Serialize};
use spasibka_core::types::{BitrixId, Coins, DbId, Timestamp};
use tokio::sync::broadcast;

/// Events retained for slow subscribers before they start lagging.
const DEFAULT_CAPACITY: usize = 1024;

/// A like that has been committed and credited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSent {
    pub like_id: DbId,
    pub game_id: DbId,
    pub sender_id: BitrixId,
    /// "Lastname Name" of the sender at commit time.
    pub sender_name: String,
    pub recipient_id: BitrixId,
    pub message: Option<String>,
    pub coins: Coins,
    pub created_at: Timestamp,
}

impl RewardSent {
    /// Notification body shown to the recipient.
    pub fn notification_text(&self) -> String {
        match self.message.as_deref().map(str::trim) {
            Some(message) if !message.is_empty() => {
                format!("{} sent you a like: {message}", self.sender_name)
            }
            _ => format!("{} sent you a like!", self.sender_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlatformEvent {
    RewardSent(RewardSent),
}

impl PlatformEvent {
    /// Dotted name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            PlatformEvent::RewardSent(_) => "reward.sent",
        }
    }
}

/// Fan-out hub shared as `Arc<EventBus>` by the engine and its consumers.
pub struct EventBus {
    sender: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Returns how many subscribers received the event. Zero is not an error.
    pub fn publish(&self, event: PlatformEvent) -> usize {
        let name = event.name();
        let delivered = self.sender.send(event).unwrap_or(0);
        tracing::trace!(event = name, delivered, "Event published");
        delivered
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
