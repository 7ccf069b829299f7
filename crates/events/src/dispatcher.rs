//! Turns committed rewards into recipient notifications.
//!
//! [`NotificationDispatcher`] subscribes to the [`EventBus`](crate::EventBus)
//! and asks its [`Notifier`] to tell each like recipient. Delivery is
//! best-effort: the reward is already committed when the event arrives, so
//! failures are logged and dropped.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::bus::{PlatformEvent, RewardSent};
use crate::delivery::Notifier;

pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Run the dispatch loop until the bus is dropped.
    pub async fn run(&self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.handle(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification dispatcher lagged, events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification dispatcher shutting down");
                    break;
                }
            }
        }
    }

    pub async fn handle(&self, event: &PlatformEvent) {
        match event {
            PlatformEvent::RewardSent(reward) => self.notify_recipient(reward).await,
        }
    }

    async fn notify_recipient(&self, reward: &RewardSent) {
        let text = reward.notification_text();
        match self.notifier.notify(reward.recipient_id, &text).await {
            Ok(()) => tracing::debug!(
                like_id = reward.like_id,
                recipient_id = reward.recipient_id,
                "Notification sent"
            ),
            Err(e) => tracing::error!(
                like_id = reward.like_id,
                recipient_id = reward.recipient_id,
                error = %e,
                "Failed to notify like recipient"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use spasibka_core::types::BitrixId;

    use super::*;
    use crate::bus::EventBus;
    use crate::delivery::bitrix::BitrixError;

    #[derive(Default)]
    struct Recording {
        sent: Mutex<Vec<(BitrixId, String)>>,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for Recording {
        async fn notify(&self, recipient: BitrixId, text: &str) -> Result<(), BitrixError> {
            self.sent.lock().unwrap().push((recipient, text.to_string()));
            if self.fail {
                return Err(BitrixError::HttpStatus(500));
            }
            Ok(())
        }
    }

    fn reward_event(recipient_id: BitrixId, message: Option<&str>) -> PlatformEvent {
        PlatformEvent::RewardSent(RewardSent {
            like_id: 1,
            game_id: 1,
            sender_id: 1,
            sender_name: "Petrova Anna".into(),
            recipient_id,
            message: message.map(str::to_string),
            coins: 100,
            created_at: Utc.with_ymd_and_hms(2025, 6, 11, 12, 0, 0).unwrap(),
        })
    }

    #[tokio::test]
    async fn reward_is_delivered_to_its_recipient() {
        let notifier = Arc::new(Recording::default());
        let dispatcher = NotificationDispatcher::new(notifier.clone());

        dispatcher.handle(&reward_event(2, Some("thanks"))).await;

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], (2, "Petrova Anna sent you a like: thanks".to_string()));
    }

    #[tokio::test]
    async fn failures_do_not_stop_the_loop() {
        let notifier = Arc::new(Recording {
            fail: true,
            ..Default::default()
        });
        let dispatcher = NotificationDispatcher::new(notifier.clone());
        let bus = EventBus::default();
        let rx = bus.subscribe();

        bus.publish(reward_event(2, None));
        bus.publish(reward_event(3, Some("again")));
        drop(bus);

        dispatcher.run(rx).await;
        let recipients: Vec<_> = notifier.sent.lock().unwrap().iter().map(|s| s.0).collect();
        assert_eq!(recipients, vec![2, 3]);
    }

    #[tokio::test]
    async fn loop_survives_lag() {
        let notifier = Arc::new(Recording::default());
        let dispatcher = NotificationDispatcher::new(notifier.clone());
        let bus = EventBus::new(1);
        let rx = bus.subscribe();

        bus.publish(reward_event(2, None));
        bus.publish(reward_event(3, None));
        drop(bus);

        dispatcher.run(rx).await;
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, 3);
    }
}
