//! Notification bus implementation using tokio broadcast channels

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::types::NotificationEnvelope;

/// Capacity for the broadcast channel
const DEFAULT_CAPACITY: usize = 1000;

/// Fire-and-forget notification bus. Publishing never blocks the
/// publisher; a notification with no subscribers is dropped.
#[derive(Clone)]
pub struct NotificationBus {
    sender: broadcast::Sender<NotificationEnvelope>,
    /// Number of notifications published (for monitoring)
    published: Arc<AtomicUsize>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            published: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Publish a notification to all subscribers.
    ///
    /// Returns the number of subscribers that received it; 0 means the
    /// notification was dropped.
    pub fn publish(&self, envelope: NotificationEnvelope) -> usize {
        self.published.fetch_add(1, Ordering::Relaxed);
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to notifications published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEnvelope> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub fn published_count(&self) -> usize {
        self.published.load(Ordering::Relaxed)
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationBus")
            .field("subscriber_count", &self.subscriber_count())
            .field("published_count", &self.published_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Notification;
    use uuid::Uuid;

    fn enrollment_created() -> Notification {
        Notification::EnrollmentCreated {
            enrollment_id: Uuid::new_v4(),
            student_id: Uuid::new_v4(),
            module_id: Uuid::new_v4(),
            batch_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn test_publish_subscribe() {
        let bus = NotificationBus::new();
        let mut rx = bus.subscribe();

        let envelope = NotificationEnvelope::new(Uuid::new_v4(), enrollment_created());

        let sent = bus.publish(envelope.clone());
        assert_eq!(sent, 1);

        let received = rx.recv().await.unwrap();
        assert_eq!(received.id, envelope.id);
    }

    #[tokio::test]
    async fn test_no_subscribers_drops_notification() {
        let bus = NotificationBus::new();

        let sent = bus.publish(NotificationEnvelope::new(
            Uuid::new_v4(),
            enrollment_created(),
        ));
        assert_eq!(sent, 0);
        assert_eq!(bus.published_count(), 1);
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let bus = NotificationBus::new();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let envelope = NotificationEnvelope::new(Uuid::new_v4(), enrollment_created());
        let envelope_id = envelope.id;

        let sent = bus.publish(envelope);
        assert_eq!(sent, 2);

        assert_eq!(rx1.recv().await.unwrap().id, envelope_id);
        assert_eq!(rx2.recv().await.unwrap().id, envelope_id);
    }

    #[test]
    fn test_clone_shares_channel() {
        let bus1 = NotificationBus::new();
        let bus2 = bus1.clone();

        let _rx = bus2.subscribe();
        assert_eq!(bus1.subscriber_count(), 1);
    }
}
