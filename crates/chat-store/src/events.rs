//! Change notifications for live read subscriptions.
//!
//! Every successful write through [`crate::repository::ChatRepository`]
//! publishes a [`StoreEvent`] describing the affected scope. Consumers
//! subscribe, re-query on each event, and cancel by dropping the receiver.

use tokio::sync::broadcast;

/// Default event buffer per subscriber. A lagging subscriber sees
/// `RecvError::Lagged` and should re-query rather than replay.
const DEFAULT_CAPACITY: usize = 256;

/// Scope of a completed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// One or more user rows changed.
    Users,
    /// One or more conversation rows changed.
    Conversations,
    /// Messages changed within one conversation.
    Messages { conversation_id: String },
    /// Membership changed within one conversation.
    Participants { conversation_id: String },
}

/// Fan-out point for store events.
///
/// Publishing never blocks the writer: the broadcast channel drops the
/// oldest events for subscribers that fall behind.
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<StoreEvent>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Open a new subscription. Dropping the receiver tears it down.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: StoreEvent) {
        if let Err(err) = self.tx.send(event) {
            // Only fails when nobody is subscribed.
            tracing::trace!(event = ?err.0, "store event dropped, no subscribers");
        }
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let notifier = ChangeNotifier::new();
        let mut rx = notifier.subscribe();

        notifier.publish(StoreEvent::Users);
        notifier.publish(StoreEvent::Messages {
            conversation_id: "conv_1".to_string(),
        });

        assert_eq!(rx.recv().await.unwrap(), StoreEvent::Users);
        assert_eq!(
            rx.recv().await.unwrap(),
            StoreEvent::Messages {
                conversation_id: "conv_1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_no_op() {
        let notifier = ChangeNotifier::new();
        notifier.publish(StoreEvent::Conversations);

        // A subscription opened afterwards sees only later events.
        let mut rx = notifier.subscribe();
        notifier.publish(StoreEvent::Users);
        assert_eq!(rx.recv().await.unwrap(), StoreEvent::Users);
    }
}
