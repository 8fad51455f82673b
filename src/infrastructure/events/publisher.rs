//! Event Publisher Implementation
//!
//! 朗读事件广播，供 WebSocket 推送

use tokio::sync::broadcast;

use crate::application::ports::NarrationEventsPort;
use crate::domain::narration::NarrationEvent;

/// 事件通道容量
const CHANNEL_CAPACITY: usize = 256;

/// 事件发布器
pub struct EventPublisher {
    channel: broadcast::Sender<NarrationEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { channel: tx }
    }

    /// 订阅朗读事件
    pub fn subscribe(&self) -> broadcast::Receiver<NarrationEvent> {
        self.channel.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.channel.receiver_count()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl NarrationEventsPort for EventPublisher {
    fn publish(&self, event: NarrationEvent) {
        if let Err(e) = self.channel.send(event) {
            tracing::trace!(
                session_id = %e.0.session_id(),
                "Narration event dropped (no receivers)"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_events() {
        let publisher = EventPublisher::new();
        let mut rx = publisher.subscribe();

        publisher.publish(NarrationEvent::LineFinished {
            session_id: "s1".to_string(),
            line_index: 0,
        });

        let event = rx.recv().await.unwrap();
        assert_eq!(event.session_id(), "s1");
    }

    #[test]
    fn test_publish_without_receivers_is_silent() {
        let publisher = EventPublisher::new();
        assert_eq!(publisher.receiver_count(), 0);
        publisher.publish(NarrationEvent::LineFinished {
            session_id: "s1".to_string(),
            line_index: 0,
        });
    }
}
