//! Broadcast channel implementation of the stall event sink.
//!
//! Fans stall lifecycle events out to in-process subscribers over a tokio
//! broadcast channel. Publishing never blocks: a full channel drops the
//! oldest event for lagging receivers, and having no receivers at all is not
//! an error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::ports::{EventSinkError, StallEventSink};
use crate::domain::stall::{Stall, StallId, StallStatus};

/// A stall lifecycle notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StallEvent {
    /// The stall returned to the available pool.
    Released {
        /// Identifier of the stall.
        id: StallId,
        /// Code of the stall, for subscribers that key on it.
        code: String,
        /// When the transition persisted.
        at: DateTime<Utc>,
    },
    /// The stall was firmly reserved.
    Reserved {
        /// Identifier of the stall.
        id: StallId,
        /// Code of the stall, for subscribers that key on it.
        code: String,
        /// When the transition persisted.
        at: DateTime<Utc>,
    },
}

impl StallEvent {
    fn released(stall: &Stall) -> Self {
        Self::Released {
            id: stall.id,
            code: stall.code.as_str().to_owned(),
            at: stall.updated_at,
        }
    }

    fn reserved(stall: &Stall) -> Self {
        Self::Reserved {
            id: stall.id,
            code: stall.code.as_str().to_owned(),
            at: stall.updated_at,
        }
    }
}

/// Event sink backed by a tokio broadcast channel.
pub struct BroadcastEventSink {
    sender: broadcast::Sender<StallEvent>,
}

impl BroadcastEventSink {
    /// Default channel capacity; lagging receivers past this lose events.
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Create a sink with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a sink with an explicit channel capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<StallEvent> {
        self.sender.subscribe()
    }

    fn send(&self, event: StallEvent) {
        debug!(?event, "publishing stall event");
        // SendError only means nobody is listening right now; events are
        // best effort so that is fine.
        if self.sender.send(event).is_err() {
            debug!("stall event dropped: no subscribers");
        }
    }
}

impl Default for BroadcastEventSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StallEventSink for BroadcastEventSink {
    async fn publish_released(&self, stall: &Stall) -> Result<(), EventSinkError> {
        debug_assert_eq!(stall.status, StallStatus::Available);
        self.send(StallEvent::released(stall));
        Ok(())
    }

    async fn publish_reserved(&self, stall: &Stall) -> Result<(), EventSinkError> {
        debug_assert_eq!(stall.status, StallStatus::Reserved);
        self.send(StallEvent::reserved(stall));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stall::{StallCode, StallSize};
    use bigdecimal::BigDecimal;

    fn stall_with_status(status: StallStatus) -> Stall {
        let now = Utc::now();
        Stall {
            id: StallId::random(),
            code: StallCode::new("A-001").expect("valid code"),
            size: StallSize::Small,
            location: "Hall A".to_owned(),
            price: BigDecimal::from(100),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let sink = BroadcastEventSink::new();
        let mut receiver = sink.subscribe();
        let stall = stall_with_status(StallStatus::Reserved);

        sink.publish_reserved(&stall).await.expect("publish");

        let event = receiver.recv().await.expect("event delivered");
        assert_eq!(
            event,
            StallEvent::Reserved {
                id: stall.id,
                code: "A-001".to_owned(),
                at: stall.updated_at,
            }
        );
    }

    #[tokio::test]
    async fn publishing_without_subscribers_succeeds() {
        let sink = BroadcastEventSink::new();
        let stall = stall_with_status(StallStatus::Available);
        sink.publish_released(&stall).await.expect("publish");
    }

    #[tokio::test]
    async fn each_subscriber_gets_its_own_copy() {
        let sink = BroadcastEventSink::new();
        let mut first = sink.subscribe();
        let mut second = sink.subscribe();
        let stall = stall_with_status(StallStatus::Available);

        sink.publish_released(&stall).await.expect("publish");

        assert!(first.recv().await.is_ok());
        assert!(second.recv().await.is_ok());
    }
}
