//! Port for stall lifecycle notifications.
//!
//! Events are best effort: the service logs a failed publish and carries on.
//! A slow or broken sink must never fail or block a transition, so adapters
//! are expected to hand off quickly (channel send, spawn) rather than await
//! delivery.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::stall::Stall;

/// Errors raised by event sink adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventSinkError {
    /// The sink rejected or could not accept the event.
    #[error("event publish failed: {message}")]
    Publish {
        /// Adapter-supplied diagnostic.
        message: String,
    },
}

impl EventSinkError {
    /// Helper for publish failures.
    pub fn publish(message: impl Into<String>) -> Self {
        Self::Publish {
            message: message.into(),
        }
    }
}

/// Notification port for stall lifecycle transitions.
///
/// Only release and reserve transitions notify; hold is silent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StallEventSink: Send + Sync {
    /// A stall returned to the available pool.
    async fn publish_released(&self, stall: &Stall) -> Result<(), EventSinkError>;

    /// A stall was firmly reserved.
    async fn publish_reserved(&self, stall: &Stall) -> Result<(), EventSinkError>;
}

/// Sink that drops all events. Use it in tests and wiring where
/// notifications are not under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpStallEventSink;

#[async_trait]
impl StallEventSink for NoOpStallEventSink {
    async fn publish_released(&self, _stall: &Stall) -> Result<(), EventSinkError> {
        Ok(())
    }

    async fn publish_reserved(&self, _stall: &Stall) -> Result<(), EventSinkError> {
        Ok(())
    }
}
