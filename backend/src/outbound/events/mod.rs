//! Event sink adapters for stall lifecycle notifications.

mod broadcast;

pub use broadcast::{BroadcastEventSink, StallEvent};
