//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Ports describe how the domain expects to interact with adapters. Driven
//! ports ([`StallStore`], [`StallEventSink`]) are implemented by outbound
//! adapters; driving ports ([`StallQuery`], [`StallCommand`]) are implemented
//! by the domain service and consumed by inbound adapters. Each trait exposes
//! strongly typed errors so adapters map their failures into predictable
//! variants instead of returning `anyhow::Result`.

mod event_sink;
mod page;
mod stall_command;
mod stall_query;
mod stall_store;

#[cfg(test)]
pub use event_sink::MockStallEventSink;
pub use event_sink::{EventSinkError, NoOpStallEventSink, StallEventSink};
pub use page::{Page, PageRequest};
#[cfg(test)]
pub use stall_command::MockStallCommand;
pub use stall_command::StallCommand;
#[cfg(test)]
pub use stall_query::MockStallQuery;
pub use stall_query::StallQuery;
#[cfg(test)]
pub use stall_store::MockStallStore;
pub use stall_store::{StallFilter, StallStore, StallStoreError};
