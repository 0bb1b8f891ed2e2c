//! Domain layer: the stall aggregate, its lifecycle service, and the ports
//! at the edges of the hexagon.
//!
//! Everything here is transport and persistence agnostic. Inbound adapters
//! call the driving ports ([`ports::StallQuery`], [`ports::StallCommand`]);
//! outbound adapters implement the driven ports ([`ports::StallStore`],
//! [`ports::StallEventSink`]).

pub mod error;
pub mod ports;
pub mod stall;
pub mod stall_service;


pub use self::error::Error;
pub use self::stall::{
    NewStall, ParseStallSizeError, ParseStallStatusError, Stall, StallCode,
    StallCodeValidationError, StallId, StallPatch, StallSize, StallStatus, Transition,
};
pub use self::stall_service::StallService;
