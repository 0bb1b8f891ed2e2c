//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the domain's driving ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{StallCommand, StallQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Write-side operations (create, update, transitions).
    pub stalls: Arc<dyn StallCommand>,
    /// Read-side operations (list, get).
    pub stalls_query: Arc<dyn StallQuery>,
}

impl HttpState {
    /// Bundle the driving ports for handler injection.
    pub fn new(stalls: Arc<dyn StallCommand>, stalls_query: Arc<dyn StallQuery>) -> Self {
        Self {
            stalls,
            stalls_query,
        }
    }
}
