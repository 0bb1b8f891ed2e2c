//! Driving port for mutating stall operations.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::stall::{NewStall, Stall, StallId, StallPatch};

/// Write-side operations exposed to inbound adapters.
///
/// The three transition operations are idempotent: calling one when the
/// stall is already at the target status returns the current snapshot
/// without persisting or notifying.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StallCommand: Send + Sync {
    /// Create a stall. Status is forced to AVAILABLE; a code already in use
    /// fails with [`Error::DuplicateCode`] before anything persists.
    async fn create(&self, new_stall: NewStall) -> Result<Stall, Error>;

    /// Partially update location, price, and size. Code and status are never
    /// touched; an empty patch returns the current snapshot without
    /// persisting.
    async fn update(&self, id: &StallId, patch: StallPatch) -> Result<Stall, Error>;

    /// Soft-claim an AVAILABLE stall (AVAILABLE → HELD). Emits no event.
    async fn hold(&self, id: &StallId) -> Result<Stall, Error>;

    /// Return an occupied stall to the pool (HELD or RESERVED → AVAILABLE).
    /// Emits a released event when a transition actually happens.
    async fn release(&self, id: &StallId) -> Result<Stall, Error>;

    /// Firmly book a HELD stall (HELD → RESERVED). Emits a reserved event
    /// when a transition actually happens.
    async fn reserve(&self, id: &StallId) -> Result<Stall, Error>;
}
