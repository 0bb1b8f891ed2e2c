//! Driving port for read-only stall operations.

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::stall::{Stall, StallId};

use super::page::{Page, PageRequest};
use super::stall_store::StallFilter;

/// Read-side operations exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StallQuery: Send + Sync {
    /// Filtered, paged listing of stalls.
    async fn list(&self, filter: StallFilter, page: PageRequest) -> Result<Page<Stall>, Error>;

    /// Fetch a single stall, failing with [`Error::NotFound`] when absent.
    async fn get(&self, id: &StallId) -> Result<Stall, Error>;
}
