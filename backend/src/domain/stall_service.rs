//! Stall lifecycle domain service.
//!
//! Implements the driving ports over an injected [`StallStore`] and
//! [`StallEventSink`]. Every operation is a bounded load-decide-persist
//! sequence; saves carry the `updated_at` value observed at load time so a
//! concurrent writer surfaces as [`Error::Conflict`] instead of a silent
//! lost update.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};

use crate::domain::Error;
use crate::domain::ports::{
    Page, PageRequest, StallCommand, StallEventSink, StallFilter, StallQuery, StallStore,
    StallStoreError,
};
use crate::domain::stall::{NewStall, Stall, StallId, StallPatch, StallStatus, Transition};

/// Domain service owning all stall state-transition logic.
///
/// Construction is plain dependency injection; the service holds no state of
/// its own beyond the two collaborators.
#[derive(Clone)]
pub struct StallService<S, E> {
    store: Arc<S>,
    events: Arc<E>,
}

impl<S, E> StallService<S, E> {
    /// Create a new service with the given collaborators.
    pub fn new(store: Arc<S>, events: Arc<E>) -> Self {
        Self { store, events }
    }
}

impl<S, E> StallService<S, E>
where
    S: StallStore,
    E: StallEventSink,
{
    fn map_store_error(error: StallStoreError) -> Error {
        match error {
            StallStoreError::Connection { message } => Error::unavailable(message),
            StallStoreError::Query { message } => Error::internal(message),
            StallStoreError::DuplicateCode { code } => Error::duplicate_code(code),
            StallStoreError::Stale { id } => Error::conflict(id),
        }
    }

    async fn load(&self, id: &StallId) -> Result<Stall, Error> {
        self.store
            .find_by_id(id)
            .await
            .map_err(Self::map_store_error)?
            .ok_or(Error::NotFound { id: *id })
    }

    /// Shared transition algorithm for hold, release, and reserve.
    ///
    /// Already at the target status is a pure read: no persistence, no
    /// event. That keeps repeated calls over an unreliable channel free of
    /// side effects and duplicate notifications.
    async fn apply_transition(&self, id: &StallId, transition: Transition) -> Result<Stall, Error> {
        let stall = self.load(id).await?;

        if stall.status == transition.target() {
            debug!(
                stall_id = %stall.id,
                transition = transition.verb(),
                "transition is a no-op; stall already at target status"
            );
            return Ok(stall);
        }

        if !transition.accepts(stall.status) {
            return Err(Error::invalid_transition(stall.status, transition));
        }

        let loaded_at = stall.updated_at;
        let mut next = stall;
        next.status = transition.target();
        next.updated_at = Utc::now();

        let persisted = self
            .store
            .save(&next, Some(loaded_at))
            .await
            .map_err(Self::map_store_error)?;

        self.notify(transition, &persisted).await;
        Ok(persisted)
    }

    /// Best-effort notification. Sink failures are logged, never surfaced.
    async fn notify(&self, transition: Transition, stall: &Stall) {
        let result = match transition {
            Transition::Hold => return,
            Transition::Release => self.events.publish_released(stall).await,
            Transition::Reserve => self.events.publish_reserved(stall).await,
        };
        if let Err(error) = result {
            warn!(
                stall_id = %stall.id,
                transition = transition.verb(),
                error = %error,
                "event publish failed; transition already persisted"
            );
        }
    }
}

#[async_trait]
impl<S, E> StallQuery for StallService<S, E>
where
    S: StallStore,
    E: StallEventSink,
{
    async fn list(&self, filter: StallFilter, page: PageRequest) -> Result<Page<Stall>, Error> {
        self.store
            .find_by_filters(&filter, page)
            .await
            .map_err(Self::map_store_error)
    }

    async fn get(&self, id: &StallId) -> Result<Stall, Error> {
        self.load(id).await
    }
}

#[async_trait]
impl<S, E> StallCommand for StallService<S, E>
where
    S: StallStore,
    E: StallEventSink,
{
    async fn create(&self, new_stall: NewStall) -> Result<Stall, Error> {
        if let Some(existing) = self
            .store
            .find_by_code(&new_stall.code)
            .await
            .map_err(Self::map_store_error)?
        {
            return Err(Error::duplicate_code(existing.code));
        }

        let now = Utc::now();
        let stall = Stall {
            id: StallId::random(),
            code: new_stall.code,
            size: new_stall.size,
            location: new_stall.location,
            price: new_stall.price,
            status: StallStatus::Available,
            created_at: now,
            updated_at: now,
        };

        self.store
            .save(&stall, None)
            .await
            .map_err(Self::map_store_error)
    }

    async fn update(&self, id: &StallId, patch: StallPatch) -> Result<Stall, Error> {
        let stall = self.load(id).await?;

        // An empty patch is a pure read: nothing to change, so nothing is
        // persisted and `updated_at` stays put.
        if patch.is_empty() {
            debug!(stall_id = %stall.id, "empty patch; returning current snapshot");
            return Ok(stall);
        }

        let loaded_at = stall.updated_at;

        let mut next = stall;
        if let Some(location) = patch.location {
            next.location = location;
        }
        if let Some(price) = patch.price {
            next.price = price;
        }
        if let Some(size) = patch.size {
            next.size = size;
        }
        next.updated_at = Utc::now();

        self.store
            .save(&next, Some(loaded_at))
            .await
            .map_err(Self::map_store_error)
    }

    async fn hold(&self, id: &StallId) -> Result<Stall, Error> {
        self.apply_transition(id, Transition::Hold).await
    }

    async fn release(&self, id: &StallId) -> Result<Stall, Error> {
        self.apply_transition(id, Transition::Release).await
    }

    async fn reserve(&self, id: &StallId) -> Result<Stall, Error> {
        self.apply_transition(id, Transition::Reserve).await
    }
}
