//! In-memory [`StallStore`] used when no database is configured.
//!
//! Implements the same contract as the Diesel adapter, including the unique
//! code constraint and the optimistic staleness check, so the service behaves
//! identically in tests and database-free wiring.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{Page, PageRequest, StallFilter, StallStore, StallStoreError};
use crate::domain::stall::{Stall, StallCode, StallId};

/// Map-backed stall store with the full port contract.
#[derive(Debug, Default)]
pub struct InMemoryStallStore {
    stalls: Mutex<HashMap<StallId, Stall>>,
}

impl InMemoryStallStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, HashMap<StallId, Stall>> {
        // A poisoned lock only means another test thread panicked mid-write;
        // the map itself is still usable.
        self.stalls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl StallStore for InMemoryStallStore {
    async fn find_by_id(&self, id: &StallId) -> Result<Option<Stall>, StallStoreError> {
        Ok(self.guard().get(id).cloned())
    }

    async fn find_by_code(&self, code: &StallCode) -> Result<Option<Stall>, StallStoreError> {
        Ok(self
            .guard()
            .values()
            .find(|stall| &stall.code == code)
            .cloned())
    }

    async fn save(
        &self,
        stall: &Stall,
        expected_updated_at: Option<DateTime<Utc>>,
    ) -> Result<Stall, StallStoreError> {
        let mut stalls = self.guard();
        match expected_updated_at {
            None => {
                if stalls.values().any(|existing| existing.code == stall.code) {
                    return Err(StallStoreError::DuplicateCode {
                        code: stall.code.clone(),
                    });
                }
                stalls.insert(stall.id, stall.clone());
                Ok(stall.clone())
            }
            Some(expected) => {
                let Some(existing) = stalls.get_mut(&stall.id) else {
                    return Err(StallStoreError::query("stall missing for update"));
                };
                if existing.updated_at != expected {
                    return Err(StallStoreError::Stale { id: stall.id });
                }
                *existing = stall.clone();
                Ok(stall.clone())
            }
        }
    }

    async fn find_by_filters(
        &self,
        filter: &StallFilter,
        page: PageRequest,
    ) -> Result<Page<Stall>, StallStoreError> {
        let stalls = self.guard();
        let mut matching: Vec<Stall> = stalls
            .values()
            .filter(|stall| filter.matches(stall))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.code.as_str().cmp(b.code.as_str()));

        let total_elements = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.per_page() as usize)
            .collect();

        Ok(Page {
            items,
            page: page.page(),
            per_page: page.per_page(),
            total_elements,
        })
    }
}
