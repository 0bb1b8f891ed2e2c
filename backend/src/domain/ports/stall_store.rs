//! Port for stall persistence.
//!
//! The [`StallStore`] trait is the single durability boundary of the stall
//! lifecycle. Adapters provide lookup by identifier and by unique code,
//! insert/update with an optimistic staleness check, and a filtered paged
//! listing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::stall::{Stall, StallCode, StallId, StallSize, StallStatus};

use super::page::{Page, PageRequest};

/// Optional listing predicates. Any filter left unset matches all values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StallFilter {
    /// Match only stalls in this lifecycle state.
    pub status: Option<StallStatus>,
    /// Match only stalls of this size.
    pub size: Option<StallSize>,
    /// Case-insensitive substring match on the location.
    pub location: Option<String>,
}

impl StallFilter {
    /// Evaluate the filter against a single stall.
    ///
    /// Adapters that can push predicates into their query engine should do
    /// so; this method is the reference semantics and what the in-memory
    /// adapter uses directly.
    pub fn matches(&self, stall: &Stall) -> bool {
        if let Some(status) = self.status {
            if stall.status != status {
                return false;
            }
        }
        if let Some(size) = self.size {
            if stall.size != size {
                return false;
            }
        }
        if let Some(location) = &self.location {
            let haystack = stall.location.to_lowercase();
            if !haystack.contains(&location.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Errors raised by stall store adapters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StallStoreError {
    /// Store connection could not be established.
    #[error("stall store connection failed: {message}")]
    Connection {
        /// Adapter-supplied diagnostic.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("stall store query failed: {message}")]
    Query {
        /// Adapter-supplied diagnostic.
        message: String,
    },
    /// Insert violated the unique code constraint. This is the storage-level
    /// backstop behind the service's find-by-code check; it fires only when
    /// two creates race.
    #[error("stall code {code} already persisted")]
    DuplicateCode {
        /// The conflicting code.
        code: StallCode,
    },
    /// Optimistic staleness check failed: the row changed after it was
    /// loaded.
    #[error("stall {id} is stale; reload and retry")]
    Stale {
        /// Identifier of the contended stall.
        id: StallId,
    },
}

impl StallStoreError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for the stall aggregate.
///
/// # Save semantics
///
/// - `expected_updated_at = None` inserts a brand new stall.
/// - `expected_updated_at = Some(ts)` updates an existing stall only if its
///   persisted `updated_at` still equals `ts` (the value observed at load
///   time). A mismatch returns [`StallStoreError::Stale`] and leaves the row
///   untouched, so a load-decide-persist sequence either fully applies or
///   fully fails.
///
/// `save` returns the persisted snapshot so callers observe exactly what was
/// written.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StallStore: Send + Sync {
    /// Fetch a stall by identifier. `None` when no such stall exists.
    async fn find_by_id(&self, id: &StallId) -> Result<Option<Stall>, StallStoreError>;

    /// Fetch a stall by its unique code. `None` when the code is unused.
    async fn find_by_code(&self, code: &StallCode) -> Result<Option<Stall>, StallStoreError>;

    /// Insert or update a stall, with an optimistic staleness check on
    /// update.
    async fn save(
        &self,
        stall: &Stall,
        expected_updated_at: Option<DateTime<Utc>>,
    ) -> Result<Stall, StallStoreError>;

    /// Filtered, paged listing ordered by code.
    async fn find_by_filters(
        &self,
        filter: &StallFilter,
        page: PageRequest,
    ) -> Result<Page<Stall>, StallStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use rstest::rstest;

    fn stall_at(location: &str, status: StallStatus, size: StallSize) -> Stall {
        let now = Utc::now();
        Stall {
            id: StallId::random(),
            code: StallCode::new("A-001").expect("valid code"),
            size,
            location: location.to_owned(),
            price: BigDecimal::from(500),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn empty_filter_matches_everything() {
        let stall = stall_at("Hall A", StallStatus::Available, StallSize::Medium);
        assert!(StallFilter::default().matches(&stall));
    }

    #[rstest]
    fn status_filter_is_exact() {
        let stall = stall_at("Hall A", StallStatus::Held, StallSize::Medium);
        let filter = StallFilter {
            status: Some(StallStatus::Held),
            ..StallFilter::default()
        };
        assert!(filter.matches(&stall));

        let other = StallFilter {
            status: Some(StallStatus::Available),
            ..StallFilter::default()
        };
        assert!(!other.matches(&stall));
    }

    #[rstest]
    #[case("hall", true)]
    #[case("HALL A", true)]
    #[case("ll a", true)]
    #[case("hall b", false)]
    fn location_filter_is_case_insensitive_substring(
        #[case] needle: &str,
        #[case] expected: bool,
    ) {
        let stall = stall_at("Hall A", StallStatus::Available, StallSize::Large);
        let filter = StallFilter {
            location: Some(needle.to_owned()),
            ..StallFilter::default()
        };
        assert_eq!(filter.matches(&stall), expected);
    }

    #[rstest]
    fn combined_filters_must_all_match() {
        let stall = stall_at("Hall A", StallStatus::Reserved, StallSize::Large);
        let filter = StallFilter {
            status: Some(StallStatus::Reserved),
            size: Some(StallSize::Large),
            location: Some("hall".to_owned()),
        };
        assert!(filter.matches(&stall));

        let mismatched_size = StallFilter {
            size: Some(StallSize::Small),
            ..filter
        };
        assert!(!mismatched_size.matches(&stall));
    }
}
