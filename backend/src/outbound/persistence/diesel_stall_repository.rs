//! PostgreSQL-backed [`StallStore`] implementation using Diesel.
//!
//! This adapter provides durable stall storage with optimistic concurrency:
//! updates are filtered on the `updated_at` value observed at load time, so a
//! row changed by a concurrent writer produces [`StallStoreError::Stale`]
//! instead of a silent overwrite.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{Page, PageRequest, StallFilter, StallStore, StallStoreError};
use crate::domain::stall::{Stall, StallCode, StallId, StallSize, StallStatus};

use super::models::{NewStallRow, StallRow, StallUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::stalls;

/// Diesel-backed implementation of the [`StallStore`] port.
#[derive(Clone)]
pub struct DieselStallRepository {
    pool: DbPool,
}

impl DieselStallRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StallStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StallStoreError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> StallStoreError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => StallStoreError::query("record not found"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StallStoreError::connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => StallStoreError::query("database error"),
        _ => StallStoreError::query("database error"),
    }
}

/// Convert a database row to a domain stall.
///
/// Unrecognised enum strings mean the row was written outside this adapter;
/// they surface as query errors rather than panics.
fn row_to_stall(row: StallRow) -> Result<Stall, StallStoreError> {
    let code = StallCode::new(row.code)
        .map_err(|error| StallStoreError::query(format!("corrupt stall code: {error}")))?;
    let size = StallSize::from_str(&row.size)
        .map_err(|error| StallStoreError::query(format!("corrupt stall size: {error}")))?;
    let status = StallStatus::from_str(&row.status)
        .map_err(|error| StallStoreError::query(format!("corrupt stall status: {error}")))?;
    Ok(Stall {
        id: StallId::from_uuid(row.id),
        code,
        size,
        location: row.location,
        price: row.price,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Escape LIKE metacharacters so a location filter matches literally.
fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

type BoxedStallQuery<'a> = stalls::BoxedQuery<'a, diesel::pg::Pg>;

fn apply_filters<'a>(query: BoxedStallQuery<'a>, filter: &'a StallFilter) -> BoxedStallQuery<'a> {
    let mut query = query;
    if let Some(status) = filter.status {
        query = query.filter(stalls::status.eq(status.as_str()));
    }
    if let Some(size) = filter.size {
        query = query.filter(stalls::size.eq(size.as_str()));
    }
    if let Some(location) = &filter.location {
        query = query.filter(stalls::location.ilike(like_pattern(location)));
    }
    query
}

#[async_trait]
impl StallStore for DieselStallRepository {
    async fn find_by_id(&self, id: &StallId) -> Result<Option<Stall>, StallStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StallRow> = stalls::table
            .filter(stalls::id.eq(id.as_uuid()))
            .select(StallRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_stall).transpose()
    }

    async fn find_by_code(&self, code: &StallCode) -> Result<Option<Stall>, StallStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StallRow> = stalls::table
            .filter(stalls::code.eq(code.as_str()))
            .select(StallRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_stall).transpose()
    }

    async fn save(
        &self,
        stall: &Stall,
        expected_updated_at: Option<DateTime<Utc>>,
    ) -> Result<Stall, StallStoreError> {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        match expected_updated_at {
            None => {
                let new_row = NewStallRow {
                    id: *stall.id.as_uuid(),
                    code: stall.code.as_str(),
                    size: stall.size.as_str(),
                    location: &stall.location,
                    price: &stall.price,
                    status: stall.status.as_str(),
                    created_at: stall.created_at,
                    updated_at: stall.updated_at,
                };

                let inserted: StallRow = diesel::insert_into(stalls::table)
                    .values(&new_row)
                    .get_result(&mut conn)
                    .await
                    .map_err(|error| match error {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            StallStoreError::DuplicateCode {
                                code: stall.code.clone(),
                            }
                        }
                        other => map_diesel_error(other),
                    })?;

                row_to_stall(inserted)
            }
            Some(expected) => {
                let update = StallUpdate {
                    size: stall.size.as_str(),
                    location: &stall.location,
                    price: &stall.price,
                    status: stall.status.as_str(),
                    updated_at: stall.updated_at,
                };

                // Filter on the load-time timestamp so a concurrent writer
                // makes this update miss instead of being overwritten.
                let updated: Option<StallRow> = diesel::update(stalls::table)
                    .filter(
                        stalls::id
                            .eq(stall.id.as_uuid())
                            .and(stalls::updated_at.eq(expected)),
                    )
                    .set(&update)
                    .get_result(&mut conn)
                    .await
                    .optional()
                    .map_err(map_diesel_error)?;

                match updated {
                    Some(row) => row_to_stall(row),
                    None => Err(StallStoreError::Stale { id: stall.id }),
                }
            }
        }
    }

    async fn find_by_filters(
        &self,
        filter: &StallFilter,
        page: PageRequest,
    ) -> Result<Page<Stall>, StallStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = apply_filters(stalls::table.into_boxed(), filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<StallRow> = apply_filters(stalls::table.into_boxed(), filter)
            .order(stalls::code.asc())
            .offset(page.offset())
            .limit(page.limit())
            .select(StallRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = rows
            .into_iter()
            .map(row_to_stall)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page {
            items,
            page: page.page(),
            per_page: page.per_page(),
            total_elements: total.unsigned_abs(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use rstest::rstest;
    use uuid::Uuid;

    fn sample_row() -> StallRow {
        let now = Utc::now();
        StallRow {
            id: Uuid::new_v4(),
            code: "A-001".to_owned(),
            size: "MEDIUM".to_owned(),
            location: "Hall B".to_owned(),
            price: BigDecimal::from(450),
            status: "AVAILABLE".to_owned(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn row_to_stall_converts_a_clean_row() {
        let row = sample_row();
        let stall = row_to_stall(row.clone()).expect("clean row converts");
        assert_eq!(stall.code.as_str(), "A-001");
        assert_eq!(stall.size, StallSize::Medium);
        assert_eq!(stall.status, StallStatus::Available);
        assert_eq!(stall.id.as_uuid(), &row.id);
    }

    #[rstest]
    #[case("size")]
    #[case("status")]
    fn row_to_stall_rejects_corrupt_enum_strings(#[case] field: &str) {
        let mut row = sample_row();
        match field {
            "size" => row.size = "gigantic".to_owned(),
            _ => row.status = "occupied".to_owned(),
        }
        let error = row_to_stall(row).expect_err("corrupt row rejected");
        assert!(matches!(error, StallStoreError::Query { .. }));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(error, StallStoreError::Connection { .. }));
        assert!(error.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_error() {
        let error = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(error, StallStoreError::Query { .. }));
    }

    #[rstest]
    #[case("hall", "%hall%")]
    #[case("50%", "%50\\%%")]
    #[case("a_b", "%a\\_b%")]
    fn like_pattern_escapes_metacharacters(#[case] needle: &str, #[case] expected: &str) {
        assert_eq!(like_pattern(needle), expected);
    }
}
