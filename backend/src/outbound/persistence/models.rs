//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::stalls;

/// Row struct for reading from the stalls table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = stalls)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StallRow {
    pub id: Uuid,
    pub code: String,
    pub size: String,
    pub location: String,
    pub price: BigDecimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new stall records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = stalls)]
pub(crate) struct NewStallRow<'a> {
    pub id: Uuid,
    pub code: &'a str,
    pub size: &'a str,
    pub location: &'a str,
    pub price: &'a BigDecimal,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset struct for updating existing stall records.
///
/// `code` and `created_at` are immutable after insert and deliberately
/// absent.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = stalls)]
pub(crate) struct StallUpdate<'a> {
    pub size: &'a str,
    pub location: &'a str,
    pub price: &'a BigDecimal,
    pub status: &'a str,
    pub updated_at: DateTime<Utc>,
}
