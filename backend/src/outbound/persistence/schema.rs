//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation. Regenerate with
//! `diesel print-schema` after a migration changes the schema.

diesel::table! {
    /// Exhibition stalls.
    ///
    /// One row per stall. `code` carries a unique constraint; `size` and
    /// `status` store the canonical uppercase enum strings.
    stalls (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique human-assigned code.
        code -> Varchar,
        /// Footprint: SMALL, MEDIUM, or LARGE.
        size -> Varchar,
        /// Free-text location within the venue.
        location -> Varchar,
        /// Price per exhibition period.
        price -> Numeric,
        /// Lifecycle state: AVAILABLE, HELD, or RESERVED.
        status -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp; doubles as the optimistic lock token.
        updated_at -> Timestamptz,
    }
}
