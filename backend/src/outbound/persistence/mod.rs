//! Stall persistence adapters.
//!
//! Two implementations of the [`crate::domain::ports::StallStore`] port:
//!
//! - [`DieselStallRepository`]: PostgreSQL via Diesel, with async support
//!   through `diesel-async` and `bb8` connection pooling.
//! - [`InMemoryStallStore`]: map-backed store for tests and database-free
//!   wiring, honouring the same contract.
//!
//! Adapters are thin translators between Diesel rows and domain types; no
//! business logic resides here. Row structs (`models.rs`) and schema
//! definitions (`schema.rs`) are internal implementation details, never
//! exposed to the domain layer.

mod diesel_stall_repository;
mod memory;
mod models;
mod pool;
mod schema;

pub use diesel_stall_repository::DieselStallRepository;
pub use memory::InMemoryStallStore;
pub use pool::{DbPool, PoolConfig, PoolError};
