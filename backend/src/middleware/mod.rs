//! Request middleware.
//!
//! Currently just the [`Trace`] middleware, which tags each request with a
//! correlation identifier.

pub mod trace;

pub use trace::Trace;
