//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod health;
pub mod stalls;
pub mod state;
pub mod validation;


pub use error::{ApiError, ApiResult};
pub use state::HttpState;
