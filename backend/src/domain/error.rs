//! Domain-level error type for stall operations.
//!
//! Transport agnostic: inbound adapters translate these variants into HTTP
//! status codes and error envelopes. Every variant carries enough context
//! (identifier, current status, attempted operation) to render a precise
//! message without consulting other state.

use thiserror::Error;

use super::stall::{StallCode, StallId, StallStatus, Transition};

/// Failure raised by stall operations.
///
/// All variants are terminal for the current call; nothing is retried or
/// recovered silently inside the domain. [`Error::Conflict`] marks a
/// concurrent modification detected at persist time and is safe for the
/// caller to retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// No stall exists with the given identifier.
    #[error("stall not found with id: {id}")]
    NotFound {
        /// Identifier that failed to resolve.
        id: StallId,
    },

    /// Creation attempted with a code already in use.
    #[error("stall with code {code} already exists")]
    DuplicateCode {
        /// The conflicting code.
        code: StallCode,
    },

    /// Transition attempted from a status that cannot reach the target.
    #[error("cannot {attempted} stall with status: {current}")]
    InvalidTransition {
        /// Status the stall was observed in.
        current: StallStatus,
        /// Operation that was attempted.
        attempted: Transition,
    },

    /// The stall changed between load and persist; the caller may retry.
    #[error("stall {id} was modified concurrently")]
    Conflict {
        /// Identifier of the contended stall.
        id: StallId,
    },

    /// The storage collaborator could not be reached.
    #[error("stall store unavailable: {message}")]
    Unavailable {
        /// Adapter-supplied diagnostic.
        message: String,
    },

    /// An unexpected storage failure.
    #[error("stall store failed: {message}")]
    Internal {
        /// Adapter-supplied diagnostic.
        message: String,
    },
}

impl Error {
    /// Helper for [`Error::NotFound`].
    pub const fn not_found(id: StallId) -> Self {
        Self::NotFound { id }
    }

    /// Helper for [`Error::DuplicateCode`].
    pub const fn duplicate_code(code: StallCode) -> Self {
        Self::DuplicateCode { code }
    }

    /// Helper for [`Error::InvalidTransition`].
    pub const fn invalid_transition(current: StallStatus, attempted: Transition) -> Self {
        Self::InvalidTransition { current, attempted }
    }

    /// Helper for [`Error::Conflict`].
    pub const fn conflict(id: StallId) -> Self {
        Self::Conflict { id }
    }

    /// Helper for [`Error::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Helper for [`Error::Internal`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
