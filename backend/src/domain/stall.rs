//! Stall aggregate and lifecycle vocabulary.
//!
//! A stall is a bookable exhibition booth. Its lifecycle is a closed state
//! machine: available → held → reserved, with release returning the stall to
//! the pool from any occupied state. Transition legality is checked with
//! exhaustive matches so a new status variant cannot be added without the
//! compiler pointing at every decision site.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Opaque stall identifier, assigned at creation and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StallId(Uuid);

impl StallId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID, e.g. one read back from storage.
    pub const fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Borrow the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for StallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StallId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Globally unique, human-assigned stall code (for example `A-001`).
///
/// The code is fixed at creation; no update path mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StallCode(String);

impl StallCode {
    /// Construct a code after validating that it is non-empty and carries no
    /// surrounding whitespace.
    ///
    /// # Examples
    /// ```
    /// use exhibitflow::domain::StallCode;
    ///
    /// let code = StallCode::new("A-001").expect("valid code");
    /// assert_eq!(code.as_str(), "A-001");
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, StallCodeValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(StallCodeValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(StallCodeValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Borrow the code as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StallCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for StallCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Validation errors returned when constructing [`StallCode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StallCodeValidationError {
    /// Code is empty after trimming whitespace.
    #[error("stall code must not be empty")]
    Empty,
    /// Code contains leading or trailing whitespace.
    #[error("stall code must not contain surrounding whitespace")]
    ContainsWhitespace,
}

/// Physical footprint of a stall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StallSize {
    /// Compact booth unit.
    Small,
    /// Standard booth unit.
    Medium,
    /// Double-width booth unit.
    Large,
}

impl StallSize {
    /// Canonical wire representation (`SMALL`, `MEDIUM`, `LARGE`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "SMALL",
            Self::Medium => "MEDIUM",
            Self::Large => "LARGE",
        }
    }
}

impl fmt::Display for StallSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StallSize {
    type Err = ParseStallSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("small") {
            Ok(Self::Small)
        } else if s.eq_ignore_ascii_case("medium") {
            Ok(Self::Medium)
        } else if s.eq_ignore_ascii_case("large") {
            Ok(Self::Large)
        } else {
            Err(ParseStallSizeError)
        }
    }
}

/// Error returned when a string is not a recognised stall size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("stall size must be one of SMALL, MEDIUM, LARGE")]
pub struct ParseStallSizeError;

/// Lifecycle state of a stall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StallStatus {
    /// In the open pool; may be held.
    Available,
    /// Provisionally claimed; may be reserved or released.
    Held,
    /// Firmly booked; may only be released.
    Reserved,
}

impl StallStatus {
    /// Canonical wire representation (`AVAILABLE`, `HELD`, `RESERVED`).
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Held => "HELD",
            Self::Reserved => "RESERVED",
        }
    }
}

impl fmt::Display for StallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StallStatus {
    type Err = ParseStallStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("available") {
            Ok(Self::Available)
        } else if s.eq_ignore_ascii_case("held") {
            Ok(Self::Held)
        } else if s.eq_ignore_ascii_case("reserved") {
            Ok(Self::Reserved)
        } else {
            Err(ParseStallStatusError)
        }
    }
}

/// Error returned when a string is not a recognised stall status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("stall status must be one of AVAILABLE, HELD, RESERVED")]
pub struct ParseStallStatusError;

/// A lifecycle transition operation.
///
/// Each transition knows its target status, the set of statuses it may start
/// from, and whether a domain event fires once it persists. Repeating a
/// transition from its own target status is a pure read, handled by the
/// service before these checks apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Soft claim: AVAILABLE → HELD.
    Hold,
    /// Return to the pool: HELD or RESERVED → AVAILABLE.
    Release,
    /// Firm claim after a hold: HELD → RESERVED.
    Reserve,
}

impl Transition {
    /// The status this transition moves a stall into.
    pub const fn target(self) -> StallStatus {
        match self {
            Self::Hold => StallStatus::Held,
            Self::Release => StallStatus::Available,
            Self::Reserve => StallStatus::Reserved,
        }
    }

    /// Whether `source` is a legal starting status for this transition.
    ///
    /// Release is deliberately permissive: a stall must always be returnable
    /// to the pool from any occupied state. Hold and reserve are strict
    /// single-source claims.
    pub const fn accepts(self, source: StallStatus) -> bool {
        match self {
            Self::Hold => matches!(source, StallStatus::Available),
            Self::Release => matches!(source, StallStatus::Held | StallStatus::Reserved),
            Self::Reserve => matches!(source, StallStatus::Held),
        }
    }

    /// Whether a domain event is published when this transition persists.
    pub const fn emits_event(self) -> bool {
        match self {
            Self::Hold => false,
            Self::Release | Self::Reserve => true,
        }
    }

    /// The verb used in diagnostics ("hold", "release", "reserve").
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Hold => "hold",
            Self::Release => "release",
            Self::Reserve => "reserve",
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}

/// The stall aggregate.
///
/// ## Invariants
/// - `code` is unique across all stalls.
/// - `created_at <= updated_at`; `updated_at` is refreshed by every mutating
///   operation that persists.
#[derive(Debug, Clone, PartialEq)]
pub struct Stall {
    /// Opaque unique identifier.
    pub id: StallId,
    /// Globally unique code, immutable after creation.
    pub code: StallCode,
    /// Physical footprint.
    pub size: StallSize,
    /// Free-text location within the venue.
    pub location: String,
    /// Non-negative price per exhibition period.
    pub price: BigDecimal,
    /// Current lifecycle state.
    pub status: StallStatus,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every persisted mutation.
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a stall. Status is never accepted as input;
/// creation always yields an AVAILABLE stall.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStall {
    /// Unique code for the new stall.
    pub code: StallCode,
    /// Physical footprint.
    pub size: StallSize,
    /// Free-text location within the venue.
    pub location: String,
    /// Non-negative price.
    pub price: BigDecimal,
}

/// Partial-update payload. Omitted fields retain their prior value; code and
/// status are never touched by an update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StallPatch {
    /// Replacement location, when supplied.
    pub location: Option<String>,
    /// Replacement price, when supplied.
    pub price: Option<BigDecimal>,
    /// Replacement size, when supplied.
    pub size: Option<StallSize>,
}

impl StallPatch {
    /// True when the patch carries no field at all.
    pub const fn is_empty(&self) -> bool {
        self.location.is_none() && self.price.is_none() && self.size.is_none()
    }
}
