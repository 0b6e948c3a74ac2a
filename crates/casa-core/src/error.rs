//! # Error Types
//!
//! Domain-specific error types for casa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  casa-core errors (this file)                                          │
//! │  ├── ReceiptError   - QR receipt rejected (malformed, expired, ...)    │
//! │  ├── AmountError    - Amount outside the words formatter's domain      │
//! │  └── CoreError      - Umbrella over both                               │
//! │                                                                         │
//! │  casa-verify errors (separate crate)                                   │
//! │  └── VerifierError  - Configuration loading/saving failures            │
//! │                                                                         │
//! │  Flow: ReceiptError → ErrorKind (wire tag) + Display (message) → UI    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every rejection is a value, never a panic
//! 3. Each variant maps to a stable [`ErrorKind`] tag for the HTTP layer

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Error Kind
// =============================================================================

/// Stable classification tag for every rejection this crate produces.
///
/// The HTTP layer serializes this next to the human-readable message so the
/// scanning UI can branch without parsing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ErrorKind {
    MalformedInput,
    MissingFields,
    InvalidType,
    InvalidDates,
    InvalidStayRange,
    Expired,
    InvalidAmount,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            ErrorKind::MalformedInput => "malformed_input",
            ErrorKind::MissingFields => "missing_fields",
            ErrorKind::InvalidType => "invalid_type",
            ErrorKind::InvalidDates => "invalid_dates",
            ErrorKind::InvalidStayRange => "invalid_stay_range",
            ErrorKind::Expired => "expired",
            ErrorKind::InvalidAmount => "invalid_amount",
        };
        f.write_str(tag)
    }
}

// =============================================================================
// Receipt Error
// =============================================================================

/// Reasons a scanned rental receipt is rejected.
///
/// ## Check Order
/// ```text
/// raw input ──► JSON object? ──► required fields ──► type tag
///                    │                  │                │
///             MalformedInput      MissingFields     InvalidType
///
///           ──► dates parse ──► checkOut > checkIn ──► within retention
///                    │                  │                     │
///              InvalidDates     InvalidStayRange          Expired
/// ```
/// The first failing check wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiptError {
    /// Input is not JSON, is not an object, or `total` is not numeric.
    #[error("Malformed receipt: {reason}")]
    MalformedInput { reason: String },

    /// One or more required fields are absent or falsy.
    ///
    /// `fields` keeps the canonical order of
    /// [`REQUIRED_FIELDS`](crate::REQUIRED_FIELDS).
    #[error("Missing fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    /// The `type` discriminator is not `rent_receipt`.
    #[error("Invalid receipt type: {found}")]
    InvalidType { found: String },

    /// One or more of `checkIn`, `checkOut`, `timestamp` is not a valid instant.
    #[error("Invalid dates in receipt: {}", fields.join(", "))]
    InvalidDates { fields: Vec<String> },

    /// `checkOut` is not strictly after `checkIn`.
    #[error("Invalid stay range: check-out must be after check-in")]
    InvalidStayRange,

    /// The receipt was generated before the retention window.
    #[error("Receipt expired: issued {issued_at}, older than {retention_days} days")]
    Expired {
        issued_at: String,
        retention_days: u32,
    },
}

impl ReceiptError {
    /// Returns the wire tag for this rejection.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReceiptError::MalformedInput { .. } => ErrorKind::MalformedInput,
            ReceiptError::MissingFields { .. } => ErrorKind::MissingFields,
            ReceiptError::InvalidType { .. } => ErrorKind::InvalidType,
            ReceiptError::InvalidDates { .. } => ErrorKind::InvalidDates,
            ReceiptError::InvalidStayRange => ErrorKind::InvalidStayRange,
            ReceiptError::Expired { .. } => ErrorKind::Expired,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        ReceiptError::MalformedInput {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Amount Error
// =============================================================================

/// Amount outside the domain of the words formatter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Negative, non-finite or above the supported maximum.
    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },
}

impl AmountError {
    /// Returns the wire tag for this rejection.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidAmount
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        AmountError::InvalidAmount {
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Umbrella over every casa-core error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    #[error(transparent)]
    Amount(#[from] AmountError),
}

impl CoreError {
    /// Returns the wire tag for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Receipt(err) => err.kind(),
            CoreError::Amount(err) => err.kind(),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result of validating a receipt.
pub type ReceiptResult<T> = Result<T, ReceiptError>;

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
