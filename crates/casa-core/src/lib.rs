//! # casa-core: Pure Receipt Logic for Casa Club
//!
//! This crate holds the receipt verification rules and the amount-to-words
//! formatter as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Casa Club Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Web App (routes, views, PDF, email)                │   │
//! │  │    QR scanner page ──► verify route ──► receipt view / PDF      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    casa-verify                                  │   │
//! │  │    ReceiptValidator, ValidationStore, Clock, config             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ casa-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │validation │  │  details  │  │   money   │  │   words   │  │   │
//! │  │   │ QR rules  │  │ display   │  │  centavos │  │ "cien     │  │   │
//! │  │   │ hash      │  │ view      │  │           │  │  pesos"   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO LOGGING • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Receipt payloads, validation records, display DTOs
//! - [`validation`] - QR receipt validation and identity hashing
//! - [`details`] - Display view of a verified receipt
//! - [`money`] - Money type in integer centavos
//! - [`words`] - Spanish amount-in-words formatter
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use casa_core::words::amount_to_words;
//!
//! assert_eq!(amount_to_words(1500.0).unwrap(), "mil quinientos pesos");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod details;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use details::{describe_receipt, DisplayOptions};
pub use error::{AmountError, CoreError, ErrorKind, ReceiptError};
pub use money::Money;
pub use types::*;
pub use validation::{identity_hash, validate_receipt, QrInput};
pub use words::{amount_to_words, receipt_total_in_words};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Discriminator carried by every rental receipt QR.
pub const RECEIPT_TYPE: &str = "rent_receipt";

/// Fields a receipt QR must carry, in the order missing ones are reported.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "type",
    "id",
    "client",
    "room",
    "checkIn",
    "checkOut",
    "total",
    "timestamp",
];

/// Fields that must parse as date-times.
pub const DATE_FIELDS: [&str; 3] = ["checkIn", "checkOut", "timestamp"];

/// Length of a receipt identity hash.
pub const RECEIPT_HASH_LEN: usize = 16;

/// Receipts generated longer ago than this are rejected as expired.
pub const DEFAULT_RETENTION_DAYS: u32 = 365;

/// Largest whole-peso amount the words formatter spells out.
///
/// ## Business Reason
/// Receipt totals never reach a million pesos; anything above is rejected
/// instead of producing a guess.
pub const MAX_WORDS_PESOS: i64 = 999_999;

/// Label shown for rental receipts on the verification screen.
pub const RECEIPT_KIND_LABEL: &str = "Comprobante de Renta";

/// Currency printed on receipts unless configured otherwise.
pub const DEFAULT_CURRENCY: &str = "MXN";
