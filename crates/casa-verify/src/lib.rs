//! # casa-verify: Receipt Verification for Casa Club
//!
//! Stateful layer over [`casa_core`]: validates rental receipt QRs, keeps
//! the book of receipts validated by this process and reports on it.
//!
//! ## Components
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         casa-verify                                     │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────┐    │
//! │  │ ReceiptValidator │──►│ ValidationStore  │   │      Clock       │    │
//! │  │ validate         │   │ InMemoryStore    │   │ SystemClock      │    │
//! │  │ describe         │   │ (pluggable)      │   │ ManualClock      │    │
//! │  │ stats / export   │   └──────────────────┘   └──────────────────┘    │
//! │  └────────┬─────────┘                                                   │
//! │           │                                                             │
//! │  ┌────────▼─────────┐                                                   │
//! │  │  VerifierConfig  │  verifier.toml + CASA_* env overrides             │
//! │  └──────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use casa_verify::ReceiptValidator;
//!
//! let validator = ReceiptValidator::new();
//! let qr = format!(
//!     r#"{{"type":"rent_receipt","id":1,"client":"Ana","room":"101",
//!         "checkIn":"2024-01-01T14:00:00Z","checkOut":"2024-01-02T12:00:00Z",
//!         "total":500,"timestamp":"{}"}}"#,
//!     chrono::Utc::now().to_rfc3339()
//! );
//!
//! let details = validator.describe(qr.as_str()).unwrap();
//! assert_eq!(details.reservation.nights, 1);
//! assert!(validator.is_already_validated(qr.as_str()));
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod store;
pub mod validator;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DisplaySettings, ValidationSettings, VerifierConfig};
pub use error::{VerifierError, VerifierResult};
pub use store::{InMemoryStore, ValidationStore};
pub use validator::ReceiptValidator;
