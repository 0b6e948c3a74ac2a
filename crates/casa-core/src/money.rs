//! # Money Module
//!
//! Provides the `Money` type for receipt amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  QR payloads carry totals as JSON numbers or strings:                   │
//! │    "total": 0.29   →  0.29 * 100 = 28.999999999999996  ❌               │
//! │                                                                         │
//! │  OUR SOLUTION: round once to integer centavos at the boundary           │
//! │    Money::from_amount(0.29) = 29 centavos                               │
//! │    Everything downstream (words, display) works on integers            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use casa_core::money::Money;
//!
//! let total = Money::from_amount(1500.5).unwrap();
//! assert_eq!(total.cents(), 150_050);
//! assert_eq!(total.to_string(), "$1500.50");
//! assert_eq!(
//!     total.to_words().unwrap(),
//!     "mil quinientos pesos con cincuenta centavos"
//! );
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::AmountError;
use crate::words;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in centavos (the smallest MXN unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: receipts may carry negative totals (refunds); only
///   the words formatter rejects them
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal amount in pesos to Money, rounding to whole centavos.
    ///
    /// ## Example
    /// ```rust
    /// use casa_core::money::Money;
    ///
    /// assert_eq!(Money::from_amount(10.99).unwrap().cents(), 1099);
    /// assert_eq!(Money::from_amount(0.29).unwrap().cents(), 29);
    /// assert!(Money::from_amount(f64::NAN).is_err());
    /// ```
    ///
    /// ## Errors
    /// Non-finite amounts and amounts that do not fit in i64 centavos.
    pub fn from_amount(amount: f64) -> Result<Self, AmountError> {
        if !amount.is_finite() {
            return Err(AmountError::invalid(format!(
                "amount must be a finite number, got {amount}"
            )));
        }

        let cents = (amount * 100.0).round();
        if cents >= i64::MAX as f64 || cents <= i64::MIN as f64 {
            return Err(AmountError::invalid(format!(
                "amount {amount} is out of range"
            )));
        }

        Ok(Money(cents as i64))
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole pesos portion.
    ///
    /// ```rust
    /// use casa_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).pesos(), 10);
    /// assert_eq!(Money::from_cents(-550).pesos(), -5);
    /// ```
    #[inline]
    pub const fn pesos(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavos portion (always 0-99).
    #[inline]
    pub const fn centavos(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Renders the amount with two decimals and no currency symbol,
    /// as printed in the `payment.total` field of receipt details.
    ///
    /// ```rust
    /// use casa_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(50_000).to_plain_string(), "500.00");
    /// assert_eq!(Money::from_cents(-550).to_plain_string(), "-5.50");
    /// ```
    pub fn to_plain_string(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.pesos().abs(), self.centavos())
    }

    /// Spells the amount out in Spanish ("mil quinientos pesos").
    ///
    /// See [`words::money_to_words`] for the rules.
    pub fn to_words(&self) -> Result<String, AmountError> {
        words::money_to_words(*self)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$1500.50`.
///
/// ## Note
/// For debugging and plain-text receipts. Views format their own currency.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.pesos().abs(), self.centavos())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
