//! # Amount in Words
//!
//! Spells a peso amount out in Spanish for the "total en letras" line of
//! rental receipts and membership confirmations.
//!
//! ## Composition Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  0            → "cero pesos"                                            │
//! │  1            → "un peso"                                               │
//! │  2..=19       → unit / teen word          "quince pesos"                │
//! │  20..=29      → single word               "veintiuno pesos"             │
//! │  30..=99      → tens [+ " y " + unit]     "treinta y cinco pesos"       │
//! │  100          → "cien"                                                  │
//! │  101..=999    → hundreds + " " + rest     "ciento uno pesos"            │
//! │  1000..       → "mil" | <n> + " mil", then the rest below 1000          │
//! │                                           "mil quinientos pesos"        │
//! │  centavos > 0 → " con <n> centavos"       "... con cincuenta centavos"  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts are rounded to whole centavos first. Negative, non-finite and
//! amounts above [`MAX_WORDS_PESOS`](crate::MAX_WORDS_PESOS).99 are rejected.

use chrono::{DateTime, Utc};

use crate::error::{AmountError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_receipt, QrInput};
use crate::MAX_WORDS_PESOS;

const UNITS: [&str; 10] = [
    "", "uno", "dos", "tres", "cuatro", "cinco", "seis", "siete", "ocho", "nueve",
];

const TEENS: [&str; 10] = [
    "diez",
    "once",
    "doce",
    "trece",
    "catorce",
    "quince",
    "dieciséis",
    "diecisiete",
    "dieciocho",
    "diecinueve",
];

const TWENTIES: [&str; 10] = [
    "veinte",
    "veintiuno",
    "veintidós",
    "veintitrés",
    "veinticuatro",
    "veinticinco",
    "veintiséis",
    "veintisiete",
    "veintiocho",
    "veintinueve",
];

const TENS: [&str; 10] = [
    "", "", "veinte", "treinta", "cuarenta", "cincuenta", "sesenta", "setenta", "ochenta",
    "noventa",
];

const HUNDREDS: [&str; 10] = [
    "",
    "ciento",
    "doscientos",
    "trescientos",
    "cuatrocientos",
    "quinientos",
    "seiscientos",
    "setecientos",
    "ochocientos",
    "novecientos",
];

// =============================================================================
// Public API
// =============================================================================

/// Converts a decimal peso amount to Spanish words.
///
/// ## Example
/// ```rust
/// use casa_core::words::amount_to_words;
///
/// assert_eq!(amount_to_words(0.0).unwrap(), "cero pesos");
/// assert_eq!(amount_to_words(100.0).unwrap(), "cien pesos");
/// assert_eq!(amount_to_words(1500.0).unwrap(), "mil quinientos pesos");
/// assert!(amount_to_words(-5.0).is_err());
/// assert!(amount_to_words(f64::NAN).is_err());
/// ```
pub fn amount_to_words(amount: f64) -> Result<String, AmountError> {
    if !amount.is_finite() {
        return Err(AmountError::invalid(format!(
            "amount must be a finite number, got {amount}"
        )));
    }
    if amount < 0.0 {
        return Err(AmountError::invalid(format!(
            "amount must not be negative, got {amount}"
        )));
    }
    if amount >= (MAX_WORDS_PESOS + 1) as f64 {
        return Err(exceeds_maximum());
    }

    money_to_words(Money::from_amount(amount)?)
}

/// Converts a [`Money`] value to Spanish words.
pub fn money_to_words(money: Money) -> Result<String, AmountError> {
    if money.is_negative() {
        return Err(AmountError::invalid(format!(
            "amount must not be negative, got {money}"
        )));
    }
    if money.pesos() > MAX_WORDS_PESOS {
        return Err(exceeds_maximum());
    }

    let mut text = match money.pesos() {
        0 => "cero pesos".to_string(),
        1 => "un peso".to_string(),
        pesos => format!("{} pesos", integer_words(pesos)),
    };

    match money.centavos() {
        0 => {}
        1 => text.push_str(" con un centavo"),
        centavos => {
            text.push_str(" con ");
            text.push_str(&below_hundred(centavos));
            text.push_str(" centavos");
        }
    }

    Ok(text)
}

/// Validates a scanned receipt and spells its total out.
///
/// Receipt rejections come back as [`CoreError::Receipt`], totals that cannot
/// be spelled (negative or above the maximum) as [`CoreError::Amount`].
///
/// [`CoreError::Receipt`]: crate::CoreError::Receipt
/// [`CoreError::Amount`]: crate::CoreError::Amount
pub fn receipt_total_in_words<'a>(
    input: impl Into<QrInput<'a>>,
    now: DateTime<Utc>,
    retention_days: u32,
) -> CoreResult<String> {
    let receipt = validate_receipt(input, now, retention_days)?;
    let total = Money::from_amount(receipt.payload.total)?;
    Ok(money_to_words(total)?)
}

// =============================================================================
// Integer Rendering
// =============================================================================

fn exceeds_maximum() -> AmountError {
    AmountError::invalid(format!(
        "amount exceeds the maximum of {MAX_WORDS_PESOS}.99"
    ))
}

/// Renders 1..=999_999 without the currency suffix.
fn integer_words(n: i64) -> String {
    if n < 1000 {
        return below_thousand(n);
    }

    let thousands = n / 1000;
    let rest = n % 1000;

    let mut text = if thousands == 1 {
        "mil".to_string()
    } else {
        format!("{} mil", below_thousand(thousands))
    };

    if rest > 0 {
        text.push(' ');
        text.push_str(&below_thousand(rest));
    }

    text
}

fn below_thousand(n: i64) -> String {
    if n == 100 {
        return "cien".to_string();
    }
    if n < 100 {
        return below_hundred(n);
    }

    let hundreds = HUNDREDS[(n / 100) as usize];
    match n % 100 {
        0 => hundreds.to_string(),
        rest => format!("{} {}", hundreds, below_hundred(rest)),
    }
}

fn below_hundred(n: i64) -> String {
    match n {
        0..=9 => UNITS[n as usize].to_string(),
        10..=19 => TEENS[(n - 10) as usize].to_string(),
        20..=29 => TWENTIES[(n - 20) as usize].to_string(),
        _ => {
            let tens = TENS[(n / 10) as usize];
            match n % 10 {
                0 => tens.to_string(),
                unit => format!("{} y {}", tens, UNITS[unit as usize]),
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn words(amount: f64) -> String {
        amount_to_words(amount).unwrap()
    }

    #[test]
    fn test_zero_and_one() {
        assert_eq!(words(0.0), "cero pesos");
        assert_eq!(words(1.0), "un peso");
        assert_eq!(words(2.0), "dos pesos");
    }

    #[test]
    fn test_units_and_teens() {
        assert_eq!(words(9.0), "nueve pesos");
        assert_eq!(words(10.0), "diez pesos");
        assert_eq!(words(15.0), "quince pesos");
        assert_eq!(words(16.0), "dieciséis pesos");
        assert_eq!(words(19.0), "diecinueve pesos");
    }

    #[test]
    fn test_tens() {
        assert_eq!(words(20.0), "veinte pesos");
        assert_eq!(words(21.0), "veintiuno pesos");
        assert_eq!(words(22.0), "veintidós pesos");
        assert_eq!(words(30.0), "treinta pesos");
        assert_eq!(words(35.0), "treinta y cinco pesos");
        assert_eq!(words(99.0), "noventa y nueve pesos");
    }

    #[test]
    fn test_hundreds() {
        assert_eq!(words(100.0), "cien pesos");
        assert_eq!(words(101.0), "ciento uno pesos");
        assert_eq!(words(250.0), "doscientos cincuenta pesos");
        assert_eq!(words(500.0), "quinientos pesos");
        assert_eq!(words(999.0), "novecientos noventa y nueve pesos");
    }

    #[test]
    fn test_thousands() {
        assert_eq!(words(1000.0), "mil pesos");
        assert_eq!(words(1500.0), "mil quinientos pesos");
        assert_eq!(words(2021.0), "dos mil veintiuno pesos");
        assert_eq!(words(100_000.0), "cien mil pesos");
        assert_eq!(words(150_100.0), "ciento cincuenta mil cien pesos");
        assert_eq!(
            words(999_999.0),
            "novecientos noventa y nueve mil novecientos noventa y nueve pesos"
        );
    }

    #[test]
    fn test_centavos() {
        assert_eq!(words(12.5), "doce pesos con cincuenta centavos");
        assert_eq!(words(0.01), "cero pesos con un centavo");
        assert_eq!(words(1.29), "un peso con veintinueve centavos");
        assert_eq!(words(10.999), "once pesos");
    }

    #[test]
    fn test_rejects_outside_domain() {
        assert!(amount_to_words(-5.0).is_err());
        assert!(amount_to_words(-0.01).is_err());
        assert!(amount_to_words(f64::NAN).is_err());
        assert!(amount_to_words(f64::INFINITY).is_err());
        assert!(amount_to_words(1_000_000.0).is_err());
        assert!(amount_to_words(999_999.996).is_err());
        assert!(amount_to_words(999_999.99).is_ok());
    }

    #[test]
    fn test_negative_zero_is_zero() {
        assert_eq!(words(-0.0), "cero pesos");
    }

    #[test]
    fn test_money_to_words() {
        assert_eq!(
            money_to_words(Money::from_cents(150_050)).unwrap(),
            "mil quinientos pesos con cincuenta centavos"
        );
        assert!(money_to_words(Money::from_cents(-1)).is_err());
    }

    fn scanned(total: serde_json::Value, timestamp: &str) -> serde_json::Value {
        serde_json::json!({
            "type": "rent_receipt",
            "id": 7,
            "client": "Ana",
            "room": "101",
            "checkIn": "2024-01-01T14:00:00Z",
            "checkOut": "2024-01-03T12:00:00Z",
            "total": total,
            "timestamp": timestamp
        })
    }

    #[test]
    fn test_receipt_total_in_words() {
        use crate::{CoreError, ErrorKind};
        use chrono::TimeZone;

        let now = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let fresh = "2024-01-01T15:00:00Z";

        let text = receipt_total_in_words(&scanned("1250.50".into(), fresh), now, 365).unwrap();
        assert_eq!(text, "mil doscientos cincuenta pesos con cincuenta centavos");

        let err = receipt_total_in_words(&scanned(500.into(), "2022-01-01T00:00:00Z"), now, 365)
            .unwrap_err();
        assert!(matches!(err, CoreError::Receipt(_)));
        assert_eq!(err.kind(), ErrorKind::Expired);

        let err = receipt_total_in_words(&scanned(2_000_000.into(), fresh), now, 365).unwrap_err();
        assert!(matches!(err, CoreError::Amount(_)));
        assert_eq!(err.kind(), ErrorKind::InvalidAmount);

        let err = receipt_total_in_words("not json", now, 365).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }
}
