//! # Validation Module
//!
//! QR rental receipt validation and identity hashing.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Scanner UI (JavaScript)                                      │
//! │  └── Decodes the QR image into a JSON string                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (pure)                                           │
//! │  ├── JSON object shape                                                 │
//! │  ├── Required fields (legacy truthiness rule)                          │
//! │  ├── Type tag, dates, stay range, retention window                     │
//! │  └── Identity hash                                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: casa-verify                                                  │
//! │  └── Records the validation in the store                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use casa_core::validation::validate_receipt;
//! use chrono::Utc;
//!
//! let now = Utc::now();
//! let qr = format!(
//!     r#"{{"type":"rent_receipt","id":1,"client":"Ana","room":"101",
//!         "checkIn":"2024-01-01T14:00:00Z","checkOut":"2024-01-02T12:00:00Z",
//!         "total":500,"timestamp":"{}"}}"#,
//!     now.to_rfc3339()
//! );
//!
//! let receipt = validate_receipt(qr.as_str(), now, 365).unwrap();
//! assert_eq!(receipt.payload.client, "Ana");
//! assert_eq!(receipt.hash.len(), 16);
//!
//! assert!(validate_receipt("not json", now, 365).is_err());
//! ```

use std::borrow::Cow;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::error::{ReceiptError, ReceiptResult};
use crate::types::{ReceiptPayload, VerifiedReceipt};
use crate::{DATE_FIELDS, RECEIPT_HASH_LEN, RECEIPT_TYPE, REQUIRED_FIELDS};

/// Layouts accepted for date-times without an explicit offset (read as UTC).
const NAIVE_DATE_TIME_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

// =============================================================================
// QR Input
// =============================================================================

/// Raw scanner input: JSON text or an already parsed JSON value.
#[derive(Debug, Clone, Copy)]
pub enum QrInput<'a> {
    Text(&'a str),
    Json(&'a Value),
}

impl<'a> From<&'a str> for QrInput<'a> {
    fn from(text: &'a str) -> Self {
        QrInput::Text(text)
    }
}

impl<'a> From<&'a String> for QrInput<'a> {
    fn from(text: &'a String) -> Self {
        QrInput::Text(text.as_str())
    }
}

impl<'a> From<&'a Value> for QrInput<'a> {
    fn from(value: &'a Value) -> Self {
        QrInput::Json(value)
    }
}

impl<'a> QrInput<'a> {
    /// Resolves the input to a JSON object.
    ///
    /// JSON strings (whether given as text or as a `Value::String`) are
    /// parsed; anything that does not end up as an object is rejected.
    pub fn to_object(self) -> ReceiptResult<Cow<'a, Map<String, Value>>> {
        match self {
            QrInput::Text(text) => parse_object(text).map(Cow::Owned),
            QrInput::Json(Value::String(text)) => parse_object(text).map(Cow::Owned),
            QrInput::Json(Value::Object(map)) => Ok(Cow::Borrowed(map)),
            QrInput::Json(other) => Err(not_an_object(other)),
        }
    }
}

fn parse_object(text: &str) -> ReceiptResult<Map<String, Value>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| ReceiptError::malformed(format!("QR data is not valid JSON: {e}")))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(not_an_object(&other)),
    }
}

fn not_an_object(value: &Value) -> ReceiptError {
    let found = match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    };
    ReceiptError::malformed(format!("QR data must be a JSON object, got {found}"))
}

// =============================================================================
// Field Helpers
// =============================================================================

/// Legacy field-presence rule: absent, `null`, `false`, `0` and `""` all
/// count as missing.
///
/// ```rust
/// use casa_core::validation::is_present;
/// use serde_json::json;
///
/// assert!(is_present(Some(&json!("Ana"))));
/// assert!(is_present(Some(&json!("0"))));
/// assert!(!is_present(Some(&json!(0))));
/// assert!(!is_present(Some(&json!(""))));
/// assert!(!is_present(None));
/// ```
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Required fields that fail [`is_present`], in canonical order.
pub fn missing_fields(object: &Map<String, Value>) -> Vec<String> {
    REQUIRED_FIELDS
        .iter()
        .filter(|field| !is_present(object.get(**field)))
        .map(|field| field.to_string())
        .collect()
}

/// Printed form of a scalar field, as used in the identity hash.
///
/// Strings are taken verbatim; integers print without a decimal point.
pub fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
            }
        }
        other => other.to_string(),
    }
}

/// Parses a receipt date-time.
///
/// ## Accepted Formats
/// - RFC 3339 (`2024-01-01T14:00:00Z`, `2024-01-01T08:00:00-06:00`)
/// - RFC 2822 (`Mon, 01 Jan 2024 14:00:00 +0000`)
/// - Offset-less date-times, read as UTC (`2024-01-01T14:00`)
/// - Plain dates, read as UTC midnight (`2024-01-01`)
pub fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Coerces `total` to a finite float. Numeric strings are accepted.
pub fn parse_total(value: &Value) -> ReceiptResult<f64> {
    let total = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    total
        .filter(|t| t.is_finite())
        .ok_or_else(|| ReceiptError::malformed(format!("total is not numeric: {value}")))
}

// =============================================================================
// Identity Hash
// =============================================================================

/// Deterministic 16-character identity for a receipt.
///
/// Joins the four fields with `_`, digests the UTF-8 bytes with SHA-256,
/// base64-encodes the digest (URL-safe, unpadded) and keeps the first 16
/// characters. Encoding the joined text directly would make the prefix
/// depend on the `rent_receipt` tag alone.
///
/// Used as a dedup key, not as a security token: receipts sharing
/// `(type, id, client, timestamp)` share an identity on purpose.
///
/// ```rust
/// use casa_core::validation::identity_hash;
///
/// let a = identity_hash("rent_receipt", "1", "Ana", "2024-01-01T14:00:00Z");
/// let b = identity_hash("rent_receipt", "1", "Ana", "2024-01-01T14:00:00Z");
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 16);
/// ```
pub fn identity_hash(kind: &str, id: &str, client: &str, timestamp: &str) -> String {
    let joined = format!("{kind}_{id}_{client}_{timestamp}");
    URL_SAFE_NO_PAD
        .encode(Sha256::digest(joined.as_bytes()))
        .chars()
        .take(RECEIPT_HASH_LEN)
        .collect()
}

/// Identity hash of raw input, without validating it.
///
/// Returns `None` when the input cannot be resolved to an object or any of
/// the four hashed fields is absent.
pub fn identity_hash_of<'a>(input: impl Into<QrInput<'a>>) -> Option<String> {
    let object = input.into().to_object().ok()?;
    let field = |name: &str| object.get(name).map(field_text);

    Some(identity_hash(
        &field("type")?,
        &field("id")?,
        &field("client")?,
        &field("timestamp")?,
    ))
}

// =============================================================================
// Receipt Validation
// =============================================================================

/// Validates a scanned rental receipt against `now`.
///
/// ## Rules (first failure wins)
/// 1. Input resolves to a JSON object → else `MalformedInput`
/// 2. All of [`REQUIRED_FIELDS`] present → else `MissingFields`
/// 3. `type == "rent_receipt"` → else `InvalidType`
/// 4. `checkIn`, `checkOut`, `timestamp` parse → else `InvalidDates`
/// 5. `checkOut > checkIn` → else `InvalidStayRange`
/// 6. `timestamp >= now - retention_days` → else `Expired`
/// 7. `total` is numeric → else `MalformedInput`
///
/// The sign and magnitude of `total` do not matter.
pub fn validate_receipt<'a>(
    input: impl Into<QrInput<'a>>,
    now: DateTime<Utc>,
    retention_days: u32,
) -> ReceiptResult<VerifiedReceipt> {
    let object = input.into().to_object()?;

    let missing = missing_fields(&object);
    if !missing.is_empty() {
        return Err(ReceiptError::MissingFields { fields: missing });
    }

    // Every required field is present past this point.
    let text = |name: &str| object.get(name).map(field_text).unwrap_or_default();

    if object.get("type") != Some(&Value::String(RECEIPT_TYPE.to_string())) {
        return Err(ReceiptError::InvalidType {
            found: text("type"),
        });
    }

    let instant = |name: &str| match object.get(name) {
        Some(Value::String(s)) => parse_instant(s),
        _ => None,
    };
    let dates: Vec<(&str, Option<DateTime<Utc>>)> =
        DATE_FIELDS.iter().map(|name| (*name, instant(*name))).collect();

    let (check_in, check_out, issued_at) = match dates.as_slice() {
        [(_, Some(check_in)), (_, Some(check_out)), (_, Some(issued_at))] => {
            (*check_in, *check_out, *issued_at)
        }
        _ => {
            return Err(ReceiptError::InvalidDates {
                fields: dates
                    .iter()
                    .filter(|(_, parsed)| parsed.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect(),
            })
        }
    };

    if check_out <= check_in {
        return Err(ReceiptError::InvalidStayRange);
    }

    if let Some(cutoff) = now.checked_sub_signed(Duration::days(i64::from(retention_days))) {
        if issued_at < cutoff {
            return Err(ReceiptError::Expired {
                issued_at: text("timestamp"),
                retention_days,
            });
        }
    }

    let total = match object.get("total") {
        Some(value) => parse_total(value)?,
        None => return Err(ReceiptError::malformed("total is missing")),
    };

    let payload = ReceiptPayload {
        kind: text("type"),
        id: text("id"),
        client: text("client"),
        room: text("room"),
        check_in: text("checkIn"),
        check_out: text("checkOut"),
        total,
        timestamp: text("timestamp"),
    };
    let hash = identity_hash(
        &payload.kind,
        &payload.id,
        &payload.client,
        &payload.timestamp,
    );

    Ok(VerifiedReceipt {
        payload,
        hash,
        check_in,
        check_out,
        issued_at,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
