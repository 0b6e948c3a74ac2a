//! # Domain Types
//!
//! Receipt verification types shared by the core and the verifier.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ReceiptPayload  │──►│ VerifiedReceipt │──►│ValidationRecord │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  type, id       │   │  payload        │   │  hash           │       │
//! │  │  client, room   │   │  hash           │   │  payload        │       │
//! │  │  checkIn/Out    │   │  parsed instants│   │  validatedAt    │       │
//! │  │  total          │   └────────┬────────┘   └────────┬────────┘       │
//! │  │  timestamp      │            │                     │                │
//! │  └─────────────────┘            ▼                     ▼                │
//! │                        ┌─────────────────┐   ┌─────────────────┐       │
//! │                        │ ReceiptDetails  │   │ ValidationStats │       │
//! │                        │ (display view)  │   │ ValidationExport│       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All outbound types serialize with camelCase keys, matching the JSON the
//! scanning UI and the PDF/email generators already consume.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Receipt Payload
// =============================================================================

/// The validated fields of a scanned rental receipt.
///
/// Scalar fields (`id`, `client`, `room`) arrive as JSON strings or numbers
/// and are normalized to their printed form, so a scanned `"id": 1` is
/// stored and exported as `"id": "1"`. The identity hash is computed over
/// the same printed form, which keeps `1` and `"1"` the same receipt.
/// Numeric strings in `total` are the reverse case: `"500"` is stored as
/// `500.0`. Date fields keep the exact text that was scanned; the parsed
/// instants live on [`VerifiedReceipt`]. Fields outside this set are not
/// kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReceiptPayload {
    /// Receipt discriminator, always `rent_receipt` once validated.
    #[serde(rename = "type")]
    pub kind: String,

    /// Rental record identifier.
    pub id: String,

    /// Guest display name.
    pub client: String,

    /// Room number or label.
    pub room: String,

    pub check_in: String,

    pub check_out: String,

    /// Amount charged, in pesos.
    pub total: f64,

    /// When the receipt was generated.
    pub timestamp: String,
}

// =============================================================================
// Verified Receipt
// =============================================================================

/// Successful outcome of validating a QR payload.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct VerifiedReceipt {
    pub payload: ReceiptPayload,

    /// Identity hash, see [`identity_hash`](crate::validation::identity_hash).
    pub hash: String,

    #[ts(as = "String")]
    pub check_in: DateTime<Utc>,

    #[ts(as = "String")]
    pub check_out: DateTime<Utc>,

    /// Parsed `timestamp`.
    #[ts(as = "String")]
    pub issued_at: DateTime<Utc>,
}

// =============================================================================
// Validation Record
// =============================================================================

/// Bookkeeping entry for a receipt validated during this process lifetime.
///
/// Created once per successful validation and never mutated afterwards; a
/// re-validation of the same hash replaces the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ValidationRecord {
    pub hash: String,

    pub payload: ReceiptPayload,

    /// Wall-clock time of validation (not the receipt's own timestamp).
    #[ts(as = "String")]
    pub validated_at: DateTime<Utc>,

    /// Which scanner performed the validation.
    pub validated_by: String,
}

impl ValidationRecord {
    /// Builds the record for a freshly verified receipt.
    pub fn new(
        receipt: &VerifiedReceipt,
        validated_at: DateTime<Utc>,
        validated_by: impl Into<String>,
    ) -> Self {
        ValidationRecord {
            hash: receipt.hash.clone(),
            payload: receipt.payload.clone(),
            validated_at,
            validated_by: validated_by.into(),
        }
    }
}

// =============================================================================
// Receipt Details (display view)
// =============================================================================

/// Display-ready view of a verified receipt, consumed verbatim by the
/// receipt views and PDF generator.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReceiptDetails {
    pub id: String,

    /// Human label for the receipt kind ("Comprobante de Renta").
    #[serde(rename = "type")]
    pub kind: String,

    pub client: GuestInfo,

    pub reservation: ReservationInfo,

    pub payment: PaymentInfo,

    pub metadata: ReceiptMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GuestInfo {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReservationInfo {
    pub room: String,

    /// Long Spanish date, e.g. "1 de enero de 2024, 14:00".
    pub check_in: String,

    pub check_out: String,

    /// Whole nights, rounded up. Always at least 1.
    pub nights: i64,

    /// "noche" or "noches".
    pub nights_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentInfo {
    /// Total with exactly two decimals, e.g. "500.00".
    pub total: String,

    /// ISO 4217 code.
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReceiptMetadata {
    pub generated_at: String,

    pub hash: String,

    pub status: VerificationStatus,
}

/// Status marker shown on verified receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum VerificationStatus {
    #[serde(rename = "Verificado")]
    Verified,
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationStatus::Verified => write!(f, "Verificado"),
        }
    }
}

// =============================================================================
// Stats & Export
// =============================================================================

/// Summary of the validated-receipt store.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ValidationStats {
    pub total_validated: usize,

    /// Most recent records, newest first.
    pub recent_validations: Vec<ValidationRecord>,

    /// Count of validations per local calendar day (`YYYY-MM-DD`).
    pub validations_by_day: BTreeMap<String, usize>,
}

/// Audit snapshot of every validation record.
///
/// The verifier only builds the snapshot; writing it somewhere is the
/// caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ValidationExport {
    #[ts(as = "String")]
    pub export_date: DateTime<Utc>,

    pub total_validations: usize,

    /// Oldest validation first.
    pub validations: Vec<ValidationRecord>,
}

impl ValidationExport {
    /// Pretty JSON rendering of the snapshot.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// File name the audit tooling uses for exports:
    /// `validations_export_<epoch millis>.json`.
    pub fn suggested_file_name(&self) -> String {
        format!(
            "validations_export_{}.json",
            self.export_date.timestamp_millis()
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn payload() -> ReceiptPayload {
        ReceiptPayload {
            kind: "rent_receipt".to_string(),
            id: "1".to_string(),
            client: "Ana".to_string(),
            room: "101".to_string(),
            check_in: "2024-01-01T14:00:00Z".to_string(),
            check_out: "2024-01-02T12:00:00Z".to_string(),
            total: 500.0,
            timestamp: "2024-01-01T14:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_payload_serializes_with_original_keys() {
        let json = serde_json::to_value(payload()).unwrap();
        assert_eq!(json["type"], "rent_receipt");
        assert_eq!(json["checkIn"], "2024-01-01T14:00:00Z");
        assert_eq!(json["checkOut"], "2024-01-02T12:00:00Z");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_export_file_name_and_json() {
        let export_date = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let export = ValidationExport {
            export_date,
            total_validations: 1,
            validations: vec![ValidationRecord {
                hash: "cmVudF9yZWNlaXB0".to_string(),
                payload: payload(),
                validated_at: export_date,
                validated_by: "QR Scanner".to_string(),
            }],
        };

        assert_eq!(
            export.suggested_file_name(),
            format!("validations_export_{}.json", export_date.timestamp_millis())
        );

        let json = export.to_json_pretty().unwrap();
        assert!(json.contains("\"totalValidations\": 1"));
        assert!(json.contains("\"validatedBy\": \"QR Scanner\""));

        let back: ValidationExport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, export);
    }

    #[test]
    fn test_status_renders_in_spanish() {
        assert_eq!(VerificationStatus::Verified.to_string(), "Verificado");
        assert_eq!(
            serde_json::to_string(&VerificationStatus::Verified).unwrap(),
            "\"Verificado\""
        );
    }
}
