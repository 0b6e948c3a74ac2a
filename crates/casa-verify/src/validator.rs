//! # Receipt Validator
//!
//! Validates scanned rental receipts and keeps the book of receipts already
//! validated by this process.
//!
//! ## Validation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Receipt Validator Flow                               │
//! │                                                                         │
//! │  QR text / JSON                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  casa_core::validate_receipt(input, clock.now(), retention_days)       │
//! │       │                                                                 │
//! │       ├── Err(ReceiptError) ──► returned as-is, store untouched        │
//! │       │                                                                 │
//! │       └── Ok(VerifiedReceipt)                                          │
//! │              │                                                          │
//! │              ▼                                                          │
//! │  store.write().set(ValidationRecord { hash, payload, validatedAt })    │
//! │              │                                                          │
//! │              ▼                                                          │
//! │  describe() ──► ReceiptDetails for the receipt view / PDF              │
//! │                                                                         │
//! │  LOCKING:                                                              │
//! │  • validate, cleanup_older_than        → write lock                    │
//! │  • is_already_validated, stats, export → read lock                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Duration;
use tracing::{debug, info};

use casa_core::error::ReceiptResult;
use casa_core::validation::identity_hash_of;
use casa_core::{
    describe_receipt, validate_receipt, DisplayOptions, QrInput, ReceiptDetails,
    ValidationExport, ValidationRecord, ValidationStats, VerifiedReceipt,
};

use crate::clock::{Clock, SystemClock};
use crate::config::{ValidationSettings, VerifierConfig};
use crate::error::VerifierResult;
use crate::store::{InMemoryStore, ValidationStore};

// =============================================================================
// Receipt Validator
// =============================================================================

/// Validates rental receipt QRs and tracks which ones were already seen.
///
/// Share it behind an `Arc`; every operation takes `&self`.
#[derive(Debug)]
pub struct ReceiptValidator<S: ValidationStore = InMemoryStore> {
    /// Validation records, keyed by identity hash.
    store: RwLock<S>,

    clock: Arc<dyn Clock>,

    settings: ValidationSettings,

    display: DisplayOptions,
}

impl ReceiptValidator<InMemoryStore> {
    /// In-memory validator on the system clock with default settings.
    pub fn new() -> Self {
        ReceiptValidator {
            store: RwLock::new(InMemoryStore::new()),
            clock: Arc::new(SystemClock),
            settings: ValidationSettings::default(),
            display: DisplayOptions::default(),
        }
    }

    /// In-memory validator on the system clock.
    pub fn from_config(config: &VerifierConfig) -> VerifierResult<Self> {
        Self::with_parts(InMemoryStore::new(), Arc::new(SystemClock), config)
    }
}

impl Default for ReceiptValidator<InMemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ValidationStore> ReceiptValidator<S> {
    /// Builds a validator over an injected store and clock.
    pub fn with_parts(store: S, clock: Arc<dyn Clock>, config: &VerifierConfig) -> VerifierResult<Self> {
        config.validate()?;

        Ok(ReceiptValidator {
            store: RwLock::new(store),
            clock,
            settings: config.validation.clone(),
            display: config.display_options()?,
        })
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validates a receipt QR and records it on success.
    ///
    /// Rejections come back as [`ReceiptError`](casa_core::ReceiptError)
    /// values and leave the store untouched. Re-validating a receipt with the
    /// same identity replaces its record.
    pub fn validate<'a>(&self, input: impl Into<QrInput<'a>>) -> ReceiptResult<VerifiedReceipt> {
        let now = self.clock.now();

        match validate_receipt(input, now, self.settings.retention_days) {
            Ok(receipt) => {
                let record = ValidationRecord::new(&receipt, now, self.settings.scanner_name.clone());
                self.write_store().set(record);

                info!(
                    hash = %receipt.hash,
                    receipt_id = %receipt.payload.id,
                    room = %receipt.payload.room,
                    "Receipt validated"
                );
                Ok(receipt)
            }
            Err(err) => {
                debug!(kind = %err.kind(), error = %err, "Receipt rejected");
                Err(err)
            }
        }
    }

    /// Validates a receipt QR and renders its display view.
    pub fn describe<'a>(&self, input: impl Into<QrInput<'a>>) -> ReceiptResult<ReceiptDetails> {
        let receipt = self.validate(input)?;
        Ok(describe_receipt(&receipt, &self.display))
    }

    /// Whether a receipt with the same identity was validated and is still
    /// on record. Unreadable input is simply "not validated".
    pub fn is_already_validated<'a>(&self, input: impl Into<QrInput<'a>>) -> bool {
        identity_hash_of(input).is_some_and(|hash| self.read_store().contains(&hash))
    }

    // =========================================================================
    // Maintenance
    // =========================================================================

    /// Drops records validated `max_age_days` or more ago. Returns how many
    /// were removed.
    ///
    /// With `max_age_days = 0` every record validated up to now is removed.
    pub fn cleanup_older_than(&self, max_age_days: u32) -> usize {
        let now = self.clock.now();
        let Some(cutoff) = now.checked_sub_signed(Duration::days(i64::from(max_age_days))) else {
            return 0;
        };

        let mut store = self.write_store();
        let stale: Vec<String> = store
            .records()
            .into_iter()
            .filter(|record| record.validated_at <= cutoff)
            .map(|record| record.hash)
            .collect();

        for hash in &stale {
            store.delete(hash);
        }

        info!(
            removed = stale.len(),
            remaining = store.len(),
            max_age_days,
            "Validation records cleaned up"
        );
        stale.len()
    }

    /// [`cleanup_older_than`](Self::cleanup_older_than) with the configured
    /// `cleanup_max_age_days`.
    pub fn cleanup_stale(&self) -> usize {
        self.cleanup_older_than(self.settings.cleanup_max_age_days)
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Record count, the most recent records and per-day counts.
    pub fn stats(&self) -> ValidationStats {
        let mut records = self.read_store().records();

        let mut validations_by_day: BTreeMap<String, usize> = BTreeMap::new();
        for record in &records {
            *validations_by_day
                .entry(self.display.local_day(record.validated_at))
                .or_default() += 1;
        }

        let total_validated = records.len();
        records.sort_by(|a, b| {
            b.validated_at
                .cmp(&a.validated_at)
                .then_with(|| a.hash.cmp(&b.hash))
        });
        records.truncate(self.settings.recent_limit);

        ValidationStats {
            total_validated,
            recent_validations: records,
            validations_by_day,
        }
    }

    /// Snapshot of every record, oldest validation first.
    ///
    /// Only builds the data; the caller decides where it is written.
    pub fn export_all(&self) -> ValidationExport {
        let mut validations = self.read_store().records();
        validations.sort_by(|a, b| {
            a.validated_at
                .cmp(&b.validated_at)
                .then_with(|| a.hash.cmp(&b.hash))
        });

        ValidationExport {
            export_date: self.clock.now(),
            total_validations: validations.len(),
            validations,
        }
    }

    /// [`export_all`](Self::export_all) rendered as pretty JSON.
    pub fn export_json(&self) -> VerifierResult<String> {
        Ok(self.export_all().to_json_pretty()?)
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.read_store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // Locking
    // =========================================================================

    // A poisoned lock still holds a consistent map: every write is a single
    // set or delete.
    fn read_store(&self) -> RwLockReadGuard<'_, S> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_store(&self) -> RwLockWriteGuard<'_, S> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use casa_core::{ErrorKind, ReceiptError};
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::{json, Value};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn validator() -> (ReceiptValidator, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start()));
        let validator = ReceiptValidator::with_parts(
            InMemoryStore::new(),
            clock.clone(),
            &VerifierConfig::default(),
        )
        .unwrap();
        (validator, clock)
    }

    fn receipt(id: i64, client: &str) -> Value {
        json!({
            "type": "rent_receipt",
            "id": id,
            "client": client,
            "room": "101",
            "checkIn": "2024-01-01T14:00:00Z",
            "checkOut": "2024-01-02T12:00:00Z",
            "total": 500,
            "timestamp": start().to_rfc3339()
        })
    }

    #[test]
    fn test_validate_records_receipt() {
        let (validator, _) = validator();
        let qr = receipt(1, "Ana");

        assert!(!validator.is_already_validated(&qr));
        let verified = validator.validate(&qr).unwrap();
        assert!(validator.is_already_validated(&qr));
        assert_eq!(validator.len(), 1);

        let export = validator.export_all();
        let record = &export.validations[0];
        assert_eq!(record.hash, verified.hash);
        assert_eq!(record.validated_at, start());
        assert_eq!(record.validated_by, "QR Scanner");
        assert_eq!(record.payload.client, "Ana");
    }

    #[test]
    fn test_rejection_leaves_store_untouched() {
        let (validator, _) = validator();
        let err = validator.validate("not json").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);

        let mut qr = receipt(1, "Ana");
        qr["checkOut"] = qr["checkIn"].clone();
        assert_eq!(
            validator.validate(&qr).unwrap_err(),
            ReceiptError::InvalidStayRange
        );

        assert!(validator.is_empty());
        assert!(!validator.is_already_validated("not json"));
    }

    #[test]
    fn test_revalidation_overwrites_record() {
        let (validator, clock) = validator();
        let qr = receipt(1, "Ana");

        validator.validate(&qr).unwrap();
        clock.advance(Duration::hours(2));
        validator.validate(&qr).unwrap();

        assert_eq!(validator.len(), 1);
        assert_eq!(
            validator.export_all().validations[0].validated_at,
            start() + Duration::hours(2)
        );
    }

    #[test]
    fn test_describe() {
        let (validator, _) = validator();
        let details = validator.describe(&receipt(1, "Ana")).unwrap();
        assert_eq!(details.reservation.nights, 1);
        assert_eq!(details.payment.total, "500.00");
        assert!(validator.is_already_validated(&receipt(1, "Ana")));

        let err = validator.describe("[]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_expiry_follows_clock() {
        let (validator, clock) = validator();
        let qr = receipt(1, "Ana");

        clock.advance(Duration::days(366));
        let err = validator.validate(&qr).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Expired);
    }

    #[test]
    fn test_cleanup_older_than() {
        let (validator, clock) = validator();
        validator.validate(&receipt(1, "Ana")).unwrap();
        clock.advance(Duration::hours(30));
        validator.validate(&receipt(2, "Luis")).unwrap();

        // Ana's record is 30h old, Luis's is fresh.
        assert_eq!(validator.cleanup_older_than(1), 1);
        assert!(!validator.is_already_validated(&receipt(1, "Ana")));
        assert!(validator.is_already_validated(&receipt(2, "Luis")));

        assert_eq!(validator.cleanup_older_than(0), 1);
        assert!(validator.is_empty());
        assert_eq!(validator.stats().total_validated, 0);
    }

    #[test]
    fn test_cleanup_stale_uses_configured_age() {
        let (validator, clock) = validator();
        validator.validate(&receipt(1, "Ana")).unwrap();

        clock.advance(Duration::hours(23));
        assert_eq!(validator.cleanup_stale(), 0);

        clock.advance(Duration::hours(1));
        assert_eq!(validator.cleanup_stale(), 1);
    }

    #[test]
    fn test_cleanup_with_huge_age_removes_nothing() {
        let (validator, _) = validator();
        validator.validate(&receipt(1, "Ana")).unwrap();
        assert_eq!(validator.cleanup_older_than(u32::MAX), 0);
        assert_eq!(validator.len(), 1);
    }

    #[test]
    fn test_stats() {
        let (validator, clock) = validator();
        for id in 1..=12 {
            validator.validate(&receipt(id, "Ana")).unwrap();
            clock.advance(Duration::hours(1));
        }

        let stats = validator.stats();
        assert_eq!(stats.total_validated, 12);
        assert_eq!(stats.recent_validations.len(), 10);
        assert_eq!(stats.recent_validations[0].payload.id, "12");
        assert_eq!(stats.recent_validations[9].payload.id, "3");

        // 12:00 .. 23:00 on June 1st.
        assert_eq!(stats.validations_by_day.len(), 1);
        assert_eq!(stats.validations_by_day.get("2024-06-01"), Some(&12));
    }

    #[test]
    fn test_stats_group_by_display_day() {
        let clock = Arc::new(ManualClock::new(start()));
        let mut config = VerifierConfig::default();
        config.display.utc_offset_minutes = -360;
        let validator =
            ReceiptValidator::with_parts(InMemoryStore::new(), clock.clone(), &config).unwrap();

        validator.validate(&receipt(1, "Ana")).unwrap();
        clock.advance(Duration::hours(13)); // 01:00 UTC next day, 19:00 local
        validator.validate(&receipt(2, "Luis")).unwrap();

        let stats = validator.stats();
        assert_eq!(stats.validations_by_day.get("2024-06-01"), Some(&2));
    }

    #[test]
    fn test_export_all() {
        let (validator, clock) = validator();
        validator.validate(&receipt(2, "Luis")).unwrap();
        clock.advance(Duration::minutes(5));
        validator.validate(&receipt(1, "Ana")).unwrap();

        let export = validator.export_all();
        assert_eq!(export.total_validations, 2);
        assert_eq!(export.export_date, start() + Duration::minutes(5));
        assert_eq!(export.validations[0].payload.client, "Luis");
        assert_eq!(export.validations[1].payload.client, "Ana");

        let json = validator.export_json().unwrap();
        assert!(json.contains("\"exportDate\""));
        assert!(json.contains("\"totalValidations\": 2"));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = VerifierConfig::default();
        config.validation.recent_limit = 0;
        let result = ReceiptValidator::with_parts(
            InMemoryStore::new(),
            Arc::new(SystemClock),
            &config,
        );
        assert!(result.is_err());
    }
}
