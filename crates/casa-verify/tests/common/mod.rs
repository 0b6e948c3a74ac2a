//! Shared fixtures for the casa-verify integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use casa_verify::{InMemoryStore, ManualClock, ReceiptValidator, VerifierConfig};

/// Installs a test-friendly subscriber once per binary. Set `RUST_LOG` to
/// see validator logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Fixed "now" every scenario starts from.
pub fn scan_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 15, 0, 0).unwrap()
}

/// Validator over a manual clock set to [`scan_time`].
pub fn manual_validator(config: &VerifierConfig) -> (ReceiptValidator, Arc<ManualClock>) {
    init_tracing();
    let clock = Arc::new(ManualClock::new(scan_time()));
    let validator = ReceiptValidator::with_parts(InMemoryStore::new(), clock.clone(), config)
        .expect("valid config");
    (validator, clock)
}

/// Ana's one-night stay in room 101, generated `age` before [`scan_time`].
pub fn ana_receipt(age: Duration) -> Value {
    json!({
        "type": "rent_receipt",
        "id": 1,
        "client": "Ana",
        "room": "101",
        "checkIn": "2024-01-01T14:00:00Z",
        "checkOut": "2024-01-02T12:00:00Z",
        "total": 500,
        "timestamp": (scan_time() - age).to_rfc3339()
    })
}

/// A distinct receipt per `(desk, n)` pair.
pub fn desk_receipt(desk: usize, n: usize) -> Value {
    json!({
        "type": "rent_receipt",
        "id": desk * 1000 + n,
        "client": format!("Guest {desk}-{n}"),
        "room": format!("{}", 100 + n),
        "checkIn": "2024-01-01T14:00:00Z",
        "checkOut": "2024-01-03T12:00:00Z",
        "total": "1250.50",
        "timestamp": scan_time().to_rfc3339()
    })
}
