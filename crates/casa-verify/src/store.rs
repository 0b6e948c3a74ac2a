//! # Validation Store
//!
//! Where validation records live.
//!
//! ## Store Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ReceiptValidator                                                      │
//! │       │                                                                 │
//! │       │  RwLock<S: ValidationStore>                                    │
//! │       ▼                                                                 │
//! │  ValidationStore (capability)                                          │
//! │  ├── get(&self, hash)                                                  │
//! │  ├── set(&mut self, record)                                            │
//! │  ├── delete(&mut self, hash)                                           │
//! │  └── records(&self)                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  InMemoryStore (default: process-local, gone on restart)               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The validator owns its store exclusively; nothing else reads or writes
//! records except through the validator's operations. Locking is the
//! validator's job, so implementations are plain single-threaded maps.
//! Methods hand out owned records so a database-backed store can implement
//! the trait without borrowing from a connection.

use std::collections::HashMap;

use casa_core::ValidationRecord;

/// Keyed storage for validation records.
pub trait ValidationStore: Send + Sync {
    /// Looks up a record by hash.
    fn get(&self, hash: &str) -> Option<ValidationRecord>;

    /// Inserts a record, replacing any record with the same hash.
    fn set(&mut self, record: ValidationRecord);

    /// Removes a record, returning it if it was there.
    fn delete(&mut self, hash: &str) -> Option<ValidationRecord>;

    /// Snapshot of every record, in no particular order.
    fn records(&self) -> Vec<ValidationRecord>;

    /// Number of records.
    fn len(&self) -> usize {
        self.records().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, hash: &str) -> bool {
        self.get(hash).is_some()
    }
}

/// Process-local store. Records do not survive a restart.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: HashMap<String, ValidationRecord>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ValidationStore for InMemoryStore {
    fn get(&self, hash: &str) -> Option<ValidationRecord> {
        self.records.get(hash).cloned()
    }

    fn set(&mut self, record: ValidationRecord) {
        self.records.insert(record.hash.clone(), record);
    }

    fn delete(&mut self, hash: &str) -> Option<ValidationRecord> {
        self.records.remove(hash)
    }

    fn records(&self) -> Vec<ValidationRecord> {
        self.records.values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn contains(&self, hash: &str) -> bool {
        self.records.contains_key(hash)
    }
}
