//! Progress ledger: per-definition cycle progress, persisted as one JSON object.
//!
//! ```json
//! {
//!   "Empty trashcan / 3 times week": { "progress": 2, "lastReset": "2024-06-10" }
//! }
//! ```
//!
//! The ledger is read once per run, mutated in memory and written back once.
//! A corrupt ledger is treated as empty rather than blocking the run.

pub mod lease;
pub mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub use lease::{LeaseError, RunLease};
pub use store::LedgerStore;

/// Progress of one definition within its current cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    /// Instances posted so far in the current cycle.
    #[serde(default)]
    pub progress: u32,
    /// Day key of the last reset, empty when never reset.
    #[serde(default)]
    pub last_reset: String,
}

/// All progress records, keyed by definition identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    records: BTreeMap<String, ProgressRecord>,
}

impl Ledger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a persisted ledger, falling back to an empty one on any error.
    #[must_use]
    pub fn from_json(text: &str) -> Self {
        if text.trim().is_empty() {
            return Self::new();
        }
        match serde_json::from_str(text) {
            Ok(ledger) => ledger,
            Err(err) => {
                warn!(error = %err, "ledger is not valid JSON, starting from an empty ledger");
                Self::new()
            }
        }
    }

    /// Serializes the ledger as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The record for `key`, or a zeroed one if the key is new.
    ///
    /// A zeroed record is not stored until it is passed to [`Ledger::put`].
    #[must_use]
    pub fn get(&self, key: &str) -> ProgressRecord {
        self.records.get(key).cloned().unwrap_or_default()
    }

    /// Stores the record for `key`, replacing any previous one.
    pub fn put(&mut self, key: impl Into<String>, record: ProgressRecord) {
        self.records.insert(key.into(), record);
    }

    /// Returns `true` if a record exists for `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no record is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProgressRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }
}
