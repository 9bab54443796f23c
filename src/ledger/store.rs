//! Loading and saving the ledger through the `FileSystem` port.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::Ledger;
use crate::ports::FileSystem;

/// Persistence for the [`Ledger`].
///
/// All I/O goes through the `FileSystem` port so that the store works with
/// live, replaying, recording and in-memory adapters.
pub struct LedgerStore<'a> {
    fs: &'a dyn FileSystem,
    path: PathBuf,
}

impl<'a> LedgerStore<'a> {
    /// Creates a store for the ledger file at `path`.
    #[must_use]
    pub fn new(fs: &'a dyn FileSystem, path: &Path) -> Self {
        Self { fs, path: path.to_path_buf() }
    }

    /// Path of the ledger file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the ledger. Never fails: a missing, unreadable or corrupt file
    /// yields an empty ledger.
    #[must_use]
    pub fn load(&self) -> Ledger {
        if !self.fs.exists(&self.path) {
            debug!(path = %self.path.display(), "no ledger yet, starting empty");
            return Ledger::new();
        }
        match self.fs.read_to_string(&self.path) {
            Ok(text) => Ledger::from_json(&text),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read ledger, starting empty");
                Ledger::new()
            }
        }
    }

    /// Writes the whole ledger, replacing the previous file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    pub fn save(&self, ledger: &Ledger) -> Result<(), String> {
        let json = ledger.to_json().map_err(|e| format!("Failed to serialize ledger: {e}"))?;
        self.fs
            .write(&self.path, &json)
            .map_err(|e| format!("Failed to write ledger {}: {e}", self.path.display()))
    }
}
