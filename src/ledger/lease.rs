//! Run lease: a lock file that keeps two reconciliation passes from
//! interleaving their posts.
//!
//! The lease lives next to the ledger as `<ledger>.lock` and records who took
//! it and when. A lease older than its TTL is considered abandoned (the
//! holder crashed or was killed) and is taken over.

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ports::FileSystem;

/// Why a lease could not be acquired.
#[derive(Debug, Error)]
pub enum LeaseError {
    /// Another run holds a live lease.
    #[error("another run holds the lease (holder {holder}, since {acquired_at})")]
    Held {
        /// Holder id of the running pass.
        holder: String,
        /// When that pass took the lease.
        acquired_at: DateTime<FixedOffset>,
    },

    /// A concurrent run recreated the lease while a stale one was taken over.
    #[error("lease was taken by a concurrent run")]
    Contended,

    /// The lock file could not be created or removed.
    #[error("lease I/O failed: {0}")]
    Io(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct LeaseRecord {
    holder: String,
    acquired_at: DateTime<FixedOffset>,
}

fn io(e: impl std::fmt::Display) -> LeaseError {
    LeaseError::Io(e.to_string())
}

fn read_record(fs: &dyn FileSystem, path: &Path) -> Option<LeaseRecord> {
    let text = fs.read_to_string(path).ok()?;
    serde_json::from_str(&text).ok()
}

/// Guard file held while a stale lease is being replaced.
fn takeover_path(lease: &Path) -> PathBuf {
    let mut name = lease.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
    name.push(".takeover");
    lease.with_file_name(name)
}

/// Path of the lease file guarding `ledger_path`.
#[must_use]
pub fn lease_path(ledger_path: &Path) -> PathBuf {
    let mut name = ledger_path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
    name.push(".lock");
    ledger_path.with_file_name(name)
}

/// A held lease. Released when dropped.
pub struct RunLease<'a> {
    fs: &'a dyn FileSystem,
    path: PathBuf,
    holder: String,
}

impl std::fmt::Debug for RunLease<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunLease").field("path", &self.path).field("holder", &self.holder).finish()
    }
}

impl<'a> RunLease<'a> {
    /// Takes the lease at `path` for `holder`, replacing it if it is older
    /// than `ttl`.
    ///
    /// Replacing a stale lease happens under a `.takeover` guard file, so
    /// only one of several runs that saw the same stale lease can win.
    ///
    /// # Errors
    ///
    /// Returns [`LeaseError::Held`] while another run's lease is live,
    /// [`LeaseError::Contended`] if a concurrent run wins a takeover, and
    /// [`LeaseError::Io`] on filesystem failures.
    pub fn acquire(
        fs: &'a dyn FileSystem,
        path: &Path,
        holder: String,
        now: DateTime<FixedOffset>,
        ttl: TimeDelta,
    ) -> Result<Self, LeaseError> {
        let record = LeaseRecord { holder, acquired_at: now };
        let body = serde_json::to_string(&record).map_err(io)?;
        let held = || {
            debug!(path = %path.display(), holder = %record.holder, "lease acquired");
            Self { fs, path: path.to_path_buf(), holder: record.holder.clone() }
        };

        if fs.create_new(path, &body).map_err(io)? {
            return Ok(held());
        }

        let existing = read_record(fs, path);
        match &existing {
            Some(existing) if now - existing.acquired_at < ttl => {
                return Err(LeaseError::Held {
                    holder: existing.holder.clone(),
                    acquired_at: existing.acquired_at,
                });
            }
            Some(existing) => {
                info!(holder = %existing.holder, since = %existing.acquired_at, "taking over stale lease");
            }
            None => warn!(path = %path.display(), "lease file is unreadable, taking it over"),
        }

        let guard = takeover_path(path);
        if !Self::claim_guard(fs, &guard, &body, now, ttl)? {
            return Err(LeaseError::Contended);
        }
        let expected = existing.map(|r| r.holder);
        let result = Self::replace(fs, path, &body, expected.as_deref(), &record.holder);
        if let Err(e) = fs.remove_file(&guard) {
            warn!(path = %guard.display(), error = %e, "failed to remove takeover guard");
        }
        result.map(|()| held())
    }

    /// Creates the takeover guard, clearing one left behind by a crashed run.
    fn claim_guard(
        fs: &dyn FileSystem,
        guard: &Path,
        body: &str,
        now: DateTime<FixedOffset>,
        ttl: TimeDelta,
    ) -> Result<bool, LeaseError> {
        if fs.create_new(guard, body).map_err(io)? {
            return Ok(true);
        }
        match read_record(fs, guard) {
            Some(other) if now - other.acquired_at < ttl => Ok(false),
            _ => {
                warn!(path = %guard.display(), "clearing abandoned takeover guard");
                fs.remove_file(guard).map_err(io)?;
                fs.create_new(guard, body).map_err(io)
            }
        }
    }

    /// Swaps the lease file for ours if it still holds `expected`.
    fn replace(
        fs: &dyn FileSystem,
        path: &Path,
        body: &str,
        expected: Option<&str>,
        holder: &str,
    ) -> Result<(), LeaseError> {
        let current = read_record(fs, path).map(|r| r.holder);
        if current.is_some() && current.as_deref() != expected {
            return Err(LeaseError::Contended);
        }
        fs.remove_file(path).map_err(io)?;
        if !fs.create_new(path, body).map_err(io)? {
            return Err(LeaseError::Contended);
        }
        match read_record(fs, path) {
            Some(written) if written.holder == holder => Ok(()),
            _ => Err(LeaseError::Contended),
        }
    }

    /// Holder id written into the lease file.
    #[must_use]
    pub fn holder(&self) -> &str {
        &self.holder
    }

    /// Releases the lease now.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for RunLease<'_> {
    fn drop(&mut self) {
        match read_record(self.fs, &self.path) {
            Some(current) if current.holder != self.holder => {
                warn!(path = %self.path.display(), holder = %self.holder, taken_by = %current.holder, "lease was taken over, leaving it in place");
                return;
            }
            None if self.fs.exists(&self.path) => {
                warn!(path = %self.path.display(), "lease file is unreadable, leaving it in place");
                return;
            }
            _ => {}
        }
        if let Err(e) = self.fs.remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "failed to release lease");
        } else {
            debug!(path = %self.path.display(), holder = %self.holder, "lease released");
        }
    }
}
