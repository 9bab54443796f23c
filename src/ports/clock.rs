//! Clock port for obtaining the current time.

use chrono::{DateTime, FixedOffset};

/// Provides the current time.
///
/// Cycle boundaries are calendar days in the user's local time, so the clock
/// reports its UTC offset alongside the instant. Abstracting time access
/// allows tests and cassette playback to pin "today".
pub trait Clock: Send + Sync {
    /// Returns the current local time.
    fn now(&self) -> DateTime<FixedOffset>;
}
