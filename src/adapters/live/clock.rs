//! Live clock using the system clock and local time zone.

use chrono::{DateTime, FixedOffset, Local};

use crate::ports::clock::Clock;

/// Live clock that returns the real current local time.
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}
