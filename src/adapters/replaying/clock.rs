//! Replaying adapter for the `Clock` port.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, FixedOffset};

use super::next_value;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::Clock;

/// Returns recorded instants instead of reading the system clock.
pub struct ReplayingClock {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingClock {
    /// Creates a replaying clock backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<FixedOffset> {
        next_value(&self.replayer, "clock", "now")
    }
}
