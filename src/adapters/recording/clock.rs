//! Recording adapter for the `Clock` port.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, FixedOffset};

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::Clock;

/// Records clock reads while delegating to an inner implementation.
pub struct RecordingClock {
    inner: Box<dyn Clock>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingClock {
    /// Creates a new recording clock wrapping the given implementation.
    pub fn new(inner: Box<dyn Clock>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl Clock for RecordingClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let result = self.inner.now();
        record_interaction(&self.recorder, "clock", "now", &(), &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FixedClock;

    #[test]
    fn records_now_with_its_utc_offset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clock.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "test")));

        // Scope the adapter so it's dropped before we try to unwrap
        {
            let clock =
                RecordingClock::new(Box::new(FixedClock::on("2024-03-04")), Arc::clone(&recorder));
            assert_eq!(clock.now().date_naive().to_string(), "2024-03-04");
        }

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        assert_eq!(recorder.len(), 1);
        recorder.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("2024-03-04T09:00:00+02:00"));
    }
}
