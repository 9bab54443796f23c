//! Recording session: one cassette shared by every recording adapter.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;

/// Owns the recorder for one `cadence` invocation.
///
/// The cassette is written to `<dir>/<timestamp>.cassette.yaml` when the
/// session is finished.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
    path: PathBuf,
}

impl RecordingSession {
    /// Creates a session writing into `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a cassette with the same timestamp already exists.
    pub fn new(dir: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = dir.join(format!("{timestamp}.cassette.yaml"));
        if path.exists() {
            return Err(format!("Cassette already exists: {}", path.display()));
        }
        let recorder = CassetteRecorder::new(&path, format!("cadence-{timestamp}"));
        Ok(Self { recorder: Arc::new(Mutex::new(recorder)), path })
    }

    /// Shared handle for recording adapters.
    #[must_use]
    pub fn recorder(&self) -> Arc<Mutex<CassetteRecorder>> {
        Arc::clone(&self.recorder)
    }

    /// Where the cassette will be written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the cassette. Every recording adapter must have been dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if adapters still hold the recorder or the file
    /// cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapters still hold the recorder".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn finish_writes_cassette_into_dir() {
        let dir = tempfile::tempdir().unwrap();
        let session = RecordingSession::new(dir.path()).unwrap();
        {
            let recorder = session.recorder();
            recorder.lock().unwrap().record("clock", "now", json!(null), json!("t"));
        }
        let path = session.finish().unwrap();
        assert!(path.starts_with(dir.path()));
        assert!(std::fs::read_to_string(path).unwrap().contains("clock"));
    }

    #[test]
    fn finish_fails_while_adapters_hold_the_recorder() {
        let dir = tempfile::tempdir().unwrap();
        let session = RecordingSession::new(dir.path()).unwrap();
        let _held = session.recorder();
        assert!(session.finish().is_err());
    }
}
