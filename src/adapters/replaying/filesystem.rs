//! Replaying adapter for the `FileSystem` port.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use super::next_value;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::FileSystem;

/// Replays recorded filesystem operations from a cassette.
pub struct ReplayingFileSystem {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingFileSystem {
    /// Creates a replaying filesystem backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }

    fn replay<T: DeserializeOwned>(
        &self,
        method: &str,
    ) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
        let recorded: Result<T, String> = next_value(&self.replayer, "fs", method);
        recorded.map_err(Into::into)
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.replay("read_to_string")
    }

    fn write(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.replay("write")
    }

    fn create_new(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        self.replay("create_new")
    }

    fn remove_file(&self, _path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.replay("remove_file")
    }

    fn exists(&self, _path: &Path) -> bool {
        next_value(&self.replayer, "fs", "exists")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::replaying::replayer_of;
    use crate::cassette::format::Interaction;
    use serde_json::json;

    fn fs_call(seq: u64, method: &str, output: serde_json::Value) -> Interaction {
        Interaction {
            seq,
            port: "fs".into(),
            method: method.into(),
            input: json!({"path": "/home/ledger.json"}),
            output,
        }
    }

    #[test]
    fn replays_contents_and_errors() {
        let fs = ReplayingFileSystem::new(replayer_of(vec![
            fs_call(0, "read_to_string", json!({"Ok": "{}"})),
            fs_call(1, "read_to_string", json!({"Err": "File not found"})),
            fs_call(2, "exists", json!(true)),
            fs_call(3, "create_new", json!({"Ok": false})),
            fs_call(4, "write", json!({"Ok": null})),
        ]));
        let path = Path::new("/home/ledger.json");

        assert_eq!(fs.read_to_string(path).unwrap(), "{}");
        let err = fs.read_to_string(path).unwrap_err();
        assert!(err.to_string().contains("File not found"));
        assert!(fs.exists(path));
        assert!(!fs.create_new(path, "x").unwrap());
        fs.write(path, "{}").unwrap();
    }
}
