//! Replaying adapters that serve a cassette back in recorded order.
//!
//! All adapters of one context share a single [`CassetteReplayer`].

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod tasks;

pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
pub use id_gen::ReplayingIdGenerator;
pub use tasks::ReplayingRemoteTasks;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;

/// Take the next recorded output for `port::method` and decode it.
///
/// Mirror of `recording::record_interaction`.
///
/// # Panics
///
/// Panics if the cassette is exhausted or the output does not decode into `T`.
pub(crate) fn next_value<T: DeserializeOwned>(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> T {
    let output = {
        let mut guard = replayer.lock().expect("replayer lock poisoned");
        guard.next_output(port, method)
    };
    serde_json::from_value(output)
        .unwrap_or_else(|e| panic!("{port}::{method}: cassette output does not decode: {e}"))
}

#[cfg(test)]
pub(crate) fn replayer_of(
    interactions: Vec<crate::cassette::format::Interaction>,
) -> Arc<Mutex<CassetteReplayer>> {
    let cassette = crate::cassette::format::Cassette {
        name: "test".into(),
        recorded_at: chrono::Utc::now(),
        version: "0.0.0".into(),
        interactions,
    };
    Arc::new(Mutex::new(CassetteReplayer::new(&cassette)))
}
