//! Recording adapters that append every port call to a cassette.

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod tasks;

pub use clock::RecordingClock;
pub use filesystem::RecordingFileSystem;
pub use id_gen::RecordingIdGenerator;
pub use tasks::RecordingRemoteTasks;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

/// Record an interaction whose output serializes as-is.
///
/// Mirror of `replaying::next_value`.
pub(crate) fn record_interaction<I, O>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let input_json = serde_json::to_value(input).expect("failed to serialize recording input");
    let output_json = serde_json::to_value(output).expect("failed to serialize recording output");

    let mut guard = recorder.lock().expect("recorder lock poisoned");
    guard.record(port, method, input_json, output_json);
}

/// Record a filesystem `Result` whose error is only displayable.
///
/// `Ok(v)` becomes `{"Ok": v}` and `Err(e)` becomes `{"Err": e.to_string()}`,
/// the same shape serde gives a `Result<T, String>`.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let output: Result<&T, String> = result.as_ref().map_err(ToString::to_string);
    record_interaction(recorder, port, method, input, &output);
}
