//! Replaying adapter for the `RemoteTasks` port.

use std::sync::{Arc, Mutex};

use super::next_value;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::RemoteError;
use crate::ports::{NewTask, RemoteTask, RemoteTasks, TaskFuture};

/// Serves recorded todo lists and mutation outcomes from a cassette.
pub struct ReplayingRemoteTasks {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingRemoteTasks {
    /// Creates a replaying client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl RemoteTasks for ReplayingRemoteTasks {
    fn list_todos(&self) -> TaskFuture<'_, Vec<RemoteTask>> {
        let result: Result<Vec<RemoteTask>, RemoteError> =
            next_value(&self.replayer, "tasks", "list_todos");
        Box::pin(async move { result })
    }

    fn create_todo(&self, _task: &NewTask) -> TaskFuture<'_, ()> {
        let result: Result<(), RemoteError> = next_value(&self.replayer, "tasks", "create_todo");
        Box::pin(async move { result })
    }

    fn delete_todo(&self, _id: &str) -> TaskFuture<'_, ()> {
        let result: Result<(), RemoteError> = next_value(&self.replayer, "tasks", "delete_todo");
        Box::pin(async move { result })
    }
}
