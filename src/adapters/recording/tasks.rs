//! Recording adapter for the `RemoteTasks` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{NewTask, RemoteTask, RemoteTasks, TaskFuture};

/// Records remote todo traffic while delegating to an inner implementation.
///
/// Results are stored with their structured [`RemoteError`](crate::error::RemoteError)
/// so a replay reproduces the same failure kind.
pub struct RecordingRemoteTasks {
    inner: Box<dyn RemoteTasks>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingRemoteTasks {
    /// Creates a new recording client wrapping the given implementation.
    pub fn new(inner: Box<dyn RemoteTasks>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct IdInput<'a> {
    id: &'a str,
}

impl RemoteTasks for RecordingRemoteTasks {
    fn list_todos(&self) -> TaskFuture<'_, Vec<RemoteTask>> {
        Box::pin(async move {
            let result = self.inner.list_todos().await;
            record_interaction(&self.recorder, "tasks", "list_todos", &(), &result);
            result
        })
    }

    fn create_todo(&self, task: &NewTask) -> TaskFuture<'_, ()> {
        let task = task.clone();
        Box::pin(async move {
            let result = self.inner.create_todo(&task).await;
            record_interaction(&self.recorder, "tasks", "create_todo", &task, &result);
            result
        })
    }

    fn delete_todo(&self, id: &str) -> TaskFuture<'_, ()> {
        let id = id.to_string();
        Box::pin(async move {
            let result = self.inner.delete_todo(&id).await;
            record_interaction(&self.recorder, "tasks", "delete_todo", &IdInput { id: &id }, &result);
            result
        })
    }
}
