//! In-memory port doubles shared by unit tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, FixedOffset};

use crate::error::RemoteError;
use crate::ports::{Clock, FileSystem, NewTask, RemoteTask, RemoteTasks, TaskFuture};

/// In-memory filesystem for testing without touching disk.
pub struct MemFs {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemFs {
    pub fn new() -> Self {
        Self { files: Mutex::new(HashMap::new()) }
    }

    pub fn insert(&self, path: &str, contents: &str) {
        self.files.lock().unwrap().insert(PathBuf::from(path), contents.to_string());
    }

    pub fn contents(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }
}

impl FileSystem for MemFs {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let files = self.files.lock().unwrap();
        files.get(path).cloned().ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn create_new(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let mut files = self.files.lock().unwrap();
        if files.contains_key(path) {
            return Ok(false);
        }
        files.insert(path.to_path_buf(), contents.to_string());
        Ok(true)
    }

    fn remove_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.files.lock().unwrap().remove(path);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

/// Lets a test keep a handle on a `MemFs` it moved into a context.
impl FileSystem for Arc<MemFs> {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.as_ref().read_to_string(path)
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.as_ref().write(path, contents)
    }

    fn create_new(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        self.as_ref().create_new(path, contents)
    }

    fn remove_file(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.as_ref().remove_file(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.as_ref().exists(path)
    }
}

/// Clock pinned to one instant.
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    /// Pins the clock at 09:00 local time (UTC+2) on the given day.
    pub fn on(day: &str) -> Self {
        Self(DateTime::parse_from_rfc3339(&format!("{day}T09:00:00+02:00")).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Which remote calls a [`FakeTasks`] should fail.
#[derive(Default, Clone, Copy)]
pub struct Failures {
    pub list: bool,
    pub create: bool,
    pub delete: bool,
}

/// In-memory remote todo list.
#[derive(Default)]
pub struct FakeTasks {
    open: Mutex<Vec<RemoteTask>>,
    created: Mutex<Vec<NewTask>>,
    deleted: Mutex<Vec<String>>,
    list_calls: Mutex<usize>,
    failures: Mutex<Failures>,
    next_id: Mutex<u32>,
}

impl FakeTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given open labels.
    pub fn with_open(labels: &[&str]) -> Self {
        let fake = Self::new();
        for label in labels {
            fake.add_open(label);
        }
        fake
    }

    pub fn add_open(&self, label: &str) -> String {
        let id = self.fresh_id();
        self.open.lock().unwrap().push(RemoteTask {
            id: id.clone(),
            text: label.to_string(),
            date: None,
        });
        id
    }

    /// Simulates the user ticking off a todo.
    pub fn complete(&self, label: &str) {
        self.open.lock().unwrap().retain(|t| t.text != label);
    }

    pub fn fail(&self, failures: Failures) {
        *self.failures.lock().unwrap() = failures;
    }

    pub fn open_labels(&self) -> Vec<String> {
        self.open.lock().unwrap().iter().map(|t| t.text.clone()).collect()
    }

    pub fn created(&self) -> Vec<NewTask> {
        self.created.lock().unwrap().clone()
    }

    pub fn created_labels(&self) -> Vec<String> {
        self.created().into_iter().map(|t| t.text).collect()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }

    fn fresh_id(&self) -> String {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        format!("task-{next}")
    }

    fn failures(&self) -> Failures {
        *self.failures.lock().unwrap()
    }
}

fn server_error() -> RemoteError {
    RemoteError::Status { status: 500, body: "internal error".into() }
}

impl RemoteTasks for FakeTasks {
    fn list_todos(&self) -> TaskFuture<'_, Vec<RemoteTask>> {
        *self.list_calls.lock().unwrap() += 1;
        let result =
            if self.failures().list { Err(server_error()) } else { Ok(self.open.lock().unwrap().clone()) };
        Box::pin(async move { result })
    }

    fn create_todo(&self, task: &NewTask) -> TaskFuture<'_, ()> {
        let result = if self.failures().create {
            Err(server_error())
        } else {
            let id = self.fresh_id();
            self.open.lock().unwrap().push(RemoteTask {
                id,
                text: task.text.clone(),
                date: Some(task.date.clone()),
            });
            self.created.lock().unwrap().push(task.clone());
            Ok(())
        };
        Box::pin(async move { result })
    }

    fn delete_todo(&self, id: &str) -> TaskFuture<'_, ()> {
        let result = if self.failures().delete {
            Err(server_error())
        } else {
            self.open.lock().unwrap().retain(|t| t.id != id);
            self.deleted.lock().unwrap().push(id.to_string());
            Ok(())
        };
        Box::pin(async move { result })
    }
}
