//! Remote task port for the gamified task tracker's todo list.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::RemoteError;

/// Boxed future type alias used by [`RemoteTasks`] to keep the trait dyn-compatible.
pub type TaskFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, RemoteError>> + Send + 'a>>;

/// Priority attached to every generated todo ("medium" difficulty).
pub const DEFAULT_PRIORITY: f64 = 1.5;

/// Notes attached to every generated todo.
pub const DEFAULT_NOTES: &str = "Automated task for habit tracking";

/// An open todo as reported by the remote system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteTask {
    /// Opaque remote identifier.
    pub id: String,
    /// Display label.
    pub text: String,
    /// Due date as sent by the remote, if any.
    #[serde(default)]
    pub date: Option<String>,
}

/// A todo to be created remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    /// Display label.
    pub text: String,
    /// Due date as a `YYYY-MM-DD` day key.
    pub date: String,
    /// Remote priority multiplier.
    pub priority: f64,
    /// Free-form notes.
    pub notes: String,
}

impl NewTask {
    /// Builds a todo with the default priority and notes.
    #[must_use]
    pub fn todo(text: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            date: date.into(),
            priority: DEFAULT_PRIORITY,
            notes: DEFAULT_NOTES.to_string(),
        }
    }
}

/// Lists, creates and deletes todos in the remote task system.
pub trait RemoteTasks: Send + Sync {
    /// Returns every currently open todo.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-200 status, or an
    /// undecodable body.
    fn list_todos(&self) -> TaskFuture<'_, Vec<RemoteTask>>;

    /// Creates a todo. Succeeds only when the remote confirms creation.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any status other than 201.
    fn create_todo(&self, task: &NewTask) -> TaskFuture<'_, ()>;

    /// Deletes a todo by id.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any status other than 200.
    fn delete_todo(&self, id: &str) -> TaskFuture<'_, ()>;
}
