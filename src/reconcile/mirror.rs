//! Read-through view of the remote todo list.

use tracing::{debug, info, warn};

use super::labels;
use crate::error::RemoteError;
use crate::ports::{NewTask, RemoteTask, RemoteTasks};

/// Snapshot of the remote open todos plus the calls that mutate them.
///
/// Every successful mutation re-fetches the snapshot so later checks in the
/// same pass see the remote as it is now. A failed fetch leaves an empty
/// snapshot: the engine may then try to post, but never deletes anything it
/// did not actually see.
///
/// In dry-run mode nothing is sent; mutations are applied to the snapshot
/// only, so the rest of the pass still reasons about their effect.
pub struct RemoteTaskMirror<'a> {
    remote: &'a dyn RemoteTasks,
    tasks: Vec<RemoteTask>,
    dry_run: bool,
}

impl<'a> RemoteTaskMirror<'a> {
    /// Creates a mirror and performs the initial fetch.
    pub async fn load(remote: &'a dyn RemoteTasks, dry_run: bool) -> Self {
        let mut mirror = Self { remote, tasks: Vec::new(), dry_run };
        mirror.fetch().await;
        mirror
    }

    /// Whether mutations are simulated.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Re-fetches the open todos. A failure empties the snapshot.
    ///
    /// A no-op in dry-run mode, where the snapshot already reflects the
    /// simulated mutations.
    pub async fn refresh(&mut self) {
        if !self.dry_run {
            self.fetch().await;
        }
    }

    async fn fetch(&mut self) {
        match self.remote.list_todos().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "fetched open todos");
                self.tasks = tasks;
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch open todos, treating the list as empty");
                self.tasks.clear();
            }
        }
    }

    /// The current snapshot.
    #[must_use]
    pub fn tasks(&self) -> &[RemoteTask] {
        &self.tasks
    }

    /// Whether an open todo carries `label`.
    #[must_use]
    pub fn contains_label(&self, label: &str) -> bool {
        self.tasks.iter().any(|t| labels::labels_match(&t.text, label))
    }

    /// Open todos that are numbered instances of definition `name`.
    #[must_use]
    pub fn instances_of(&self, name: &str) -> Vec<&RemoteTask> {
        self.tasks.iter().filter(|t| labels::belongs_to(&t.text, name)).collect()
    }

    /// Creates a todo, then refreshes the snapshot.
    ///
    /// # Errors
    ///
    /// Returns the remote error when creation is not confirmed; the snapshot
    /// is left untouched in that case.
    pub async fn post(&mut self, task: &NewTask) -> Result<(), RemoteError> {
        if self.dry_run {
            info!(label = %task.text, due = %task.date, "dry run: would post todo");
            self.tasks.push(RemoteTask {
                id: format!("dry-run:{}", task.text),
                text: task.text.clone(),
                date: Some(task.date.clone()),
            });
            return Ok(());
        }
        match self.remote.create_todo(task).await {
            Ok(()) => {
                info!(label = %task.text, due = %task.date, "posted todo");
                self.refresh().await;
                Ok(())
            }
            Err(err) => {
                warn!(label = %task.text, error = %err, "failed to post todo");
                Err(err)
            }
        }
    }

    /// Deletes every open instance of definition `name`, then refreshes.
    ///
    /// Returns how many deletions succeeded. Individual failures are logged
    /// and do not stop the remaining deletions.
    pub async fn remove_instances_of(&mut self, name: &str) -> usize {
        let stale: Vec<RemoteTask> = self.instances_of(name).into_iter().cloned().collect();
        let mut removed = 0;
        for task in &stale {
            if self.dry_run {
                info!(label = %task.text, id = %task.id, "dry run: would delete todo");
                self.tasks.retain(|t| t.id != task.id);
                removed += 1;
                continue;
            }
            match self.remote.delete_todo(&task.id).await {
                Ok(()) => {
                    info!(label = %task.text, id = %task.id, "deleted stale todo");
                    removed += 1;
                }
                Err(err) => warn!(label = %task.text, id = %task.id, error = %err, "failed to delete todo"),
            }
        }
        self.refresh().await;
        removed
    }
}
