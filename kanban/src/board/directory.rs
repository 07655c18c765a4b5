//! Task Directory: task id to task record.
//!
//! The directory is the only place task content lives. It knows nothing
//! about columns; keeping membership in step is the coordinator's job.
//!
//! Storage is an `Arc`-shared map of `Arc`-shared records. Cloning a
//! directory is O(1); the first write after a clone copies the map of
//! pointers, and only the record actually written is deep-copied.

use std::collections::HashMap;
use std::sync::Arc;

use kanban_model::{Task, TaskFieldUpdate, TaskId};

/// Errors raised by directory operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// No task with the given id.
    #[error("task not found: {0}")]
    TaskNotFound(String),
}

/// Mapping from task id to task record.
#[derive(Debug, Clone, Default)]
pub struct TaskDirectory {
    entries: Arc<HashMap<TaskId, Arc<Task>>>,
}

impl TaskDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a task.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.entries.get(id).map(AsRef::as_ref)
    }

    /// Returns `true` if a task with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the directory holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all task records in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.entries.values().map(AsRef::as_ref)
    }

    /// Inserts a task, replacing any record with the same id.
    ///
    /// Returns the replaced record, if any.
    pub fn put(&mut self, task: Task) -> Option<Arc<Task>> {
        Arc::make_mut(&mut self.entries).insert(task.id.clone(), Arc::new(task))
    }

    /// Merges `fields` into an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::TaskNotFound`] if `id` is absent.
    pub fn patch(&mut self, id: &str, fields: &[TaskFieldUpdate]) -> Result<&Task, DirectoryError> {
        if !self.contains(id) {
            return Err(DirectoryError::TaskNotFound(id.to_string()));
        }
        let entry = Arc::make_mut(&mut self.entries)
            .get_mut(id)
            .ok_or_else(|| DirectoryError::TaskNotFound(id.to_string()))?;
        let task = Arc::make_mut(entry);
        for field in fields {
            task.apply(field);
        }
        Ok(task)
    }

    /// Removes a task. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Arc<Task>> {
        if !self.contains(id) {
            return None;
        }
        Arc::make_mut(&mut self.entries).remove(id)
    }

    /// Returns `true` if both directories share the same backing map.
    #[must_use]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    /// Returns `true` if both directories hold the very same record for `id`.
    #[must_use]
    pub fn shares_task_with(&self, other: &Self, id: &str) -> bool {
        match (self.entries.get(id), other.entries.get(id)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl FromIterator<Task> for TaskDirectory {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|task| (task.id.clone(), Arc::new(task)))
            .collect();
        Self {
            entries: Arc::new(entries),
        }
    }
}
