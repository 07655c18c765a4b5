//! Board columns and their partial-update vocabulary.

use serde::{Deserialize, Serialize};

use crate::ids::{ColumnId, TaskId};

/// A column holding an ordered sequence of task references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Unique identifier.
    pub id: ColumnId,
    /// Display title.
    pub title: String,
    /// Display color (hex string).
    pub color: String,
    /// Task ids in render order.
    #[serde(default)]
    pub task_ids: Vec<TaskId>,
    /// Work-in-progress limit. `None` or `Some(0)` means unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tasks: Option<usize>,
}

impl Column {
    /// Creates an empty, unlimited column.
    #[must_use]
    pub fn new(id: ColumnId, title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            color: color.into(),
            task_ids: Vec::new(),
            max_tasks: None,
        }
    }

    /// Sets the WIP limit.
    #[must_use]
    pub const fn with_max_tasks(mut self, max_tasks: usize) -> Self {
        self.max_tasks = Some(max_tasks);
        self
    }

    /// Sets the task sequence.
    #[must_use]
    pub fn with_task_ids<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TaskId>,
    {
        self.task_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Number of task references in the sequence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    /// Returns `true` if the column holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    /// Returns `true` if the sequence references `task_id`.
    #[must_use]
    pub fn contains(&self, task_id: &str) -> bool {
        self.task_ids.iter().any(|id| id == task_id)
    }

    /// Position of `task_id` in the sequence, if present.
    #[must_use]
    pub fn position(&self, task_id: &str) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }

    /// The effective WIP limit, treating zero as unlimited.
    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        self.max_tasks.filter(|&max| max > 0)
    }
}

/// A replacement for one mutable column field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ColumnFieldUpdate {
    /// Replace the title.
    Title(String),
    /// Replace the display color.
    Color(String),
    /// Replace the task sequence.
    TaskIds(Vec<TaskId>),
    /// Replace or clear the WIP limit.
    MaxTasks(Option<usize>),
}
