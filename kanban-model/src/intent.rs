//! High-level board intents.
//!
//! Every change to a board is expressed as one of these values. They come
//! from the drag interpreter, from form submissions, or from a script, and
//! are applied one at a time by the coordinator.

use serde::{Deserialize, Serialize};

use crate::column::ColumnFieldUpdate;
use crate::ids::{ColumnId, TaskId};
use crate::task::{Task, TaskFieldUpdate};

/// A discrete request to change the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "camelCase")]
pub enum BoardIntent {
    /// Move a task to `target_index` of `to`, removing it from `from`.
    #[serde(rename_all = "camelCase")]
    MoveTask {
        /// Task being moved.
        task_id: TaskId,
        /// Column the task is leaving.
        from: ColumnId,
        /// Column the task is entering (may equal `from`).
        to: ColumnId,
        /// Destination position; clamped into range.
        target_index: usize,
    },
    /// Add a task record and append it to a column.
    #[serde(rename_all = "camelCase")]
    CreateTask {
        /// Column receiving the task.
        column_id: ColumnId,
        /// The complete task record.
        task: Task,
    },
    /// Replace some fields of a task.
    #[serde(rename_all = "camelCase")]
    UpdateTask {
        /// Task being edited.
        task_id: TaskId,
        /// Fields to replace.
        fields: Vec<TaskFieldUpdate>,
    },
    /// Remove a task from the board.
    #[serde(rename_all = "camelCase")]
    DeleteTask {
        /// Task being removed.
        task_id: TaskId,
    },
    /// Copy a task into a fresh record in the same column.
    #[serde(rename_all = "camelCase")]
    DuplicateTask {
        /// Task being copied.
        task_id: TaskId,
    },
    /// Replace some fields of a column.
    #[serde(rename_all = "camelCase")]
    UpdateColumn {
        /// Column being edited.
        column_id: ColumnId,
        /// Fields to replace.
        fields: Vec<ColumnFieldUpdate>,
    },
    /// Remove a column and destroy every task it holds.
    #[serde(rename_all = "camelCase")]
    DeleteColumn {
        /// Column being removed.
        column_id: ColumnId,
    },
}

impl BoardIntent {
    /// Short name of the intent, used as a log field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MoveTask { .. } => "move_task",
            Self::CreateTask { .. } => "create_task",
            Self::UpdateTask { .. } => "update_task",
            Self::DeleteTask { .. } => "delete_task",
            Self::DuplicateTask { .. } => "duplicate_task",
            Self::UpdateColumn { .. } => "update_column",
            Self::DeleteColumn { .. } => "delete_column",
        }
    }
}
