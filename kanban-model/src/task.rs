//! Task records and their partial-update vocabulary.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ColumnId, TaskId};

/// Task priority, ordered from least to most pressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal scheduling.
    Medium,
    /// Should be picked up soon.
    High,
    /// Drop everything.
    Urgent,
}

impl Priority {
    /// All priorities in ascending order.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Urgent];

    /// Returns the badge color for this priority as a hex string.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "#3b82f6",
            Self::Medium => "#eab308",
            Self::High => "#f97316",
            Self::Urgent => "#ef4444",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Urgent => write!(f, "urgent"),
        }
    }
}

/// A task card on the board.
///
/// `status` names the column whose sequence holds this task. The board
/// keeps the two in sync; a task record on its own carries no guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique, immutable identifier.
    pub id: TaskId,
    /// Display title. Non-empty after trimming when it comes from the form.
    pub title: String,
    /// Optional free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Identifier of the column currently holding the task.
    pub status: ColumnId,
    /// Optional priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Optional assignee display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// Tag set. Order carries no meaning.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
    /// When the task was created. Never changes afterwards.
    pub created_at: DateTime<Utc>,
    /// Optional due date (day granularity).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Creates a task with only the required fields set and `created_at = now`.
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>, status: ColumnId) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            status,
            priority: None,
            assignee: None,
            tags: BTreeSet::new(),
            created_at: Utc::now(),
            due_date: None,
        }
    }

    /// Returns `true` if the task has a due date and `today` is past it.
    #[must_use]
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date.is_some_and(|due| today > due)
    }

    /// Applies a single field update in place.
    ///
    /// This only touches the record. Relocating the task when its status
    /// changes is the board's job.
    pub fn apply(&mut self, update: &TaskFieldUpdate) {
        match update {
            TaskFieldUpdate::Title(title) => self.title.clone_from(title),
            TaskFieldUpdate::Description(description) => {
                self.description.clone_from(description);
            }
            TaskFieldUpdate::Status(status) => self.status.clone_from(status),
            TaskFieldUpdate::Priority(priority) => self.priority = *priority,
            TaskFieldUpdate::Assignee(assignee) => self.assignee.clone_from(assignee),
            TaskFieldUpdate::Tags(tags) => self.tags.clone_from(tags),
            TaskFieldUpdate::DueDate(due) => self.due_date = *due,
        }
    }

    /// Returns the full set of field updates that would turn any task with
    /// the same id into `self`.
    #[must_use]
    pub fn to_field_updates(&self) -> Vec<TaskFieldUpdate> {
        vec![
            TaskFieldUpdate::Title(self.title.clone()),
            TaskFieldUpdate::Description(self.description.clone()),
            TaskFieldUpdate::Status(self.status.clone()),
            TaskFieldUpdate::Priority(self.priority),
            TaskFieldUpdate::Assignee(self.assignee.clone()),
            TaskFieldUpdate::Tags(self.tags.clone()),
            TaskFieldUpdate::DueDate(self.due_date),
        ]
    }
}

/// A replacement for one mutable task field.
///
/// A partial update is a slice of these; fields not mentioned are left
/// alone. `id` and `created_at` have no variant because they never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum TaskFieldUpdate {
    /// Replace the title.
    Title(String),
    /// Replace or clear the description.
    Description(Option<String>),
    /// Change the owning column.
    Status(ColumnId),
    /// Replace or clear the priority.
    Priority(Option<Priority>),
    /// Replace or clear the assignee.
    Assignee(Option<String>),
    /// Replace the tag set.
    Tags(BTreeSet<String>),
    /// Replace or clear the due date.
    DueDate(Option<NaiveDate>),
}
