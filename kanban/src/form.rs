//! Task and column form validation.
//!
//! The form collaborator owns raw user input. Nothing reaches the
//! coordinator until it has been trimmed, checked, and turned into a
//! [`BoardIntent`]; the coordinator itself never validates titles.

use std::collections::BTreeSet;

use chrono::{NaiveDate, Utc};
use kanban_model::{BoardIntent, ColumnId, Priority, Task, TaskFieldUpdate, TaskId};

use crate::board::Board;

/// Default maximum task title length in characters.
pub const DEFAULT_MAX_TITLE_LEN: usize = 256;

/// Errors raised while validating form input.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    /// Task title is empty after trimming.
    #[error("task title cannot be empty")]
    TitleEmpty,

    /// Task title exceeds the configured maximum.
    #[error("task title too long (max {0} characters)")]
    TitleTooLong(usize),

    /// No column to place a new task in.
    #[error("board has no columns")]
    NoColumns,

    /// Column title is empty after trimming.
    #[error("column title cannot be empty")]
    ColumnTitleEmpty,

    /// Column color is not `#rgb` or `#rrggbb`.
    #[error("invalid color '{0}' (expected #rgb or #rrggbb)")]
    InvalidColor(String),
}

/// Raw contents of the task modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title as typed.
    pub title: String,
    /// Description as typed; blank means none.
    pub description: String,
    /// Selected column. `None` falls back to the first column.
    pub status: Option<ColumnId>,
    /// Selected priority.
    pub priority: Option<Priority>,
    /// Assignee as typed; blank means none.
    pub assignee: String,
    /// Tags in the order they were added.
    pub tags: Vec<String>,
    /// Selected due date.
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    /// An empty draft for a new task in `column`.
    #[must_use]
    pub fn for_column(column: Option<ColumnId>) -> Self {
        Self {
            status: column,
            ..Self::default()
        }
    }

    /// A draft pre-filled from an existing task, for editing.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            status: Some(task.status.clone()),
            priority: task.priority,
            assignee: task.assignee.clone().unwrap_or_default(),
            tags: task.tags.iter().cloned().collect(),
            due_date: task.due_date,
        }
    }

    /// Adds a trimmed tag. Returns `false` if it was blank or already present.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Removes a tag if present.
    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Validates the draft and turns it into an intent.
    ///
    /// With `editing` set, the result is an [`BoardIntent::UpdateTask`]
    /// carrying every editable field, and the task keeps its id and
    /// creation time. Otherwise it is a [`BoardIntent::CreateTask`] for a
    /// freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::TitleEmpty`] or [`FormError::TitleTooLong`] for a
    /// bad title, and [`FormError::NoColumns`] when no column was selected
    /// and the board has none to fall back to.
    pub fn into_submission(
        self,
        board: &Board,
        editing: Option<&Task>,
        max_title_len: usize,
    ) -> Result<BoardIntent, FormError> {
        let title = validate_task_title(&self.title, max_title_len)?;

        let status = match self.status {
            Some(status) => status,
            None => board
                .columns()
                .next()
                .map(|c| c.id.clone())
                .ok_or(FormError::NoColumns)?,
        };

        let tags: BTreeSet<String> = self
            .tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let (id, created_at) = editing.map_or_else(
            || (TaskId::generate(), Utc::now()),
            |t| (t.id.clone(), t.created_at),
        );
        let task = Task {
            id,
            title,
            description: non_blank(&self.description),
            status,
            priority: self.priority,
            assignee: non_blank(&self.assignee),
            tags,
            created_at,
            due_date: self.due_date,
        };

        if editing.is_some() {
            Ok(BoardIntent::UpdateTask {
                task_id: task.id.clone(),
                fields: task.to_field_updates(),
            })
        } else {
            Ok(BoardIntent::CreateTask {
                column_id: task.status.clone(),
                task,
            })
        }
    }
}

/// The intent for the modal's delete button.
#[must_use]
pub fn delete_request(task: &Task) -> BoardIntent {
    BoardIntent::DeleteTask {
        task_id: task.id.clone(),
    }
}

/// Validates a task title, returning it trimmed.
///
/// # Errors
///
/// Returns [`FormError::TitleEmpty`] if nothing is left after trimming and
/// [`FormError::TitleTooLong`] past `max_title_len` characters.
pub fn validate_task_title(title: &str, max_title_len: usize) -> Result<String, FormError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(FormError::TitleEmpty);
    }
    if trimmed.chars().count() > max_title_len {
        return Err(FormError::TitleTooLong(max_title_len));
    }
    Ok(trimmed.to_string())
}

/// Checks every task title an intent would write.
///
/// Intents built by [`TaskDraft::into_submission`] always pass. This is
/// the gate for intents that arrive already encoded, such as script lines.
///
/// # Errors
///
/// As [`validate_task_title`], for the first offending title.
pub fn check_intent_titles(intent: &BoardIntent, max_title_len: usize) -> Result<(), FormError> {
    match intent {
        BoardIntent::CreateTask { task, .. } => {
            validate_task_title(&task.title, max_title_len).map(drop)
        }
        BoardIntent::UpdateTask { fields, .. } => fields.iter().try_for_each(|field| match field {
            TaskFieldUpdate::Title(title) => validate_task_title(title, max_title_len).map(drop),
            _ => Ok(()),
        }),
        _ => Ok(()),
    }
}

/// Validates a column title, returning it trimmed.
///
/// # Errors
///
/// Returns [`FormError::ColumnTitleEmpty`] if nothing is left after trimming.
pub fn validate_column_title(title: &str) -> Result<String, FormError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(FormError::ColumnTitleEmpty);
    }
    Ok(trimmed.to_string())
}

/// Validates a `#rgb` or `#rrggbb` color, returning it trimmed.
///
/// # Errors
///
/// Returns [`FormError::InvalidColor`] for anything else.
pub fn validate_hex_color(color: &str) -> Result<String, FormError> {
    let trimmed = color.trim();
    let valid = trimmed
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if !valid {
        return Err(FormError::InvalidColor(color.to_string()));
    }
    Ok(trimmed.to_string())
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
