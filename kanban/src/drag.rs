//! Drag Session Interpreter.
//!
//! Turns the start/over/end events of a drag gesture into discrete
//! [`BoardIntent::MoveTask`] intents. Crossing into another column moves the
//! task immediately on `over`, so the board shows it in its tentative spot
//! while the pointer is still down. Reordering within a column is emitted
//! once, on `end`.
//!
//! A [`DragSession`] lives only as long as the gesture. It reads board
//! snapshots but is never stored in one.

use kanban_model::{BoardIntent, Task, TaskId};

use crate::board::{Board, sequence};

/// One event from the gesture provider.
///
/// `target` is the id under the pointer, which may name a task or a column.
/// `None` means the pointer is over nothing droppable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    /// The gesture began on a task.
    Start {
        /// Task being dragged.
        active: TaskId,
    },
    /// The pointer is hovering a target.
    Over {
        /// Task being dragged.
        active: TaskId,
        /// Hovered task or column id.
        target: Option<String>,
    },
    /// The gesture was released.
    End {
        /// Task being dragged.
        active: TaskId,
        /// Task or column id under the pointer on release.
        target: Option<String>,
    },
}

/// Transient state of one drag gesture.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    active: Option<Task>,
    hover: Option<String>,
}

impl DragSession {
    /// Creates an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` between `start` and `end`.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The task captured at `start`, for rendering the drag overlay.
    #[must_use]
    pub const fn active_task(&self) -> Option<&Task> {
        self.active.as_ref()
    }

    /// The id most recently hovered, if any.
    #[must_use]
    pub fn hover_target(&self) -> Option<&str> {
        self.hover.as_deref()
    }

    /// Routes an event to [`start`](Self::start), [`over`](Self::over) or
    /// [`end`](Self::end).
    pub fn handle(&mut self, board: &Board, event: &DragEvent) -> Option<BoardIntent> {
        match event {
            DragEvent::Start { active } => {
                self.start(board, active);
                None
            }
            DragEvent::Over { active, target } => self.over(board, active, target.as_deref()),
            DragEvent::End { active, target } => self.end(board, active, target.as_deref()),
        }
    }

    /// Captures the dragged task. An unknown id leaves the session idle.
    pub fn start(&mut self, board: &Board, active: &str) {
        self.active = board.task(active).cloned();
        self.hover = None;
        if self.active.is_none() {
            tracing::debug!(task_id = active, "drag started on unknown task");
        }
    }

    /// Emits a cross-column move when the pointer enters another column.
    ///
    /// The target index is the hovered task's position, or the end of the
    /// column when the column itself is hovered. Nothing is emitted while
    /// the pointer stays in the task's own column.
    pub fn over(&mut self, board: &Board, active: &str, target: Option<&str>) -> Option<BoardIntent> {
        self.hover = target.map(str::to_string);
        let target = target?;
        let from = board.column_containing(active)?;
        let to = board.column_for_target(target)?;
        if from.id == to.id {
            return None;
        }

        let target_index = sequence::drop_index(&to.task_ids, target);
        tracing::trace!(task_id = active, from = %from.id, to = %to.id, target_index, "drag over");
        Some(BoardIntent::MoveTask {
            task_id: TaskId::from(active),
            from: from.id.clone(),
            to: to.id.clone(),
            target_index,
        })
    }

    /// Ends the gesture and emits the final same-column reorder, if any.
    ///
    /// Releasing over nothing, over another column, or at the task's
    /// current index emits nothing. Cross-column moves were already emitted
    /// by [`over`](Self::over).
    pub fn end(&mut self, board: &Board, active: &str, target: Option<&str>) -> Option<BoardIntent> {
        self.active = None;
        self.hover = None;
        let target = target?;
        let from = board.column_containing(active)?;
        let to = board.column_for_target(target)?;
        if from.id != to.id {
            return None;
        }

        let old_index = from.position(active)?;
        // The task is already in this column, so its last slot is len - 1.
        let new_index = sequence::drop_index(&from.task_ids, target).min(from.len() - 1);
        if old_index == new_index {
            return None;
        }
        tracing::trace!(task_id = active, column = %from.id, old_index, new_index, "drag reorder");
        Some(BoardIntent::MoveTask {
            task_id: TaskId::from(active),
            from: from.id.clone(),
            to: from.id.clone(),
            target_index: new_index,
        })
    }
}
