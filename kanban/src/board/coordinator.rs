//! Board Coordinator: turns intents into snapshot transitions.
//!
//! Task status and column membership are two views of one fact. This is
//! the only code that writes either, and every operation writes both in
//! the same transition. Operations are atomic: each one builds the next
//! snapshot from a clone of the current one and either commits it whole
//! or leaves the current snapshot in place.
//!
//! Malformed references never fail loudly. An operation naming a missing
//! column or task returns [`Transition::Skipped`] and the board stays as it
//! was.

use chrono::Utc;
use kanban_model::{BoardIntent, ColumnFieldUpdate, ColumnId, Task, TaskFieldUpdate, TaskId};
use serde::Deserialize;

use super::{Board, sequence};
use crate::drag::{DragEvent, DragSession};

/// What `create_task` does when the target column does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OrphanPolicy {
    /// Store the task in the directory without placing it in any column.
    #[default]
    Allow,
    /// Leave the board unchanged.
    Reject,
    /// Place the task in the first column instead.
    FallbackToFirstColumn,
}

/// What `create_task` does when the task id is already taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum IdCollisionPolicy {
    /// Replace the existing record and move it to the target column.
    #[default]
    Overwrite,
    /// Leave the board unchanged.
    Reject,
    /// Give the new task a freshly generated id.
    Reassign,
}

/// Coordinator behavior for the cases callers are expected to avoid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinatorPolicy {
    /// Handling of creates against a missing column.
    pub orphans: OrphanPolicy,
    /// Handling of creates with an id already in use.
    pub id_collisions: IdCollisionPolicy,
}

/// Why an operation left the board unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A referenced column does not exist.
    ColumnNotFound(ColumnId),
    /// A referenced task does not exist.
    TaskNotFound(TaskId),
    /// `create_task` hit an existing id under [`IdCollisionPolicy::Reject`].
    IdCollision(TaskId),
    /// `create_task` named a missing column and the policy refused an orphan.
    OrphanRejected(ColumnId),
    /// The operation would not change anything.
    Unchanged,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ColumnNotFound(id) => write!(f, "column not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::IdCollision(id) => write!(f, "task id already in use: {id}"),
            Self::OrphanRejected(id) => write!(f, "refusing to orphan task in missing column {id}"),
            Self::Unchanged => write!(f, "nothing to change"),
        }
    }
}

/// Outcome of a coordinator operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A new snapshot was committed.
    Applied,
    /// The snapshot was left as it was.
    Skipped(SkipReason),
}

impl Transition {
    /// Returns `true` if a new snapshot was committed.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Owns the current board snapshot and applies intents to it one at a time.
pub struct BoardCoordinator {
    board: Board,
    policy: CoordinatorPolicy,
}

impl BoardCoordinator {
    /// Creates a coordinator over `board` with the default policy.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self::with_policy(board, CoordinatorPolicy::default())
    }

    /// Creates a coordinator over `board` with an explicit policy.
    #[must_use]
    pub const fn with_policy(board: Board, policy: CoordinatorPolicy) -> Self {
        Self { board, policy }
    }

    /// The current snapshot.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// A handle on the current snapshot that stays valid after later
    /// transitions.
    #[must_use]
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    /// The active policy.
    #[must_use]
    pub const fn policy(&self) -> CoordinatorPolicy {
        self.policy
    }

    /// Applies any intent.
    pub fn apply(&mut self, intent: BoardIntent) -> Transition {
        match intent {
            BoardIntent::MoveTask {
                task_id,
                from,
                to,
                target_index,
            } => self.move_task(&task_id, &from, &to, target_index),
            BoardIntent::CreateTask { column_id, task } => self.create_task(&column_id, task),
            BoardIntent::UpdateTask { task_id, fields } => self.update_task(&task_id, &fields),
            BoardIntent::DeleteTask { task_id } => self.delete_task(&task_id),
            BoardIntent::DuplicateTask { task_id } => self.duplicate_task(&task_id),
            BoardIntent::UpdateColumn { column_id, fields } => {
                self.update_column(&column_id, &fields)
            }
            BoardIntent::DeleteColumn { column_id } => self.delete_column(&column_id),
        }
    }

    /// Feeds a drag event through `session` and applies whatever move it
    /// produces. Returns `None` when the event produced no intent.
    pub fn dispatch_drag(
        &mut self,
        session: &mut DragSession,
        event: &DragEvent,
    ) -> Option<Transition> {
        let intent = session.handle(&self.board, event)?;
        Some(self.apply(intent))
    }

    /// Moves `task_id` out of `from` and into `to` at `target_index`
    /// (clamped), setting its status to `to`.
    ///
    /// Skipped if either column or the task is missing, or if the task is
    /// already at the resolved position.
    pub fn move_task(
        &mut self,
        task_id: &TaskId,
        from: &ColumnId,
        to: &ColumnId,
        target_index: usize,
    ) -> Transition {
        tracing::debug!(%task_id, %from, %to, target_index, "move task");
        let result = move_task(&self.board, task_id, from, to, target_index);
        self.commit("move_task", result)
    }

    /// Adds `task` to the directory and appends it to `column_id`.
    ///
    /// The WIP limit is not enforced. What happens when the column is
    /// missing or the id is taken is governed by the [`CoordinatorPolicy`].
    pub fn create_task(&mut self, column_id: &ColumnId, task: Task) -> Transition {
        tracing::debug!(task_id = %task.id, %column_id, "create task");
        let result = create_task(&self.board, column_id, task, self.policy);
        self.commit("create_task", result)
    }

    /// Merges `fields` into a task. A status change relocates the task to
    /// the front of the new column.
    ///
    /// Skipped if the task is missing, or if the new status names a
    /// missing column (no field is applied in that case).
    pub fn update_task(&mut self, task_id: &TaskId, fields: &[TaskFieldUpdate]) -> Transition {
        tracing::debug!(%task_id, fields = fields.len(), "update task");
        let result = update_task(&self.board, task_id, fields);
        self.commit("update_task", result)
    }

    /// Removes a task from every column and from the directory.
    pub fn delete_task(&mut self, task_id: &TaskId) -> Transition {
        tracing::debug!(%task_id, "delete task");
        let result = delete_task(&self.board, task_id);
        self.commit("delete_task", result)
    }

    /// Creates a copy of a task with a fresh id, `" (Copy)"` appended to the
    /// title and a new creation time, at the end of the source's column.
    pub fn duplicate_task(&mut self, task_id: &TaskId) -> Transition {
        tracing::debug!(%task_id, "duplicate task");
        let result = match self.board.task(task_id) {
            Some(source) => {
                let copy = Task {
                    id: TaskId::generate(),
                    title: format!("{} (Copy)", source.title),
                    created_at: Utc::now(),
                    ..source.clone()
                };
                let column_id = source.status.clone();
                create_task(&self.board, &column_id, copy, self.policy)
            }
            None => Err(SkipReason::TaskNotFound(task_id.clone())),
        };
        self.commit("duplicate_task", result)
    }

    /// Merges `fields` into a column.
    ///
    /// A replacement task sequence is sanitized before it is written:
    /// unknown and repeated ids are dropped, tasks pulled in from another
    /// column are detached there and re-statused, and tasks left out become
    /// orphans.
    pub fn update_column(
        &mut self,
        column_id: &ColumnId,
        fields: &[ColumnFieldUpdate],
    ) -> Transition {
        tracing::debug!(%column_id, fields = fields.len(), "update column");
        let result = update_column(&self.board, column_id, fields);
        self.commit("update_column", result)
    }

    /// Removes a column and destroys every task in its sequence.
    pub fn delete_column(&mut self, column_id: &ColumnId) -> Transition {
        tracing::debug!(%column_id, "delete column");
        let result = delete_column(&self.board, column_id);
        self.commit("delete_column", result)
    }

    fn commit(&mut self, intent: &'static str, result: Result<Board, SkipReason>) -> Transition {
        match result {
            Ok(next) => {
                self.board = next;
                tracing::debug!(intent, "transition applied");
                Transition::Applied
            }
            Err(reason) => {
                tracing::debug!(intent, %reason, "transition skipped");
                Transition::Skipped(reason)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Transitions: current snapshot in, next snapshot out
// ---------------------------------------------------------------------------

fn move_task(
    board: &Board,
    task_id: &TaskId,
    from: &ColumnId,
    to: &ColumnId,
    target_index: usize,
) -> Result<Board, SkipReason> {
    let from_index = board
        .column_index(from)
        .ok_or_else(|| SkipReason::ColumnNotFound(from.clone()))?;
    let to_index = board
        .column_index(to)
        .ok_or_else(|| SkipReason::ColumnNotFound(to.clone()))?;
    let task = board
        .task(task_id)
        .ok_or_else(|| SkipReason::TaskNotFound(task_id.clone()))?;

    if from_index == to_index
        && task.status == *to
        && already_at(board, task_id, to_index, target_index)
    {
        return Err(SkipReason::Unchanged);
    }

    let mut next = board.clone();
    place(&mut next, task_id, to_index, target_index)?;
    Ok(next)
}

fn create_task(
    board: &Board,
    column_id: &ColumnId,
    mut task: Task,
    policy: CoordinatorPolicy,
) -> Result<Board, SkipReason> {
    let target = match board.column_index(column_id) {
        Some(index) => Some(index),
        None => match policy.orphans {
            OrphanPolicy::Allow => {
                tracing::warn!(task_id = %task.id, %column_id, "creating task in missing column; it will not be shown");
                None
            }
            OrphanPolicy::Reject => {
                tracing::warn!(task_id = %task.id, %column_id, "rejecting task for missing column");
                return Err(SkipReason::OrphanRejected(column_id.clone()));
            }
            OrphanPolicy::FallbackToFirstColumn => {
                if board.columns().next().is_none() {
                    tracing::warn!(task_id = %task.id, %column_id, "no column to fall back to");
                    return Err(SkipReason::OrphanRejected(column_id.clone()));
                }
                tracing::warn!(task_id = %task.id, %column_id, "missing column; falling back to first column");
                Some(0)
            }
        },
    };

    if board.tasks().contains(&task.id) {
        match policy.id_collisions {
            IdCollisionPolicy::Overwrite => {
                tracing::warn!(task_id = %task.id, "task id already in use; overwriting");
            }
            IdCollisionPolicy::Reject => {
                tracing::warn!(task_id = %task.id, "task id already in use; rejecting");
                return Err(SkipReason::IdCollision(task.id));
            }
            IdCollisionPolicy::Reassign => {
                let fresh = TaskId::generate();
                tracing::warn!(task_id = %task.id, new_id = %fresh, "task id already in use; reassigning");
                task.id = fresh;
            }
        }
    }

    task.status = match target {
        Some(index) => board
            .columns()
            .nth(index)
            .map_or_else(|| column_id.clone(), |c| c.id.clone()),
        None => column_id.clone(),
    };

    let mut next = board.clone();
    let id = task.id.clone();
    next.detach(&id);
    next.tasks_mut().put(task);
    if let Some(index) = target
        && let Some(column) = next.column_mut(index)
    {
        let end = column.task_ids.len();
        column.task_ids = sequence::insert_at(&column.task_ids, id, end);
    }
    Ok(next)
}

fn update_task(
    board: &Board,
    task_id: &TaskId,
    fields: &[TaskFieldUpdate],
) -> Result<Board, SkipReason> {
    let task = board
        .task(task_id)
        .ok_or_else(|| SkipReason::TaskNotFound(task_id.clone()))?;
    if fields.is_empty() {
        return Err(SkipReason::Unchanged);
    }

    // Last status in the list wins, same as applying the fields in order.
    let new_status = fields.iter().rev().find_map(|f| match f {
        TaskFieldUpdate::Status(status) => Some(status),
        _ => None,
    });
    let relocate_to = match new_status {
        Some(status) if *status != task.status => Some(
            board
                .column_index(status)
                .ok_or_else(|| SkipReason::ColumnNotFound(status.clone()))?,
        ),
        _ => None,
    };

    let mut next = board.clone();
    next.tasks_mut()
        .patch(task_id, fields)
        .map_err(|_| SkipReason::TaskNotFound(task_id.clone()))?;
    if let Some(to_index) = relocate_to {
        // An orphan has no old column to leave; it is adopted at the front.
        place(&mut next, task_id, to_index, 0)?;
    }
    Ok(next)
}

fn delete_task(board: &Board, task_id: &TaskId) -> Result<Board, SkipReason> {
    if !board.tasks().contains(task_id) {
        return Err(SkipReason::TaskNotFound(task_id.clone()));
    }
    let mut next = board.clone();
    next.detach(task_id);
    next.tasks_mut().remove(task_id);
    Ok(next)
}

fn update_column(
    board: &Board,
    column_id: &ColumnId,
    fields: &[ColumnFieldUpdate],
) -> Result<Board, SkipReason> {
    let index = board
        .column_index(column_id)
        .ok_or_else(|| SkipReason::ColumnNotFound(column_id.clone()))?;
    if fields.is_empty() {
        return Err(SkipReason::Unchanged);
    }

    let mut next = board.clone();
    for field in fields {
        match field {
            ColumnFieldUpdate::TaskIds(ids) => replace_sequence(&mut next, index, column_id, ids),
            ColumnFieldUpdate::Title(title) => {
                if let Some(column) = next.column_mut(index) {
                    column.title.clone_from(title);
                }
            }
            ColumnFieldUpdate::Color(color) => {
                if let Some(column) = next.column_mut(index) {
                    column.color.clone_from(color);
                }
            }
            ColumnFieldUpdate::MaxTasks(max) => {
                if let Some(column) = next.column_mut(index) {
                    column.max_tasks = *max;
                }
            }
        }
    }
    Ok(next)
}

fn delete_column(board: &Board, column_id: &ColumnId) -> Result<Board, SkipReason> {
    let index = board
        .column_index(column_id)
        .ok_or_else(|| SkipReason::ColumnNotFound(column_id.clone()))?;

    let mut next = board.clone();
    let Some(removed) = next.remove_column(index) else {
        return Err(SkipReason::ColumnNotFound(column_id.clone()));
    };
    for task_id in &removed.task_ids {
        next.tasks_mut().remove(task_id);
        // Membership is single-column, so this only matters for a board
        // that was already inconsistent; it keeps dangling ids out.
        next.detach(task_id);
    }
    tracing::debug!(%column_id, destroyed = removed.task_ids.len(), "column deleted with its tasks");
    Ok(next)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Returns `true` if `task_id` is the only membership of the task and it
/// already sits where inserting at `target_index` after removal would put it.
fn already_at(board: &Board, task_id: &str, column_index: usize, target_index: usize) -> bool {
    let holders = board.columns().filter(|c| c.contains(task_id)).count();
    let Some(column) = board.columns().nth(column_index) else {
        return false;
    };
    let occurrences = column.task_ids.iter().filter(|id| *id == task_id).count();
    let clamped = target_index.min(column.len().saturating_sub(1));
    holders == 1 && occurrences == 1 && column.position(task_id) == Some(clamped)
}

/// Detaches `task_id` from wherever it is, inserts it into the column at
/// `to_index` at `target_index` (clamped), and sets its status to match.
fn place(
    next: &mut Board,
    task_id: &TaskId,
    to_index: usize,
    target_index: usize,
) -> Result<(), SkipReason> {
    next.detach(task_id);
    let Some(column) = next.column_mut(to_index) else {
        return Err(SkipReason::Unchanged);
    };
    column.task_ids = sequence::insert_at(&column.task_ids, task_id.clone(), target_index);
    let to = column.id.clone();

    let needs_status = next.task(task_id).is_some_and(|t| t.status != to);
    if needs_status {
        next.tasks_mut()
            .patch(task_id, &[TaskFieldUpdate::Status(to)])
            .map_err(|_| SkipReason::TaskNotFound(task_id.clone()))?;
    }
    Ok(())
}

/// Writes a sanitized replacement sequence into the column at `index`.
fn replace_sequence(next: &mut Board, index: usize, column_id: &ColumnId, ids: &[TaskId]) {
    let mut sanitized: Vec<TaskId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !next.tasks().contains(id) {
            tracing::warn!(%column_id, task_id = %id, "dropping unknown task from column sequence");
            continue;
        }
        if sanitized.contains(id) {
            continue;
        }
        sanitized.push(id.clone());
    }

    for id in &sanitized {
        let elsewhere = next
            .columns()
            .enumerate()
            .any(|(i, c)| i != index && c.contains(id));
        if elsewhere {
            next.detach(id);
        }
        let needs_status = next.task(id).is_some_and(|t| t.status != *column_id);
        if needs_status
            && let Err(err) = next
                .tasks_mut()
                .patch(id, &[TaskFieldUpdate::Status(column_id.clone())])
        {
            tracing::warn!(%column_id, %err, "could not re-status task");
        }
    }

    if let Some(column) = next.column_mut(index) {
        column.task_ids = sanitized;
    }
}
