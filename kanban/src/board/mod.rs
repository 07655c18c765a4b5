//! Board snapshots.
//!
//! A [`Board`] pairs the ordered column list with the [`TaskDirectory`].
//! Snapshots are immutable from the outside: every change goes through
//! [`BoardCoordinator`], which derives a new snapshot from the current one.
//! Cloning is O(1); a transition copies only the columns and task records
//! it touches, so a renderer holding the previous snapshot never observes
//! a change.

pub mod coordinator;
pub mod directory;
pub mod sequence;
pub mod wip;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use kanban_model::{BoardSeed, Column, ColumnId, Task, TaskId};

pub use coordinator::{
    BoardCoordinator, CoordinatorPolicy, IdCollisionPolicy, OrphanPolicy, SkipReason, Transition,
};
pub use directory::{DirectoryError, TaskDirectory};

/// A broken membership invariant found in a snapshot.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Two columns share an id.
    #[error("duplicate column id: {0}")]
    DuplicateColumn(ColumnId),

    /// A column references a task missing from the directory.
    #[error("column {column} references unknown task {task}")]
    DanglingTask {
        /// Column holding the reference.
        column: ColumnId,
        /// The unresolved task id.
        task: TaskId,
    },

    /// A task id appears more than once across all sequences.
    #[error("task {task} appears in both {first} and {second}")]
    DuplicateMembership {
        /// The repeated task id.
        task: TaskId,
        /// Column of the first occurrence.
        first: ColumnId,
        /// Column of the repeated occurrence.
        second: ColumnId,
    },

    /// A task sits in a column other than the one its status names.
    #[error("task {task} has status {status} but sits in {column}")]
    StatusMismatch {
        /// The misfiled task.
        task: TaskId,
        /// What the task record claims.
        status: ColumnId,
        /// Where the task actually is.
        column: ColumnId,
    },
}

/// Errors raised when building a board from a [`BoardSeed`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeedError {
    /// Two task records share an id.
    #[error("duplicate task id in seed: {0}")]
    DuplicateTask(TaskId),

    /// The seed breaks a membership invariant.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// An immutable snapshot of the whole board.
#[derive(Debug, Clone, Default)]
pub struct Board {
    columns: Arc<Vec<Arc<Column>>>,
    tasks: TaskDirectory,
}

impl Board {
    /// Builds a board from a seed, rejecting seeds that break membership
    /// invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::DuplicateTask`] if two records share an id, or
    /// [`SeedError::Invariant`] for the first violated invariant.
    pub fn from_seed(seed: BoardSeed) -> Result<Self, SeedError> {
        let mut seen = HashSet::with_capacity(seed.tasks.len());
        for task in &seed.tasks {
            if !seen.insert(task.id.clone()) {
                return Err(SeedError::DuplicateTask(task.id.clone()));
            }
        }
        let board = Self::from_parts(seed.columns, seed.tasks.into_iter().collect());
        board.check_invariants()?;
        Ok(board)
    }

    /// Builds a board without validation. Used for fixtures known to be valid.
    pub(crate) fn from_parts(columns: Vec<Column>, tasks: TaskDirectory) -> Self {
        Self {
            columns: Arc::new(columns.into_iter().map(Arc::new).collect()),
            tasks,
        }
    }

    /// Exports the snapshot as a seed: columns in order, tasks by creation time.
    #[must_use]
    pub fn to_seed(&self) -> BoardSeed {
        let mut tasks: Vec<Task> = self.tasks.iter().cloned().collect();
        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        BoardSeed {
            columns: self.columns().cloned().collect(),
            tasks,
        }
    }

    /// Columns in display order.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &Column> {
        self.columns.iter().map(AsRef::as_ref)
    }

    /// The task directory.
    #[must_use]
    pub const fn tasks(&self) -> &TaskDirectory {
        &self.tasks
    }

    /// Looks up a column by id.
    #[must_use]
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns().find(|c| c.id == id)
    }

    /// Position of a column in the column list.
    #[must_use]
    pub fn column_index(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    /// The first column whose sequence holds `task_id`.
    #[must_use]
    pub fn column_containing(&self, task_id: &str) -> Option<&Column> {
        self.columns().find(|c| c.contains(task_id))
    }

    /// Resolves a drag target id, which may name either a column or a task,
    /// to the column it denotes: the first column whose id matches or whose
    /// sequence holds it.
    #[must_use]
    pub fn column_for_target(&self, target: &str) -> Option<&Column> {
        self.columns().find(|c| c.id == target || c.contains(target))
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Resolved tasks of a column in render order. Dangling ids are skipped.
    #[must_use]
    pub fn tasks_in(&self, column_id: &str) -> Vec<&Task> {
        self.column(column_id)
            .map(|c| c.task_ids.iter().filter_map(|id| self.tasks.get(id)).collect())
            .unwrap_or_default()
    }

    /// Tasks present in the directory but in no column, sorted by id.
    #[must_use]
    pub fn orphans(&self) -> Vec<&Task> {
        let placed: HashSet<&str> = self
            .columns()
            .flat_map(|c| c.task_ids.iter().map(TaskId::as_str))
            .collect();
        let mut orphans: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| !placed.contains(t.id.as_str()))
            .collect();
        orphans.sort_by(|a, b| a.id.cmp(&b.id));
        orphans
    }

    /// Returns `true` if both snapshots hold the very same column record at
    /// `id`, i.e. the transition between them did not copy it.
    #[must_use]
    pub fn shares_column_with(&self, other: &Self, id: &str) -> bool {
        let find = |b: &Self| b.columns.iter().find(|c| c.id == id).cloned();
        match (find(self), find(other)) {
            (Some(a), Some(b)) => Arc::ptr_eq(&a, &b),
            _ => false,
        }
    }

    /// Checks the membership invariants:
    ///
    /// - column ids are unique;
    /// - every sequenced id resolves in the directory;
    /// - every task appears in at most one sequence, at most once;
    /// - a sequenced task's status names the column holding it.
    ///
    /// Orphans (tasks in no column) are allowed.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut column_ids = HashSet::with_capacity(self.columns.len());
        let mut placed: HashMap<&str, &ColumnId> = HashMap::new();

        for column in self.columns() {
            if !column_ids.insert(column.id.as_str()) {
                return Err(InvariantViolation::DuplicateColumn(column.id.clone()));
            }
            for id in &column.task_ids {
                let Some(task) = self.tasks.get(id) else {
                    return Err(InvariantViolation::DanglingTask {
                        column: column.id.clone(),
                        task: id.clone(),
                    });
                };
                if let Some(first) = placed.insert(id.as_str(), &column.id) {
                    return Err(InvariantViolation::DuplicateMembership {
                        task: id.clone(),
                        first: first.clone(),
                        second: column.id.clone(),
                    });
                }
                if task.status != column.id {
                    return Err(InvariantViolation::StatusMismatch {
                        task: id.clone(),
                        status: task.status.clone(),
                        column: column.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    // -- copy-on-write mutation, crate-private so only the coordinator writes --

    pub(crate) fn column_mut(&mut self, index: usize) -> Option<&mut Column> {
        Arc::make_mut(&mut self.columns)
            .get_mut(index)
            .map(Arc::make_mut)
    }

    pub(crate) const fn tasks_mut(&mut self) -> &mut TaskDirectory {
        &mut self.tasks
    }

    pub(crate) fn remove_column(&mut self, index: usize) -> Option<Arc<Column>> {
        if index >= self.columns.len() {
            return None;
        }
        Some(Arc::make_mut(&mut self.columns).remove(index))
    }

    /// Removes `task_id` from every sequence holding it and returns the
    /// indices of the columns that were touched. Untouched columns stay
    /// shared with earlier snapshots.
    pub(crate) fn detach(&mut self, task_id: &str) -> Vec<usize> {
        let holders: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.contains(task_id))
            .map(|(i, _)| i)
            .collect();
        for &index in &holders {
            if let Some(column) = self.column_mut(index) {
                column.task_ids.retain(|id| id != task_id);
            }
        }
        holders
    }
}
