//! Positional operations on a column's task sequence.
//!
//! Every function returns a fresh `Vec` and never aliases its input, so a
//! sequence still referenced by an older snapshot is left untouched.
//! Indices are clamped, never rejected.

use kanban_model::TaskId;

/// Returns `sequence` without the first occurrence of `id`.
#[must_use]
pub fn remove_id(sequence: &[TaskId], id: &str) -> Vec<TaskId> {
    let mut out = sequence.to_vec();
    if let Some(pos) = out.iter().position(|t| t == id) {
        out.remove(pos);
    }
    out
}

/// Returns `sequence` with `id` inserted at `index`, clamped to `[0, len]`.
///
/// Inserting at `len` appends. Duplicates are not checked here; callers
/// detach the id from its old position first.
#[must_use]
pub fn insert_at(sequence: &[TaskId], id: TaskId, index: usize) -> Vec<TaskId> {
    let mut out = Vec::with_capacity(sequence.len() + 1);
    out.extend_from_slice(sequence);
    out.insert(index.min(sequence.len()), id);
    out
}

/// Moves the element at `from` to `to` with remove-then-insert semantics.
///
/// No-op when `from == to` or `from` is out of range. `to` is clamped.
#[must_use]
pub fn reorder(sequence: &[TaskId], from: usize, to: usize) -> Vec<TaskId> {
    let mut out = sequence.to_vec();
    if from == to || from >= out.len() {
        return out;
    }
    let moved = out.remove(from);
    let to = to.min(out.len());
    out.insert(to, moved);
    out
}

/// Resolves where a drop on `target` lands within `sequence`.
///
/// A task target resolves to its own position. Anything else (the column
/// itself) resolves to `len`, i.e. the end of the column.
#[must_use]
pub fn drop_index(sequence: &[TaskId], target: &str) -> usize {
    sequence
        .iter()
        .position(|t| t == target)
        .unwrap_or(sequence.len())
}
