//! Work-in-progress limit evaluation.
//!
//! Limits are advisory: nothing in the engine refuses a task because a
//! column is full. These helpers only tell the UI what to show.

use kanban_model::Column;

/// Fraction of the limit at which a column counts as "near" it.
pub const DEFAULT_NEAR_LIMIT_THRESHOLD: f64 = 0.8;

/// How full a column is relative to its WIP limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WipLevel {
    /// No limit set.
    Unlimited,
    /// Below the near-limit threshold.
    Open,
    /// At or above the threshold but below the limit.
    Near,
    /// At or above the limit.
    AtLimit,
}

/// Returns `true` if the column has a limit and holds at least that many tasks.
#[must_use]
pub fn is_at_limit(column: &Column) -> bool {
    column.limit().is_some_and(|max| column.len() >= max)
}

/// Returns `true` if the column has a limit and holds at least
/// `max * threshold` tasks. Implied by [`is_at_limit`] for any threshold ≤ 1.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn is_near_limit(column: &Column, threshold: f64) -> bool {
    column
        .limit()
        .is_some_and(|max| column.len() as f64 >= max as f64 * threshold)
}

/// Advisory message for the column header, if one applies.
///
/// `"WIP limit reached"` when no slots remain, `"N slot(s) remaining"` when
/// one or two remain, nothing otherwise.
#[must_use]
pub fn limit_message(column: &Column) -> Option<String> {
    let max = column.limit()?;
    match max.saturating_sub(column.len()) {
        0 => Some("WIP limit reached".to_string()),
        1 => Some("1 slot remaining".to_string()),
        2 => Some("2 slots remaining".to_string()),
        _ => None,
    }
}

/// Classifies a column against its limit.
#[must_use]
pub fn level(column: &Column, threshold: f64) -> WipLevel {
    if column.limit().is_none() {
        WipLevel::Unlimited
    } else if is_at_limit(column) {
        WipLevel::AtLimit
    } else if is_near_limit(column, threshold) {
        WipLevel::Near
    } else {
        WipLevel::Open
    }
}
