//! Plain-text rendering of a board snapshot.

use std::fmt::Write as _;

use crate::board::Board;
use crate::board::wip::{self, WipLevel};

/// Renders every column with its count, limit, advisory message, and task
/// titles in order, followed by any orphaned tasks.
#[must_use]
pub fn render(board: &Board, near_limit_threshold: f64) -> String {
    let mut out = String::new();
    for column in board.columns() {
        let count = column.len();
        let _ = match column.limit() {
            Some(max) => write!(out, "{} ({count}/{max})", column.title),
            None => write!(out, "{} ({count})", column.title),
        };
        let marker = match wip::level(column, near_limit_threshold) {
            WipLevel::AtLimit => " [full]",
            WipLevel::Near => " [near limit]",
            WipLevel::Open | WipLevel::Unlimited => "",
        };
        out.push_str(marker);
        if let Some(message) = wip::limit_message(column) {
            let _ = write!(out, " - {message}");
        }
        out.push('\n');

        for task in board.tasks_in(&column.id) {
            let _ = write!(out, "  - {}", task.title);
            if let Some(priority) = task.priority {
                let _ = write!(out, " [{priority}]");
            }
            if let Some(assignee) = &task.assignee {
                let _ = write!(out, " @{assignee}");
            }
            out.push('\n');
        }
    }

    let orphans = board.orphans();
    if !orphans.is_empty() {
        let _ = writeln!(out, "Unplaced ({})", orphans.len());
        for task in orphans {
            let _ = writeln!(out, "  - {} (status: {})", task.title, task.status);
        }
    }
    out
}
