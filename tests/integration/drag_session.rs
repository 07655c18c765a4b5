//! Integration tests for drag gestures driven through the coordinator.
//!
//! Each test plays a start/over/end sequence the way a pointer would
//! deliver it and checks the board after every event.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use kanban::board::{Board, BoardCoordinator, Transition};
use kanban::drag::{DragEvent, DragSession};
use kanban::fixtures::sample_board;
use kanban_model::TaskId;

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn start(active: &str) -> DragEvent {
    DragEvent::Start {
        active: TaskId::from(active),
    }
}

fn over(active: &str, target: Option<&str>) -> DragEvent {
    DragEvent::Over {
        active: TaskId::from(active),
        target: target.map(str::to_string),
    }
}

fn end(active: &str, target: Option<&str>) -> DragEvent {
    DragEvent::End {
        active: TaskId::from(active),
        target: target.map(str::to_string),
    }
}

fn ids(board: &Board, column: &str) -> Vec<String> {
    board
        .column(column)
        .expect("column exists")
        .task_ids
        .iter()
        .map(ToString::to_string)
        .collect()
}

// ===========================================================================
// Gestures
// ===========================================================================

#[test]
fn cross_column_drag_applies_on_over() {
    let mut coord = BoardCoordinator::new(sample_board());
    let mut session = DragSession::new();

    assert_eq!(coord.dispatch_drag(&mut session, &start("task-1")), None);
    assert!(session.is_active());

    // Hovering the second card of "done" places the task in front of it.
    let t = coord.dispatch_drag(&mut session, &over("task-1", Some("task-5")));
    assert_eq!(t, Some(Transition::Applied));
    assert_eq!(ids(coord.board(), "done"), ["task-4", "task-1", "task-5"]);
    assert_eq!(ids(coord.board(), "todo"), ["task-2", "task-6"]);

    // Further hovering inside the new column changes nothing until release.
    assert_eq!(
        coord.dispatch_drag(&mut session, &over("task-1", Some("task-4"))),
        None
    );

    // Release on the card it already replaced: now same column, different index.
    let t = coord.dispatch_drag(&mut session, &end("task-1", Some("task-4")));
    assert_eq!(t, Some(Transition::Applied));
    assert_eq!(ids(coord.board(), "done"), ["task-1", "task-4", "task-5"]);
    assert!(!session.is_active());
    assert_eq!(coord.board().task("task-1").unwrap().status.as_str(), "done");
    coord.board().check_invariants().unwrap();
}

#[test]
fn hovering_a_column_appends() {
    let mut coord = BoardCoordinator::new(sample_board());
    let mut session = DragSession::new();
    coord.dispatch_drag(&mut session, &start("task-8"));
    coord.dispatch_drag(&mut session, &over("task-8", Some("in-progress")));
    assert_eq!(ids(coord.board(), "in-progress"), ["task-3", "task-7", "task-8"]);
    assert!(ids(coord.board(), "review").is_empty());

    // Released over the column itself, and the task is already last.
    assert_eq!(
        coord.dispatch_drag(&mut session, &end("task-8", Some("in-progress"))),
        None
    );
}

#[test]
fn same_column_reorder_applies_on_end_only() {
    let mut coord = BoardCoordinator::new(sample_board());
    let mut session = DragSession::new();
    coord.dispatch_drag(&mut session, &start("task-6"));

    assert_eq!(
        coord.dispatch_drag(&mut session, &over("task-6", Some("task-1"))),
        None
    );
    assert_eq!(ids(coord.board(), "todo"), ["task-1", "task-2", "task-6"]);

    let t = coord.dispatch_drag(&mut session, &end("task-6", Some("task-1")));
    assert_eq!(t, Some(Transition::Applied));
    assert_eq!(ids(coord.board(), "todo"), ["task-6", "task-1", "task-2"]);
}

#[test]
fn release_over_nothing_cancels() {
    let mut coord = BoardCoordinator::new(sample_board());
    let before = coord.board().to_seed();
    let mut session = DragSession::new();

    coord.dispatch_drag(&mut session, &start("task-2"));
    assert_eq!(coord.dispatch_drag(&mut session, &over("task-2", None)), None);
    assert_eq!(coord.dispatch_drag(&mut session, &end("task-2", None)), None);

    assert!(!session.is_active());
    assert_eq!(coord.board().to_seed(), before);
}

#[test]
fn release_in_place_is_suppressed() {
    let mut coord = BoardCoordinator::new(sample_board());
    let mut session = DragSession::new();
    coord.dispatch_drag(&mut session, &start("task-2"));
    assert_eq!(
        coord.dispatch_drag(&mut session, &end("task-2", Some("task-2"))),
        None
    );
}

#[test]
fn dragging_across_several_columns_keeps_one_membership() {
    let mut coord = BoardCoordinator::new(sample_board());
    let mut session = DragSession::new();
    coord.dispatch_drag(&mut session, &start("task-3"));

    for target in ["review", "done", "task-2", "task-8"] {
        coord.dispatch_drag(&mut session, &over("task-3", Some(target)));
        coord.board().check_invariants().unwrap();
        let holders = coord
            .board()
            .columns()
            .filter(|c| c.contains("task-3"))
            .count();
        assert_eq!(holders, 1, "after hovering {target}");
    }
    assert_eq!(ids(coord.board(), "review"), ["task-3", "task-8"]);
    assert_eq!(ids(coord.board(), "todo"), ["task-1", "task-2", "task-6"]);

    // Releasing on the card below swaps them.
    coord.dispatch_drag(&mut session, &end("task-3", Some("task-8")));
    assert_eq!(ids(coord.board(), "review"), ["task-8", "task-3"]);
    assert_eq!(coord.board().task("task-3").unwrap().status.as_str(), "review");
}
