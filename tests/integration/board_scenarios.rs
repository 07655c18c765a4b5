//! Integration tests for board transitions.
//!
//! Covers the move/create/update/delete scenarios end to end through
//! `BoardCoordinator::apply`, plus the membership invariants and snapshot
//! isolation between transitions.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use kanban::board::wip;
use kanban::board::{
    Board, BoardCoordinator, CoordinatorPolicy, IdCollisionPolicy, OrphanPolicy, SkipReason,
    Transition,
};
use kanban::fixtures::sample_board;
use kanban_model::{
    BoardIntent, BoardSeed, Column, ColumnFieldUpdate, ColumnId, Priority, Task, TaskFieldUpdate,
    TaskId,
};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

fn make_task(id: &str, status: &str) -> Task {
    Task::new(TaskId::from(id), format!("Task {id}"), ColumnId::from(status))
}

/// todo=[t1,t2,t3], in-progress=[], review=[] (max 3), done=[t4,t5]
fn make_board() -> Board {
    Board::from_seed(BoardSeed {
        columns: vec![
            Column::new(ColumnId::from("todo"), "To Do", "#6b7280").with_task_ids(["t1", "t2", "t3"]),
            Column::new(ColumnId::from("in-progress"), "In Progress", "#3b82f6"),
            Column::new(ColumnId::from("review"), "Review", "#f59e0b").with_max_tasks(3),
            Column::new(ColumnId::from("done"), "Done", "#10b981").with_task_ids(["t4", "t5"]),
        ],
        tasks: vec![
            make_task("t1", "todo"),
            make_task("t2", "todo"),
            make_task("t3", "todo"),
            make_task("t4", "done"),
            make_task("t5", "done"),
        ],
    })
    .expect("valid seed")
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

fn move_task(task: &str, from: &str, to: &str, target_index: usize) -> BoardIntent {
    BoardIntent::MoveTask {
        task_id: TaskId::from(task),
        from: ColumnId::from(from),
        to: ColumnId::from(to),
        target_index,
    }
}

fn status(board: &Board, task: &str) -> String {
    board.task(task).expect("task exists").status.to_string()
}

// ===========================================================================
// Scenarios
// ===========================================================================

#[test]
fn scenario_reorder_within_column() {
    let mut coord = BoardCoordinator::new(make_board());
    assert!(coord.apply(move_task("t2", "todo", "todo", 0)).is_applied());
    assert_eq!(ids(coord.board(), "todo"), ["t2", "t1", "t3"]);
}

#[test]
fn scenario_move_across_columns() {
    let mut coord = BoardCoordinator::new(make_board());
    coord.apply(move_task("t1", "todo", "done", 1));
    assert_eq!(ids(coord.board(), "todo"), ["t2", "t3"]);
    assert_eq!(ids(coord.board(), "done"), ["t4", "t1", "t5"]);
    assert_eq!(status(coord.board(), "t1"), "done");
}

#[test]
fn scenario_wip_limit_messages() {
    let mut coord = BoardCoordinator::new(make_board());
    for id in ["t1", "t2"] {
        coord.apply(move_task(id, "todo", "review", 0));
    }
    let review = coord.board().column("review").unwrap();
    assert!(!wip::is_at_limit(review));
    assert_eq!(wip::limit_message(review).as_deref(), Some("1 slot remaining"));

    coord.apply(move_task("t3", "todo", "review", 0));
    let review = coord.board().column("review").unwrap();
    assert!(wip::is_at_limit(review));
    assert!(wip::is_near_limit(review, wip::DEFAULT_NEAR_LIMIT_THRESHOLD));
    assert_eq!(wip::limit_message(review).as_deref(), Some("WIP limit reached"));
}

#[test]
fn scenario_delete_column_destroys_tasks() {
    let mut coord = BoardCoordinator::new(make_board());
    coord.apply(BoardIntent::DeleteColumn {
        column_id: ColumnId::from("done"),
    });
    assert!(coord.board().column("done").is_none());
    assert!(coord.board().task("t4").is_none());
    assert!(coord.board().task("t5").is_none());
    assert_eq!(coord.board().columns().len(), 3);
}

#[test]
fn scenario_status_update_moves_to_front() {
    let mut coord = BoardCoordinator::new(make_board());
    coord.apply(move_task("t4", "done", "in-progress", 0));
    coord.apply(BoardIntent::UpdateTask {
        task_id: TaskId::from("t1"),
        fields: vec![TaskFieldUpdate::Status(ColumnId::from("in-progress"))],
    });
    assert_eq!(ids(coord.board(), "in-progress"), ["t1", "t4"]);
    assert_eq!(ids(coord.board(), "todo"), ["t2", "t3"]);
    assert_eq!(status(coord.board(), "t1"), "in-progress");
}

#[test]
fn scenario_create_twice_with_same_id() {
    let mut coord = BoardCoordinator::new(make_board());
    coord.apply(BoardIntent::CreateTask {
        column_id: ColumnId::from("todo"),
        task: make_task("t9", "todo"),
    });
    let mut again = make_task("t9", "todo");
    again.title = "Second".to_string();
    coord.apply(BoardIntent::CreateTask {
        column_id: ColumnId::from("todo"),
        task: again,
    });

    assert_eq!(coord.board().task("t9").unwrap().title, "Second");
    let todo = ids(coord.board(), "todo");
    assert_eq!(todo.iter().filter(|id| *id == "t9").count(), 1);
    coord.board().check_invariants().unwrap();
}

// ===========================================================================
// Silent no-ops
// ===========================================================================

#[test]
fn references_to_missing_entities_leave_board_unchanged() {
    let mut coord = BoardCoordinator::new(make_board());
    let before = coord.board().to_seed();

    let intents = [
        move_task("t1", "todo", "archive", 0),
        move_task("t1", "archive", "todo", 0),
        BoardIntent::UpdateTask {
            task_id: TaskId::from("ghost"),
            fields: vec![TaskFieldUpdate::Title("x".to_string())],
        },
        BoardIntent::DeleteTask {
            task_id: TaskId::from("ghost"),
        },
        BoardIntent::DuplicateTask {
            task_id: TaskId::from("ghost"),
        },
        BoardIntent::UpdateColumn {
            column_id: ColumnId::from("archive"),
            fields: vec![ColumnFieldUpdate::Title("Archive".to_string())],
        },
        BoardIntent::DeleteColumn {
            column_id: ColumnId::from("archive"),
        },
    ];
    for intent in intents {
        let transition = coord.apply(intent);
        assert!(matches!(transition, Transition::Skipped(_)), "{transition:?}");
    }
    assert_eq!(coord.board().to_seed(), before);
}

#[test]
fn redundant_move_is_order_preserving() {
    let mut coord = BoardCoordinator::new(make_board());
    for (index, id) in ["t1", "t2", "t3"].iter().enumerate() {
        let transition = coord.apply(move_task(id, "todo", "todo", index));
        assert_eq!(transition, Transition::Skipped(SkipReason::Unchanged));
    }
    assert_eq!(ids(coord.board(), "todo"), ["t1", "t2", "t3"]);
}

// ===========================================================================
// Policies
// ===========================================================================

#[test]
fn strict_policy_refuses_orphans_and_collisions() {
    let policy = CoordinatorPolicy {
        orphans: OrphanPolicy::Reject,
        id_collisions: IdCollisionPolicy::Reject,
    };
    let mut coord = BoardCoordinator::with_policy(make_board(), policy);

    let orphan = coord.apply(BoardIntent::CreateTask {
        column_id: ColumnId::from("archive"),
        task: make_task("t9", "archive"),
    });
    assert_eq!(
        orphan,
        Transition::Skipped(SkipReason::OrphanRejected(ColumnId::from("archive")))
    );

    let collision = coord.apply(BoardIntent::CreateTask {
        column_id: ColumnId::from("todo"),
        task: make_task("t4", "todo"),
    });
    assert_eq!(
        collision,
        Transition::Skipped(SkipReason::IdCollision(TaskId::from("t4")))
    );
    assert_eq!(coord.board().tasks().len(), 5);
}

// ===========================================================================
// Snapshot isolation
// ===========================================================================

#[test]
fn earlier_snapshot_never_changes() {
    let mut coord = BoardCoordinator::new(sample_board());
    let before = coord.snapshot();
    let before_seed = before.to_seed();

    coord.apply(move_task("task-1", "todo", "done", 0));
    coord.apply(BoardIntent::UpdateTask {
        task_id: TaskId::from("task-3"),
        fields: vec![TaskFieldUpdate::Priority(Some(Priority::Low))],
    });
    coord.apply(BoardIntent::DeleteColumn {
        column_id: ColumnId::from("review"),
    });

    assert_eq!(before.to_seed(), before_seed);
    assert_ne!(coord.board().to_seed(), before_seed);
}

#[test]
fn untouched_parts_are_shared() {
    let mut coord = BoardCoordinator::new(sample_board());
    let before = coord.snapshot();
    coord.apply(move_task("task-1", "todo", "todo", 2));

    assert!(!coord.board().shares_column_with(&before, "todo"));
    for column in ["in-progress", "review", "done"] {
        assert!(coord.board().shares_column_with(&before, column), "{column}");
    }
    // A pure reorder touches no task record.
    assert!(coord.board().tasks().shares_storage_with(before.tasks()));
}

// ===========================================================================
// Invariants
// ===========================================================================

#[test]
fn sample_board_workflow_keeps_invariants() {
    let mut coord = BoardCoordinator::new(sample_board());
    let intents = vec![
        move_task("task-1", "todo", "in-progress", 0),
        BoardIntent::DuplicateTask {
            task_id: TaskId::from("task-8"),
        },
        BoardIntent::UpdateTask {
            task_id: TaskId::from("task-5"),
            fields: vec![
                TaskFieldUpdate::Status(ColumnId::from("review")),
                TaskFieldUpdate::Assignee(None),
            ],
        },
        BoardIntent::UpdateColumn {
            column_id: ColumnId::from("todo"),
            fields: vec![ColumnFieldUpdate::TaskIds(vec![
                TaskId::from("task-6"),
                TaskId::from("task-3"),
                TaskId::from("task-2"),
            ])],
        },
        BoardIntent::DeleteTask {
            task_id: TaskId::from("task-7"),
        },
    ];
    for intent in intents {
        coord.apply(intent);
        coord.board().check_invariants().unwrap();
    }

    assert_eq!(ids(coord.board(), "todo"), ["task-6", "task-3", "task-2"]);
    assert_eq!(ids(coord.board(), "in-progress"), ["task-1"]);
    assert_eq!(ids(coord.board(), "review").len(), 3);
    assert_eq!(ids(coord.board(), "review")[0], "task-5");
    assert!(coord.board().task("task-5").unwrap().assignee.is_none());
}
