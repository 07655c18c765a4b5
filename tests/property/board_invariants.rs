//! Property-based tests for board membership invariants.
//!
//! Uses proptest to verify:
//! 1. Any sequence of intents, including ones naming missing tasks or
//!    columns, keeps every task in at most one column with a matching status.
//! 2. A transition never changes the snapshot it started from.
//! 3. Removing an id from a sequence and reinserting it at its old index
//!    restores the sequence.
//! 4. Redundant same-position moves never change order.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use kanban::board::sequence;
use kanban::board::{BoardCoordinator, CoordinatorPolicy, IdCollisionPolicy, OrphanPolicy};
use kanban::fixtures::large_board;
use kanban_model::{BoardIntent, ColumnFieldUpdate, ColumnId, Task, TaskFieldUpdate, TaskId};
use proptest::prelude::*;

const TASKS: usize = 24;
const COLUMN_IDS: [&str; 5] = ["todo", "in-progress", "review", "done", "archive"];

// --- Strategies ---

/// Task ids from the fixture plus a few that never exist.
fn arb_task_id() -> impl Strategy<Value = TaskId> {
    (1..=TASKS + 3).prop_map(|n| TaskId::new(format!("task-{n}")))
}

/// The fixture's column ids plus one that never exists.
fn arb_column_id() -> impl Strategy<Value = ColumnId> {
    prop::sample::select(COLUMN_IDS.to_vec()).prop_map(ColumnId::from)
}

fn arb_intent() -> impl Strategy<Value = BoardIntent> {
    prop_oneof![
        4 => (arb_task_id(), arb_column_id(), arb_column_id(), 0..12usize).prop_map(
            |(task_id, from, to, target_index)| BoardIntent::MoveTask {
                task_id,
                from,
                to,
                target_index,
            }
        ),
        2 => (arb_task_id(), arb_column_id()).prop_map(|(id, column_id)| BoardIntent::CreateTask {
            task: Task::new(id, "Created", column_id.clone()),
            column_id,
        }),
        2 => (arb_task_id(), arb_column_id(), "[a-z ]{1,12}").prop_map(|(task_id, status, title)| {
            BoardIntent::UpdateTask {
                task_id,
                fields: vec![TaskFieldUpdate::Title(title), TaskFieldUpdate::Status(status)],
            }
        }),
        1 => arb_task_id().prop_map(|task_id| BoardIntent::DeleteTask { task_id }),
        1 => arb_task_id().prop_map(|task_id| BoardIntent::DuplicateTask { task_id }),
        1 => (arb_column_id(), prop::collection::vec(arb_task_id(), 0..6)).prop_map(
            |(column_id, ids)| BoardIntent::UpdateColumn {
                column_id,
                fields: vec![ColumnFieldUpdate::TaskIds(ids)],
            }
        ),
        1 => arb_column_id().prop_map(|column_id| BoardIntent::DeleteColumn { column_id }),
    ]
}

fn arb_policy() -> impl Strategy<Value = CoordinatorPolicy> {
    (
        prop::sample::select(vec![
            OrphanPolicy::Allow,
            OrphanPolicy::Reject,
            OrphanPolicy::FallbackToFirstColumn,
        ]),
        prop::sample::select(vec![
            IdCollisionPolicy::Overwrite,
            IdCollisionPolicy::Reject,
            IdCollisionPolicy::Reassign,
        ]),
    )
        .prop_map(|(orphans, id_collisions)| CoordinatorPolicy {
            orphans,
            id_collisions,
        })
}

fn arb_sequence() -> impl Strategy<Value = Vec<TaskId>> {
    prop::collection::hash_set(0u32..1000, 1..20).prop_map(|set| {
        set.into_iter()
            .map(|n| TaskId::new(format!("t{n}")))
            .collect()
    })
}

// --- Properties ---

proptest! {
    #[test]
    fn invariants_hold_after_every_intent(
        seed in any::<u64>(),
        policy in arb_policy(),
        intents in prop::collection::vec(arb_intent(), 1..40),
    ) {
        let mut coord = BoardCoordinator::with_policy(large_board(TASKS, seed), policy);
        for intent in intents {
            coord.apply(intent);
            prop_assert_eq!(coord.board().check_invariants(), Ok(()));
        }
    }

    #[test]
    fn transitions_never_touch_the_previous_snapshot(
        seed in any::<u64>(),
        intents in prop::collection::vec(arb_intent(), 1..20),
    ) {
        let mut coord = BoardCoordinator::new(large_board(TASKS, seed));
        for intent in intents {
            let before = coord.snapshot();
            let before_seed = before.to_seed();
            coord.apply(intent);
            prop_assert_eq!(before.to_seed(), before_seed);
        }
    }

    #[test]
    fn remove_then_insert_round_trips(seq in arb_sequence(), pick in any::<prop::sample::Index>()) {
        let index = pick.index(seq.len());
        let id = seq[index].clone();
        let removed = sequence::remove_id(&seq, id.as_str());
        prop_assert_eq!(sequence::insert_at(&removed, id, index), seq);
    }

    #[test]
    fn insert_clamps_any_index(seq in arb_sequence(), index in any::<usize>()) {
        let out = sequence::insert_at(&seq, TaskId::from("new"), index);
        prop_assert_eq!(out.len(), seq.len() + 1);
        prop_assert_eq!(out.iter().position(|t| t == "new"), Some(index.min(seq.len())));
    }

    #[test]
    fn same_position_move_is_noop(seed in any::<u64>(), pick in any::<prop::sample::Index>()) {
        let mut coord = BoardCoordinator::new(large_board(TASKS, seed));
        let column = coord
            .board()
            .columns()
            .find(|c| !c.is_empty())
            .cloned()
            .unwrap();
        let index = pick.index(column.len());
        let task_id = column.task_ids[index].clone();

        coord.move_task(&task_id, &column.id, &column.id, index);
        prop_assert_eq!(&coord.board().column(&column.id).unwrap().task_ids, &column.task_ids);
    }
}
