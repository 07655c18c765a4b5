//! Ready-made boards for demos and tests.

use chrono::{DateTime, NaiveDate, Utc};
use kanban_model::{Column, ColumnId, Priority, Task, TaskId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, TaskDirectory};

const ASSIGNEES: [&str; 5] = [
    "John Doe",
    "Jane Smith",
    "Bob Johnson",
    "Alice Williams",
    "Charlie Brown",
];
const TAG_OPTIONS: [&str; 7] = [
    "frontend",
    "backend",
    "design",
    "testing",
    "documentation",
    "bug",
    "feature",
];
const VERBS: [&str; 5] = ["Implement", "Design", "Fix", "Review", "Test"];

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap_or_default()
}

fn midnight(d: u32) -> DateTime<Utc> {
    day(d).and_hms_opt(0, 0, 0).unwrap_or_default().and_utc()
}

fn standard_columns(limits: [Option<usize>; 4]) -> Vec<Column> {
    let [todo, in_progress, review, done] = limits;
    vec![
        Column {
            max_tasks: todo,
            ..Column::new(ColumnId::from("todo"), "To Do", "#6b7280")
        },
        Column {
            max_tasks: in_progress,
            ..Column::new(ColumnId::from("in-progress"), "In Progress", "#3b82f6")
        },
        Column {
            max_tasks: review,
            ..Column::new(ColumnId::from("review"), "Review", "#f59e0b")
        },
        Column {
            max_tasks: done,
            ..Column::new(ColumnId::from("done"), "Done", "#10b981")
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn sample_task(
    id: &str,
    status: &str,
    title: &str,
    description: &str,
    priority: Priority,
    assignee: &str,
    tags: &[&str],
    (created, due): (u32, u32),
) -> Task {
    Task {
        description: Some(description.to_string()),
        priority: Some(priority),
        assignee: Some(assignee.to_string()),
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
        created_at: midnight(created),
        due_date: Some(day(due)),
        ..Task::new(TaskId::from(id), title, ColumnId::from(status))
    }
}

/// The four-column demo board with eight tasks.
///
/// | column      | limit | tasks                  |
/// |-------------|-------|------------------------|
/// | todo        | 10    | task-1, task-2, task-6 |
/// | in-progress | 5     | task-3, task-7         |
/// | review      | 3     | task-8                 |
/// | done        | none  | task-4, task-5         |
#[must_use]
pub fn sample_board() -> Board {
    let mut columns = standard_columns([Some(10), Some(5), Some(3), None]);
    let sequences: [&[&str]; 4] = [
        &["task-1", "task-2", "task-6"],
        &["task-3", "task-7"],
        &["task-8"],
        &["task-4", "task-5"],
    ];
    for (column, ids) in columns.iter_mut().zip(sequences) {
        column.task_ids = ids.iter().copied().map(TaskId::from).collect();
    }

    let tasks: TaskDirectory = [
        sample_task(
            "task-1",
            "todo",
            "Implement drag and drop functionality",
            "Add drag and drop functionality to kanban cards",
            Priority::High,
            "John Doe",
            &["frontend", "feature"],
            (10, 20),
        ),
        sample_task(
            "task-2",
            "todo",
            "Design task card component",
            "Create a reusable task card component with proper styling",
            Priority::Medium,
            "Jane Smith",
            &["design", "ui"],
            (11, 18),
        ),
        sample_task(
            "task-3",
            "in-progress",
            "Write unit tests",
            "Add comprehensive unit tests for all components",
            Priority::High,
            "Bob Johnson",
            &["testing", "quality"],
            (9, 25),
        ),
        sample_task(
            "task-4",
            "done",
            "Setup project repository",
            "Initialize git repository and configure CI/CD pipeline",
            Priority::Urgent,
            "Alice Williams",
            &["devops", "setup"],
            (5, 8),
        ),
        sample_task(
            "task-5",
            "done",
            "Create project documentation",
            "Write comprehensive README and API documentation",
            Priority::Low,
            "Charlie Brown",
            &["documentation"],
            (6, 12),
        ),
        sample_task(
            "task-6",
            "todo",
            "Implement keyboard navigation",
            "Add full keyboard accessibility support for WCAG 2.1 AA compliance",
            Priority::High,
            "John Doe",
            &["accessibility", "feature"],
            (12, 22),
        ),
        sample_task(
            "task-7",
            "in-progress",
            "Optimize performance",
            "Profile and optimize rendering performance for large datasets",
            Priority::Medium,
            "Jane Smith",
            &["performance", "optimization"],
            (13, 28),
        ),
        sample_task(
            "task-8",
            "review",
            "Code review for modal component",
            "Review and provide feedback on the task modal implementation",
            Priority::Medium,
            "Bob Johnson",
            &["review", "quality"],
            (14, 16),
        ),
    ]
    .into_iter()
    .collect();

    Board::from_parts(columns, tasks)
}

/// A deterministic randomized board with `task_count` tasks spread over the
/// four standard columns (limits 50/20/10/none). The same `seed` always
/// yields the same board, creation times included.
#[must_use]
pub fn large_board(task_count: usize, seed: u64) -> Board {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut columns = standard_columns([Some(50), Some(20), Some(10), None]);
    let mut tasks = Vec::with_capacity(task_count);

    for n in 1..=task_count {
        let column = &mut columns[rng.random_range(0..4)];
        let id = TaskId::new(format!("task-{n}"));
        let verb = VERBS[rng.random_range(0..VERBS.len())];
        let tag_count = rng.random_range(1..=3);
        let tags = (0..tag_count)
            .map(|_| TAG_OPTIONS[rng.random_range(0..TAG_OPTIONS.len())].to_string())
            .collect();
        let due_date = rng
            .random_bool(0.7)
            .then(|| day(rng.random_range(15..=31)));

        tasks.push(Task {
            description: Some(format!("Description for task {n}")),
            priority: Some(Priority::ALL[rng.random_range(0..Priority::ALL.len())]),
            assignee: Some(ASSIGNEES[rng.random_range(0..ASSIGNEES.len())].to_string()),
            tags,
            created_at: midnight(rng.random_range(1..=30)),
            due_date,
            ..Task::new(id.clone(), format!("Task {n}: {verb} feature"), column.id.clone())
        });
        column.task_ids.push(id);
    }

    Board::from_parts(columns, tasks.into_iter().collect())
}
