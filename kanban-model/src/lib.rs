//! Shared board model definitions for the kanban engine.

pub mod column;
pub mod ids;
pub mod intent;
pub mod seed;
pub mod task;

pub use column::{Column, ColumnFieldUpdate};
pub use ids::{ColumnId, IdKind, TaskId, new_id};
pub use intent::BoardIntent;
pub use seed::BoardSeed;
pub use task::{Priority, Task, TaskFieldUpdate};
