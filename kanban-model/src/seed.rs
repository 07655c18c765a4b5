//! Initial board supply.
//!
//! The engine defines no storage format of its own. An embedding
//! application hands it a [`BoardSeed`] (hardcoded fixtures, a JSON file,
//! a future persistence layer) and the board validates it on entry.

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::task::Task;

/// Ordered column list plus every task record, as supplied at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSeed {
    /// Columns in display order.
    pub columns: Vec<Column>,
    /// Task records, in any order.
    #[serde(default)]
    pub tasks: Vec<Task>,
}
