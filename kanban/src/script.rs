//! Reading board seeds and intent scripts from disk.
//!
//! A seed is a JSON [`BoardSeed`]. A script is JSON Lines: one
//! [`BoardIntent`] per line, applied in order. Blank lines and lines
//! starting with `#` are skipped.

use std::path::{Path, PathBuf};

use kanban_model::{BoardIntent, BoardSeed};

use crate::board::{Board, BoardCoordinator, SeedError};
use crate::form;

/// Errors raised while loading a seed or a script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The seed file is not a valid board seed document.
    #[error("failed to parse board seed: {0}")]
    ParseSeed(#[source] serde_json::Error),

    /// A script line is not a valid intent.
    #[error("line {line}: {source}")]
    ParseLine {
        /// 1-based line number.
        line: usize,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The seed parsed but breaks a board invariant.
    #[error("invalid board seed: {0}")]
    InvalidSeed(#[from] SeedError),
}

/// Parses and validates a seed document.
///
/// # Errors
///
/// Returns [`ScriptError::ParseSeed`] for malformed JSON and
/// [`ScriptError::InvalidSeed`] for a seed that breaks an invariant.
pub fn parse_seed(json: &str) -> Result<Board, ScriptError> {
    let seed: BoardSeed = serde_json::from_str(json).map_err(ScriptError::ParseSeed)?;
    Ok(Board::from_seed(seed)?)
}

/// Parses a JSON Lines intent script.
///
/// # Errors
///
/// Returns [`ScriptError::ParseLine`] for the first line that is not a
/// valid intent. Nothing after it is parsed.
pub fn parse_script(text: &str) -> Result<Vec<BoardIntent>, ScriptError> {
    let mut intents = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let intent = serde_json::from_str(line).map_err(|source| ScriptError::ParseLine {
            line: index + 1,
            source,
        })?;
        intents.push(intent);
    }
    Ok(intents)
}

/// Outcome counts for one replayed script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Intents that committed a new snapshot.
    pub applied: usize,
    /// Intents the coordinator skipped as no-ops.
    pub skipped: usize,
    /// Intents refused before reaching the coordinator.
    pub rejected: usize,
}

/// Applies `intents` in order through `coordinator`.
///
/// Script intents bypass the task form, so each one's titles are checked
/// against `max_title_len` first. A failing intent is logged and dropped;
/// the rest of the script still runs.
pub fn replay(
    coordinator: &mut BoardCoordinator,
    intents: Vec<BoardIntent>,
    max_title_len: usize,
) -> ReplayReport {
    let mut report = ReplayReport::default();
    for intent in intents {
        if let Err(e) = form::check_intent_titles(&intent, max_title_len) {
            tracing::warn!(intent = intent.kind(), error = %e, "intent rejected");
            report.rejected += 1;
            continue;
        }
        if coordinator.apply(intent).is_applied() {
            report.applied += 1;
        } else {
            report.skipped += 1;
        }
    }
    report
}

/// Reads and parses a seed file.
///
/// # Errors
///
/// Returns [`ScriptError::ReadFile`] if the file cannot be read, otherwise
/// as [`parse_seed`].
pub fn read_seed(path: &Path) -> Result<Board, ScriptError> {
    parse_seed(&read(path)?)
}

/// Reads and parses a script file.
///
/// # Errors
///
/// Returns [`ScriptError::ReadFile`] if the file cannot be read, otherwise
/// as [`parse_script`].
pub fn read_script(path: &Path) -> Result<Vec<BoardIntent>, ScriptError> {
    parse_script(&read(path)?)
}

fn read(path: &Path) -> Result<String, ScriptError> {
    std::fs::read_to_string(path).map_err(|source| ScriptError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}
