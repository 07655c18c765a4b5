//! `kanban`: seed a board, replay intents against it, print the result.
//!
//! ```bash
//! # Summary of the built-in sample board
//! cargo run --bin kanban
//!
//! # Replay a script against a seed and dump the final snapshot
//! cargo run --bin kanban -- --board board.json --script intents.jsonl --json
//!
//! # Show every transition, applied or skipped
//! KANBAN_LOG=debug cargo run --bin kanban -- --script intents.jsonl
//! ```

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;

use kanban::board::{Board, BoardCoordinator};
use kanban::config::{CliArgs, KanbanConfig};
use kanban::{fixtures, script, summary};

fn main() -> ExitCode {
    let cli = CliArgs::parse();

    // CLI args > env > config file > defaults.
    let config = match KanbanConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config: {e}");
            KanbanConfig::default()
        }
    };

    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    match run(&cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "kanban failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &CliArgs, config: &KanbanConfig) -> Result<(), Box<dyn std::error::Error>> {
    let board = match cli.board.as_deref() {
        Some(path) => script::read_seed(path)?,
        None => fixtures::sample_board(),
    };
    tracing::info!(
        columns = board.columns().len(),
        tasks = board.tasks().len(),
        "board seeded"
    );

    let mut coordinator = BoardCoordinator::with_policy(board, config.policy);
    if let Some(path) = cli.script.as_deref() {
        let intents = script::read_script(path)?;
        let report = script::replay(&mut coordinator, intents, config.max_title_len);
        tracing::info!(
            applied = report.applied,
            skipped = report.skipped,
            rejected = report.rejected,
            "script replayed"
        );
    }

    print_board(coordinator.board(), cli.json, config.near_limit_threshold)
}

fn print_board(board: &Board, json: bool, threshold: f64) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(&board.to_seed())?);
    } else {
        print!("{}", summary::render(board, threshold));
    }
    Ok(())
}

/// Initialize logging to stderr, or to `file_path` when given.
///
/// A `file_path` without a usable file name falls back to stderr with a
/// warning. Returns a [`WorkerGuard`] for the file writer that must be held
/// until shutdown so buffered entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let target = match file_path.map(split_log_path) {
        Some(Ok(target)) => Some(target),
        Some(Err(path)) => {
            eprintln!("Warning: unusable log file {}, logging to stderr", path.display());
            None
        }
        None => None,
    };
    let Some((log_dir, file_name)) = target else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter)
            .init();
        return None;
    };

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Splits a log file path into its directory and file name.
///
/// Returns the path back as the error when it has no UTF-8 file name
/// component (`/`, `..`).
fn split_log_path(path: &Path) -> Result<(&Path, &str), &Path> {
    let file_name = path.file_name().and_then(|n| n.to_str()).ok_or(path)?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((dir, file_name))
}
