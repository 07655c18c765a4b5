//! Configuration for the `kanban` binary.
//!
//! Supports layered configuration with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file (`~/.config/kanban/config.toml`)
//! 4. Compiled defaults
//!
//! Missing config file is not an error (defaults are used). An explicit
//! `--config` path that doesn't exist is an error.

use std::path::{Path, PathBuf};

use crate::board::wip::DEFAULT_NEAR_LIMIT_THRESHOLD;
use crate::board::{CoordinatorPolicy, IdCollisionPolicy, OrphanPolicy};
use crate::form::DEFAULT_MAX_TITLE_LEN;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// The near-limit threshold is outside `(0, 1]`.
    #[error("near_limit_threshold must be in (0, 1], got {0}")]
    InvalidThreshold(f64),

    /// The maximum title length is zero.
    #[error("max_title_len must be at least 1")]
    InvalidTitleLen,
}

// ---------------------------------------------------------------------------
// TOML file structs (all fields Option for partial overrides)
// ---------------------------------------------------------------------------

/// Top-level TOML config file structure.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    board: BoardFileConfig,
    form: FormFileConfig,
}

/// `[board]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct BoardFileConfig {
    near_limit_threshold: Option<f64>,
    orphan_policy: Option<OrphanPolicy>,
    id_collision_policy: Option<IdCollisionPolicy>,
}

/// `[form]` section of the config file.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct FormFileConfig {
    max_title_len: Option<usize>,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct KanbanConfig {
    /// Fraction of a WIP limit at which a column counts as near it.
    pub near_limit_threshold: f64,
    /// Coordinator handling of orphan creates and id collisions.
    pub policy: CoordinatorPolicy,
    /// Maximum task title length in characters.
    pub max_title_len: usize,
}

impl Default for KanbanConfig {
    fn default() -> Self {
        Self {
            near_limit_threshold: DEFAULT_NEAR_LIMIT_THRESHOLD,
            policy: CoordinatorPolicy::default(),
            max_title_len: DEFAULT_MAX_TITLE_LEN,
        }
    }
}

impl KanbanConfig {
    /// Load configuration by merging CLI args, env vars, and a TOML file.
    ///
    /// If `--config` is given and the file does not exist, returns an error.
    /// Otherwise the default path (`~/.config/kanban/config.toml`) is tried
    /// and silently ignored if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file cannot be read or parsed,
    /// or if a resolved value is out of range.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        let config = Self::resolve(cli, &file);
        config.validate()?;
        Ok(config)
    }

    /// Resolve a `KanbanConfig` from CLI args and a parsed config file.
    ///
    /// Priority: CLI > file > default.
    #[must_use]
    fn resolve(cli: &CliArgs, file: &ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            near_limit_threshold: cli
                .near_limit_threshold
                .or(file.board.near_limit_threshold)
                .unwrap_or(defaults.near_limit_threshold),
            policy: CoordinatorPolicy {
                orphans: cli
                    .orphan_policy
                    .or(file.board.orphan_policy)
                    .unwrap_or(defaults.policy.orphans),
                id_collisions: cli
                    .id_collision_policy
                    .or(file.board.id_collision_policy)
                    .unwrap_or(defaults.policy.id_collisions),
            },
            max_title_len: cli
                .max_title_len
                .or(file.form.max_title_len)
                .unwrap_or(defaults.max_title_len),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let t = self.near_limit_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(ConfigError::InvalidThreshold(t));
        }
        if self.max_title_len == 0 {
            return Err(ConfigError::InvalidTitleLen);
        }
        Ok(())
    }
}

/// CLI arguments parsed by clap.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Kanban board engine: seed a board and replay intents")]
pub struct CliArgs {
    /// JSON board seed to start from (default: the built-in sample board).
    #[arg(short, long)]
    pub board: Option<PathBuf>,

    /// File of JSON intents, one per line, applied in order.
    #[arg(short, long)]
    pub script: Option<PathBuf>,

    /// Print the final board as JSON instead of a text summary.
    #[arg(long)]
    pub json: bool,

    /// Path to config file (default: `~/.config/kanban/config.toml`).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// What to do with tasks created in a missing column.
    #[arg(long, value_enum, env = "KANBAN_ORPHAN_POLICY")]
    pub orphan_policy: Option<OrphanPolicy>,

    /// What to do with tasks created under an id already in use.
    #[arg(long, value_enum, env = "KANBAN_ID_COLLISION_POLICY")]
    pub id_collision_policy: Option<IdCollisionPolicy>,

    /// Fraction of a WIP limit at which a column is flagged as near it.
    #[arg(long)]
    pub near_limit_threshold: Option<f64>,

    /// Maximum task title length in characters.
    #[arg(long)]
    pub max_title_len: Option<usize>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", env = "KANBAN_LOG")]
    pub log_level: String,

    /// Path to log file (default: stderr).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Load and parse a TOML config file.
///
/// If `explicit_path` is `Some`, the file must exist (error if not).
/// If `explicit_path` is `None`, the default path is tried and missing file
/// is treated as empty config.
fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    let path = if let Some(p) = explicit_path {
        let contents = std::fs::read_to_string(p).map_err(|e| ConfigError::ReadFile {
            path: p.to_path_buf(),
            source: e,
        })?;
        return Ok(toml::from_str(&contents)?);
    } else {
        let Some(config_dir) = dirs::config_dir() else {
            return Ok(ConfigFile::default());
        };
        config_dir.join("kanban").join("config.toml")
    };

    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ConfigFile::default()),
        Err(e) => Err(ConfigError::ReadFile { path, source: e }),
    }
}
