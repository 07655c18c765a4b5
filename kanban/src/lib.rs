//! Kanban board state-transition and ordering engine.

pub mod board;
pub mod config;
pub mod drag;
pub mod fixtures;
pub mod form;
pub mod script;
pub mod summary;
