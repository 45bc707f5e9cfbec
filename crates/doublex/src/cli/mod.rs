//! Subcommand implementations.

pub mod compose;
pub mod config;
pub mod interactive;
pub mod pairs;
