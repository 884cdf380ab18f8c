//! Error type shared by the loader, configuration, and binary.

use thiserror::Error;

/// Errors produced while configuring a run or reading its input.
///
/// The annealing loop itself never fails: stalling is its termination
/// signal, not an error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("line {line}: cannot parse `{token}` as an integer rating")]
    Parse { line: usize, token: String },

    #[error("expected {expected} rating rows, found {found}")]
    MissingRows { expected: usize, found: usize },

    #[error("row {row}: expected {expected} ratings, found {found}")]
    ShortRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
