//! Error type shared by the fallible parts of the crate.

use std::io;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, AlgoError>;

/// Tree insertion never fails; only invariant checks, the numeric routines,
/// benchmark output and argument parsing report errors.
#[derive(Debug, Error)]
pub enum AlgoError {
    /// Underlying file or stream failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Benchmark CSV could not be written.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    /// Structured output could not be produced.
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Matrix and vector sizes disagree.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// Back substitution hit a zero on the diagonal.
    #[error("zero pivot on row {row}")]
    ZeroPivot { row: usize },
    /// A structural check found a broken tree or unsorted output.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl From<serde_json::Error> for AlgoError {
    fn from(err: serde_json::Error) -> Self {
        AlgoError::Serialization(err.to_string())
    }
}
