//! Error types for Medir
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Medir error types
#[derive(Error, Debug)]
pub enum Error {
    /// A benchmark record failed the ingestion invariant
    #[error("record validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Caller supplied an invalid argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Ingestion attempted after the store was sealed for analysis
    #[error("record store is sealed: ingestion is closed for this analysis run")]
    StoreSealed,
}

/// Per-record validation failures.
///
/// Recovered locally during ingestion: the offending record is rejected,
/// the rest of the batch continues (partial success, never all-or-nothing).
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    /// `size` must be a positive element count
    #[error("size must be positive, got 0")]
    ZeroSize,

    /// `time` must be a non-negative duration in seconds
    #[error("time must be non-negative, got {0}")]
    NegativeTime(f64),

    /// `time` must be a finite number
    #[error("time must be finite, got {0}")]
    NonFiniteTime(f64),
}
