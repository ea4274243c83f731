//! Error types for the imputation library.

use thiserror::Error;

/// Result type for imputation operations.
pub type Result<T> = std::result::Result<T, ImputeError>;

/// Error types for series construction and imputation operations.
///
/// All variants are fail-fast validation errors raised before any series
/// data is mutated. Failing to find an acceptable match for a gap is not an
/// error; the gap is left unresolved and the run continues.
#[derive(Error, Debug)]
pub enum ImputeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    #[error("Invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("Probe of length {probe_len} is longer than the series ({series_len} points)")]
    ProbeTooLong { probe_len: usize, series_len: usize },
}
