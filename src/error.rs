//! Error types for benchmark configuration and reporting.

use thiserror::Error;

/// A benchmark registration that cannot be run.
///
/// Detected before any kernel is invoked. Only the offending registration is
/// dropped; the rest of the suite still runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("size range must start above zero")]
    ZeroStart,
    #[error("size range is empty: start {start} is greater than end {end}")]
    EmptyRange { start: usize, end: usize },
    #[error("range multiplier must be at least 2, got {0}")]
    MultiplierTooSmall(usize),
    #[error("repetition count must be at least 1")]
    ZeroRepetitions,
    #[error("maximum iteration count must be at least 1")]
    ZeroIterations,
}

/// Failure while writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}
