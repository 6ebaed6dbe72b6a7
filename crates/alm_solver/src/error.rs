//! Solver errors.

use thiserror::Error;

/// Errors raised while searching for a variable value that hits a metric
/// target.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The caller-supplied metric evaluation failed for some candidate
    /// value (e.g. curve lookup, cashflow generation).
    #[error("evaluating the metric at a candidate value failed: {0}")]
    Evaluation(String),

    /// `lower` did not strictly precede `upper`.
    #[error("invalid solver bounds: lower ({lower}) must be less than upper ({upper})")]
    InvalidBounds {
        /// The supplied lower bound.
        lower: f64,
        /// The supplied upper bound.
        upper: f64,
    },
}
