//! Error types for the evaluation crate.

use thiserror::Error;

/// Errors that can occur while evaluating a schedule.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EvalError {
    /// A physical parameter violates its documented domain.
    #[error("Fidelity parameter `{name}` out of range: got {value}, expected {expected}")]
    ParamOutOfRange {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable domain description.
        expected: &'static str,
    },
}

/// Result type for evaluation operations.
pub type EvalResult<T> = Result<T, EvalError>;
