//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A two-qubit gate was constructed with identical endpoints.
    #[error("Invalid gate: endpoints must be distinct, got ({a}, {b})")]
    InvalidGate {
        /// First endpoint of the offending gate.
        a: QubitId,
        /// Second endpoint of the offending gate.
        b: QubitId,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
