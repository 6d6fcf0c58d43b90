//! Error types for the compilation pipeline.

use thiserror::Error;

/// Errors that can occur during transpilation.
///
/// Every error is fatal for the run: the pipeline aborts at the offending
/// stage and surfaces the partition index where one applies. Grid extension
/// is a pipeline step, not an error-recovery path, so it never appears here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// The placer found no embedding for a partition, even after enlarging
    /// the grid.
    #[error("No embedding found for partition {partition}, even after grid extension")]
    EmbeddingExhausted {
        /// Index of the partition that failed to embed.
        partition: usize,
    },

    /// The completer ran out of free sites while extending an embedding to a
    /// total bijection. The grid is too small for the qubit population.
    #[error("Cannot complete placement for partition {partition}: free grid sites exhausted")]
    PlacementInfeasible {
        /// Index of the partition whose completion failed.
        partition: usize,
    },

    /// A configuration parameter violates its documented domain.
    #[error("Configuration parameter `{name}` out of range: got {value}, expected {expected}")]
    ConfigOutOfRange {
        /// Parameter name.
        name: &'static str,
        /// The rejected value, rendered for the message.
        value: String,
        /// Human-readable domain description.
        expected: &'static str,
    },

    /// A placement file could not be parsed.
    #[error("Malformed placement file at line {line}: {reason}")]
    MalformedPlacement {
        /// One-based line number of the offending line.
        line: usize,
        /// What went wrong.
        reason: String,
    },

    /// An IR-level error (invalid gate, etc.).
    #[error(transparent)]
    Ir(#[from] rydra_ir::IrError),

    /// An I/O error while persisting or loading artifacts.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A serialization error while persisting or loading artifacts.
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
