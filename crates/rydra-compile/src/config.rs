//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use rydra_ir::Position;

use crate::error::{CompileError, CompileResult};

/// Configuration for a transpilation run.
///
/// A single immutable value threaded through the whole pipeline. All fields
/// have defaults; [`validate`](Self::validate) enforces the documented
/// domains and is called once by the driver before any stage runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Rydberg interaction radius `Rb`, in grid units. Two atoms within this
    /// distance can perform a CZ; the blockade-exclusion radius used by the
    /// scheduler is `2 * interaction_radius`.
    pub interaction_radius: f64,

    /// Movement-cost weight for qubits that sit idle in the partition being
    /// placed. Active qubits always weigh `1.0`.
    pub idle_weight: f64,

    /// Maximum number of VF2 candidate mappings the placer examines per
    /// partition before settling for the best seen.
    pub max_candidates: usize,

    /// When `true`, pick the candidate minimizing weighted movement from the
    /// previous placement; when `false`, take the first VF2 mapping.
    pub optimize_movement: bool,

    /// Side length of the initial atom grid. `None` defaults to
    /// `ceil(sqrt(N))` for an `N`-qubit circuit.
    pub grid_side: Option<u32>,

    /// Pre-supplied complete placement for partition 0. When present, the
    /// placer starts at partition 1 and optimizes against this placement.
    pub initial_mapping: Option<Vec<Position>>,

    /// Seed for the completer's fallback site picker, so runs reproduce
    /// byte-identically.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interaction_radius: 2.0,
            idle_weight: 0.3,
            max_candidates: 50,
            optimize_movement: true,
            grid_side: None,
            initial_mapping: None,
            seed: 0,
        }
    }
}

impl Config {
    /// Check every parameter against its documented domain.
    pub fn validate(&self) -> CompileResult<()> {
        if !(self.interaction_radius > 0.0) {
            return Err(CompileError::ConfigOutOfRange {
                name: "interaction_radius",
                value: self.interaction_radius.to_string(),
                expected: "a positive real",
            });
        }
        if !(0.0..=1.0).contains(&self.idle_weight) {
            return Err(CompileError::ConfigOutOfRange {
                name: "idle_weight",
                value: self.idle_weight.to_string(),
                expected: "a real in [0.0, 1.0]",
            });
        }
        if self.max_candidates == 0 {
            return Err(CompileError::ConfigOutOfRange {
                name: "max_candidates",
                value: "0".into(),
                expected: "a positive integer",
            });
        }
        if self.grid_side == Some(0) {
            return Err(CompileError::ConfigOutOfRange {
                name: "grid_side",
                value: "0".into(),
                expected: "a positive integer",
            });
        }
        Ok(())
    }

    /// The blockade-exclusion radius `r_re = 2 * Rb` used by the scheduler.
    #[inline]
    pub fn blockade_radius(&self) -> f64 {
        2.0 * self.interaction_radius
    }
}
