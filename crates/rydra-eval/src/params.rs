//! Physical parameters of the modeled machine.

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, EvalResult};

/// Timing and fidelity parameters of the neutral-atom hardware.
///
/// Times are in microseconds, lengths in micrometers, speeds in µm/µs.
/// Defaults follow the values the model was calibrated against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FidelityParams {
    /// Duration of one (parallel) CZ slot.
    pub t_cz: f64,
    /// Effective coherence time.
    pub t_eff: f64,
    /// Duration of one atom transfer (pick or drop).
    pub t_trans: f64,
    /// Physical pitch between grid columns.
    pub aod_width: f64,
    /// Physical pitch between grid rows.
    pub aod_height: f64,
    /// Atom movement speed.
    pub move_speed: f64,
    /// Fidelity of a single CZ.
    pub f_cz: f64,
    /// Fidelity of a single transfer.
    pub f_trans: f64,
}

impl Default for FidelityParams {
    fn default() -> Self {
        Self {
            t_cz: 0.2,
            t_eff: 1.5e6,
            t_trans: 20.0,
            aod_width: 3.0,
            aod_height: 3.0,
            move_speed: 0.55,
            f_cz: 0.995,
            f_trans: 1.0,
        }
    }
}

impl FidelityParams {
    /// Check every parameter against its documented domain.
    pub fn validate(&self) -> EvalResult<()> {
        let positives = [
            ("t_cz", self.t_cz),
            ("t_eff", self.t_eff),
            ("t_trans", self.t_trans),
            ("aod_width", self.aod_width),
            ("aod_height", self.aod_height),
            ("move_speed", self.move_speed),
            ("f_cz", self.f_cz),
            ("f_trans", self.f_trans),
        ];
        for (name, value) in positives {
            if !(value > 0.0) {
                return Err(EvalError::ParamOutOfRange {
                    name,
                    value,
                    expected: "a positive real",
                });
            }
        }
        Ok(())
    }
}
