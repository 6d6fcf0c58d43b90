//! The execution-time and fidelity arithmetic.

use serde::{Deserialize, Serialize};

use rydra_ir::Gate;

use crate::error::EvalResult;
use crate::movement::MoveStage;
use crate::params::FidelityParams;

/// The evaluator's verdict on one compiled run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FidelityReport {
    /// Accumulated qubit-idle time, in µs.
    pub idle_time: f64,
    /// Estimated fidelity of the whole execution.
    pub total_fidelity: f64,
    /// Decoherence factor attributable to movement alone.
    pub move_fidelity: f64,
    /// Wall-clock runtime of the schedule, in µs.
    pub total_runtime: f64,
    /// Number of atom transfers (four per movement step).
    pub num_transfers: u32,
    /// Number of individual atom moves.
    pub num_moves: u32,
    /// Summed flight distance over all steps, in µm.
    pub total_distance: f64,
}

/// Evaluate a schedule against the machine model.
///
/// `slots` is the flattened slot sequence of the whole run, `movements`
/// holds one stage per consecutive embedding pair, `num_qubits` and
/// `num_gates` describe the circuit.
///
/// Each slot costs `t_cz` of wall-clock time. Each movement step costs four
/// transfers (pick, drop, pick, drop) plus the flight time of its longest
/// move; moves within a step fly in parallel, so only the maximum weighted
/// distance counts. Idle time is everything qubits spend not gating:
/// `N * T - G * t_cz`. Fidelity decays exponentially in idle time over the
/// coherence time, and multiplicatively per gate and per transfer.
///
/// An empty schedule evaluates to fidelity 1.
pub fn evaluate(
    slots: &[Vec<Gate>],
    movements: &[MoveStage],
    num_qubits: usize,
    num_gates: usize,
    params: &FidelityParams,
) -> EvalResult<FidelityReport> {
    params.validate()?;

    let mut total_runtime = slots.len() as f64 * params.t_cz;
    let mut move_time = 0.0;
    let mut num_transfers = 0u32;
    let mut num_moves = 0u32;
    let mut total_distance = 0.0;

    for stage in movements {
        for step in &stage.steps {
            total_runtime += 4.0 * params.t_trans;
            move_time += 4.0 * params.t_trans;
            num_transfers += 4;

            let mut max_sq: f64 = 0.0;
            for m in &step.moves {
                num_moves += 1;
                let dx = (f64::from(m.to.x) - f64::from(m.from.x)).abs() * params.aod_width;
                let dy = (f64::from(m.to.y) - f64::from(m.from.y)).abs() * params.aod_height;
                max_sq = max_sq.max(dx * dx + dy * dy);
            }
            let max_distance = max_sq.sqrt();
            total_distance += max_distance;
            total_runtime += max_distance / params.move_speed;
            move_time += max_distance / params.move_speed;
        }
    }

    let idle_time = num_qubits as f64 * total_runtime - num_gates as f64 * params.t_cz;
    let total_fidelity = (-idle_time / params.t_eff).exp()
        * params.f_cz.powi(num_gates as i32)
        * params.f_trans.powi(num_transfers as i32);
    let move_fidelity = (-move_time / params.t_eff).exp();

    Ok(FidelityReport {
        idle_time,
        total_fidelity,
        move_fidelity,
        total_runtime,
        num_transfers,
        num_moves,
        total_distance,
    })
}
