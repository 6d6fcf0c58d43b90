//! ASAP dependency layering of gate lists.

use crate::gate::{num_qubits, Gate};

/// Partition a gate list into ASAP dependency layers.
///
/// Each gate lands in the earliest layer in which neither of its qubits is
/// already busy: layer `max(front[a], front[b])`, where `front[q]` is one
/// past the last layer containing a gate on `q`. Gates that end up in the
/// same layer keep their input order.
///
/// The concatenation of the returned layers is a permutation of the input
/// that respects per-qubit gate order.
pub fn layers(gates: &[Gate]) -> Vec<Vec<Gate>> {
    let n = num_qubits(gates);
    let mut front = vec![0usize; n];
    let mut out: Vec<Vec<Gate>> = Vec::new();

    for &gate in gates {
        let layer = front[gate.a.index()].max(front[gate.b.index()]);
        if layer == out.len() {
            out.push(Vec::new());
        }
        out[layer].push(gate);
        front[gate.a.index()] = layer + 1;
        front[gate.b.index()] = layer + 1;
    }

    out
}
