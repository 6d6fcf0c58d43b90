//! Intra-partition parallel scheduling under the Rydberg blockade.

use rydra_ir::{layers, Gate, Position};

/// Check whether two gates may fire simultaneously under a blockade
/// exclusion radius.
///
/// Simultaneous CZ pairs interfere unless every one of the four cross
/// distances between their endpoints strictly exceeds `blockade_radius`
/// (`r_re = 2 * Rb`).
pub fn compatible(g1: &Gate, g2: &Gate, placement: &[Position], blockade_radius: f64) -> bool {
    let [a, b] = g1.qubits().map(|q| placement[q.index()]);
    let [c, d] = g2.qubits().map(|q| placement[q.index()]);
    a.distance_to(&c) > blockade_radius
        && a.distance_to(&d) > blockade_radius
        && b.distance_to(&c) > blockade_radius
        && b.distance_to(&d) > blockade_radius
}

/// Group a partition's gates into parallel slots.
///
/// The partition is re-layered so dependence order is respected, then each
/// layer is split greedily: the first remaining gate opens a slot, every
/// later gate compatible with the whole slot joins it, and the sweep repeats
/// until the layer drains. The concatenation of the returned slots is a
/// permutation of the partition's gates that never hoists a gate past a
/// dependency.
pub fn parallel_slots(
    partition: &[Gate],
    placement: &[Position],
    blockade_radius: f64,
) -> Vec<Vec<Gate>> {
    let mut slots = Vec::new();

    for layer in layers(partition) {
        let mut used = vec![false; layer.len()];
        let mut remaining = layer.len();

        while remaining > 0 {
            let mut slot: Vec<Gate> = Vec::new();
            for (k, gate) in layer.iter().enumerate() {
                if used[k] {
                    continue;
                }
                if slot.is_empty()
                    || slot
                        .iter()
                        .all(|g| compatible(g, gate, placement, blockade_radius))
                {
                    slot.push(*gate);
                    used[k] = true;
                    remaining -= 1;
                }
            }
            slots.push(slot);
        }
    }

    slots
}
