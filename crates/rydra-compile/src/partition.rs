//! Greedy partitioning of layered gate lists into embeddable stages.

use rustc_hash::FxHashSet;
use tracing::debug;

use rydra_ir::{Gate, QubitId};

use crate::coupling::CouplingGraph;
use crate::interaction::InteractionGraph;
use crate::iso;

/// Check that every connected component of a gate set's interaction graph
/// embeds into the coupling graph.
///
/// Components embed or fail independently, so testing them separately is
/// both correct and much cheaper than one monolithic VF2 call. Chain-shaped
/// components skip VF2 entirely via the path fast-path.
fn embeds_per_component(gates: &[Gate], graph: &CouplingGraph) -> bool {
    let full = InteractionGraph::from_gates(gates);
    for component in full.components() {
        let members: FxHashSet<QubitId> = component.iter().copied().collect();
        let component_gates: Vec<Gate> = gates
            .iter()
            .filter(|g| members.contains(&g.a))
            .copied()
            .collect();
        let h = InteractionGraph::from_gates(&component_gates);
        if iso::is_path_topology(&h, graph) {
            continue;
        }
        if !iso::embeds(&h, graph) {
            return false;
        }
    }
    true
}

/// Merge consecutive layers into maximal embeddable partitions.
///
/// A cursor walks the layers; each probe extends the cumulative gate set by
/// one layer and keeps going while the set still embeds. The first failing
/// extension commits the accumulated prefix as a partition and restarts the
/// probe there. The concatenation of the returned partitions is exactly the
/// concatenation of the input layers.
///
/// A single layer the grid cannot host is committed on its own rather than
/// as an empty partition; the placer reacts by extending the grid.
pub fn partition_layers(layers: &[Vec<Gate>], graph: &CouplingGraph) -> Vec<Vec<Gate>> {
    let mut partitions: Vec<Vec<Gate>> = Vec::new();
    let mut last = 0;

    while last < layers.len() {
        let mut i = last;
        while i < layers.len() {
            let cumulative = layers[last..=i].concat();
            if embeds_per_component(&cumulative, graph) {
                i += 1;
            } else {
                break;
            }
        }

        if i == last {
            debug!(
                layer = last,
                "layer does not embed on its own; committing it for grid extension"
            );
            partitions.push(layers[last].clone());
            last += 1;
        } else {
            partitions.push(layers[last..i].concat());
            last = i;
        }
    }

    debug!(
        partitions = partitions.len(),
        layers = layers.len(),
        "partitioning complete"
    );
    partitions
}
