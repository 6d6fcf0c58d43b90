//! Inertial VF2 placement: one embedding per partition, biased toward the
//! previous partition's layout.

use rustc_hash::FxHashSet;
use tracing::{debug, info};

use rydra_ir::{Gate, Position, QubitId};

use crate::config::Config;
use crate::coupling::CouplingGraph;
use crate::error::{CompileError, CompileResult};
use crate::interaction::InteractionGraph;
use crate::iso;

/// A candidate below this weighted movement cost is a perfect reuse of the
/// previous layout; enumeration stops immediately.
const PERFECT_REUSE_EPS: f64 = 1e-6;

/// Result of placing every partition.
#[derive(Debug)]
pub struct PlacementOutcome {
    /// One embedding per partition; qubits absent from a partition's gates
    /// are unassigned until the completer runs.
    pub embeddings: Vec<Vec<Option<Position>>>,
    /// The coupling graph in effect after placement (possibly extended).
    pub graph: CouplingGraph,
    /// Partition indices at which the grid was enlarged.
    pub extended_at: Vec<usize>,
}

/// Weighted Euclidean movement cost of a candidate mapping against the
/// previous embedding.
///
/// Qubits that participate in a gate of the current partition weigh `1.0`;
/// idle qubits weigh `idle_weight`. Qubits unassigned in the previous
/// embedding contribute nothing.
pub fn movement_cost(
    candidate: &[(QubitId, Position)],
    previous: &[Option<Position>],
    active: &FxHashSet<QubitId>,
    idle_weight: f64,
) -> f64 {
    let mut cost = 0.0;
    for &(q, pos) in candidate {
        let Some(Some(prev)) = previous.get(q.index()) else {
            continue;
        };
        let weight = if active.contains(&q) { 1.0 } else { idle_weight };
        cost += weight * pos.distance_to(prev);
    }
    cost
}

/// Examine up to `max_candidates` VF2 mappings and keep the cheapest.
///
/// Ties break to the first candidate seen, which the documented enumeration
/// order makes deterministic. Returns `None` only when the enumeration is
/// empty.
fn select_inertial(
    candidates: iso::Mappings<'_>,
    previous: &[Option<Position>],
    gates: &[Gate],
    config: &Config,
) -> Option<Vec<(QubitId, Position)>> {
    let active: FxHashSet<QubitId> = gates.iter().flat_map(|g| g.qubits()).collect();

    let mut best: Option<(f64, Vec<(QubitId, Position)>)> = None;
    for candidate in candidates.take(config.max_candidates) {
        let cost = movement_cost(&candidate, previous, &active, config.idle_weight);
        let better = match &best {
            Some((best_cost, _)) => cost < *best_cost,
            None => true,
        };
        if better {
            best = Some((cost, candidate));
        }
        if best.as_ref().is_some_and(|(c, _)| *c < PERFECT_REUSE_EPS) {
            break;
        }
    }
    best.map(|(_, candidate)| candidate)
}

fn to_embedding(pairs: &[(QubitId, Position)], num_qubits: usize) -> Vec<Option<Position>> {
    let mut embedding = vec![None; num_qubits];
    for &(q, p) in pairs {
        embedding[q.index()] = Some(p);
    }
    embedding
}

/// Produce one embedding per partition, extending the grid when a partition
/// does not fit.
///
/// The first partition (or every partition, with `optimize_movement` off)
/// takes the first VF2 mapping; later partitions take the candidate that
/// minimizes weighted movement from the previous embedding. When
/// `initial_mapping` is configured it becomes partition 0's embedding
/// verbatim and placement starts at partition 1.
pub fn place_partitions(
    partitions: &[Vec<Gate>],
    graph: CouplingGraph,
    num_qubits: usize,
    config: &Config,
) -> CompileResult<PlacementOutcome> {
    let mut graph = graph;
    let mut embeddings: Vec<Vec<Option<Position>>> = Vec::with_capacity(partitions.len());
    let mut extended_at = Vec::new();

    if partitions.is_empty() {
        return Ok(PlacementOutcome {
            embeddings,
            graph,
            extended_at,
        });
    }

    let start = match &config.initial_mapping {
        Some(initial) => {
            embeddings.push(initial.iter().copied().map(Some).collect());
            1
        }
        None => 0,
    };

    for (i, partition) in partitions.iter().enumerate().skip(start) {
        let h = InteractionGraph::from_gates(partition);

        if !iso::embeds(&h, &graph) {
            graph = graph.extended();
            extended_at.push(i);
            info!(
                partition = i,
                side = graph.side(),
                "partition did not embed; grid extended"
            );
        }

        let mut candidates = iso::mappings(&h, &graph);
        let chosen = if config.optimize_movement && i > 0 {
            select_inertial(candidates, &embeddings[i - 1], partition, config)
        } else {
            candidates.next()
        };

        let pairs = chosen.ok_or(CompileError::EmbeddingExhausted { partition: i })?;
        debug!(partition = i, qubits = pairs.len(), "partition placed");
        embeddings.push(to_embedding(&pairs, num_qubits));
    }

    Ok(PlacementOutcome {
        embeddings,
        graph,
        extended_at,
    })
}
