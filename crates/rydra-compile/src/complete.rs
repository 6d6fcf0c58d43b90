//! Completion of partial embeddings into total bijections.
//!
//! The placer only positions qubits that interact within a partition; every
//! other atom still sits somewhere on the grid and must get a distinct site.
//! Reuse heuristics keep idle atoms where they already are (or where they
//! are about to be needed), so the inter-stage router has less to move.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;
use tracing::debug;

use rydra_ir::Position;

use crate::coupling::CouplingGraph;
use crate::error::{CompileError, CompileResult};

/// Pick the free site closest (in hop distance) to `anchor`, if any is
/// reachable. Ties break to the earliest site in row-major order.
fn nearest_free(anchor: Position, free: &[Position], graph: &CouplingGraph) -> Option<usize> {
    let mut best: Option<(u32, usize)> = None;
    for (idx, &site) in free.iter().enumerate() {
        let Some(d) = graph.hop_distance(anchor, site) else {
            continue;
        };
        if best.is_none_or(|(best_d, _)| d < best_d) {
            best = Some((d, idx));
        }
    }
    best.map(|(_, idx)| idx)
}

/// Fill every unassigned qubit of every embedding from `start` onward,
/// yielding total bijections onto distinct sites of `graph`.
///
/// For each unassigned qubit, in order: reuse its previous site if free,
/// else its next future site if free, else the free site nearest its
/// previous (or, for the first partition, its next future) site, else a
/// seeded-random free site. Runs against the final, possibly extended grid,
/// so sites assigned here always exist.
pub fn complete_embeddings(
    embeddings: &mut [Vec<Option<Position>>],
    graph: &CouplingGraph,
    start: usize,
    seed: u64,
) -> CompileResult<()> {
    let mut rng = StdRng::seed_from_u64(seed);

    for i in start..embeddings.len() {
        let unassigned: Vec<usize> = embeddings[i]
            .iter()
            .enumerate()
            .filter_map(|(q, p)| p.is_none().then_some(q))
            .collect();
        if unassigned.is_empty() {
            continue;
        }

        let occupied: FxHashSet<Position> = embeddings[i].iter().flatten().copied().collect();
        let mut free: Vec<Position> = graph
            .sites()
            .iter()
            .copied()
            .filter(|p| !occupied.contains(p))
            .collect();

        for q in unassigned {
            if free.is_empty() {
                return Err(CompileError::PlacementInfeasible { partition: i });
            }

            let previous = (i > 0).then(|| embeddings[i - 1][q]).flatten();

            // Backward reuse: the qubit's previous site, if still free.
            let mut chosen = previous.and_then(|p| free.iter().position(|&f| f == p));

            // Forward reuse: the first future partition that places this
            // qubit on a currently-free site.
            if chosen.is_none() {
                for j in (i + 1)..embeddings.len() {
                    if let Some(p) = embeddings[j][q] {
                        if let Some(idx) = free.iter().position(|&f| f == p) {
                            chosen = Some(idx);
                            break;
                        }
                    }
                }
            }

            // Nearest free site to where the qubit was.
            if chosen.is_none() {
                if let Some(p) = previous {
                    chosen = nearest_free(p, &free, graph);
                } else {
                    // First partition: anchor on where the qubit will be.
                    for j in (i + 1)..embeddings.len() {
                        if let Some(p) = embeddings[j][q] {
                            chosen = nearest_free(p, &free, graph);
                            break;
                        }
                    }
                }
            }

            // Seeded-random fallback for qubits with no history at all.
            let idx = match chosen {
                Some(idx) => idx,
                None => rng.gen_range(0..free.len()),
            };
            // Plain remove keeps `free` in row-major order for later
            // nearest-site tie-breaks.
            embeddings[i][q] = Some(free.remove(idx));
        }

        debug!(partition = i, "embedding completed");
    }

    Ok(())
}
