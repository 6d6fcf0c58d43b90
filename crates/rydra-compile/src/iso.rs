//! Subgraph-isomorphism oracle: VF2-style lazy enumeration of embeddings of
//! a logical interaction graph into the hardware coupling graph.
//!
//! Matching is *non-induced*: every logical edge must land on a coupling
//! edge, but coupling edges between otherwise unrelated sites are fine.
//!
//! Enumeration order is fixed and documented, because the placer's
//! first-seen-minimum tie-break depends on it: pattern vertices are matched
//! in ascending vertex-id order, and for each vertex the candidate sites are
//! tried in ascending row-major site order. Identical inputs therefore
//! always yield the identical mapping sequence.

use rydra_ir::{Position, QubitId};

use crate::coupling::CouplingGraph;
use crate::interaction::InteractionGraph;

/// Check whether a connected interaction graph is a path.
///
/// A connected graph whose edge count equals its diameter is necessarily a
/// simple path (both force the graph to be a tree of diameter `n - 1`), and
/// any grid with `Rb >= 1` contains every path that fits on it. Callers use
/// this to skip VF2 for the common chain-shaped component; the site-count
/// guard rejects paths longer than the grid can hold.
pub fn is_path_topology(h: &InteractionGraph, g: &CouplingGraph) -> bool {
    if h.node_count() > g.num_sites() {
        return false;
    }
    match h.diameter() {
        Some(d) => h.edge_count() as u32 == d,
        None => false,
    }
}

/// Decide whether `h` embeds into `g` (non-induced).
pub fn embeds(h: &InteractionGraph, g: &CouplingGraph) -> bool {
    Mappings::new(h, g).next().is_some()
}

/// Lazily enumerate all embeddings of `h` into `g`.
pub fn mappings<'a>(h: &'a InteractionGraph, g: &'a CouplingGraph) -> Mappings<'a> {
    Mappings::new(h, g)
}

/// Resumable VF2 backtracking state.
///
/// Each `next()` call resumes the search where the previous one left off and
/// yields the next complete mapping as `(qubit, site)` pairs in ascending
/// qubit order.
pub struct Mappings<'a> {
    pattern: &'a InteractionGraph,
    target: &'a CouplingGraph,
    /// Already-mapped pattern neighbors per pattern vertex, precomputed.
    mapped_neighbors: Vec<Vec<usize>>,
    /// Pattern vertex degrees, precomputed.
    degrees: Vec<usize>,
    /// Chosen target site index per pattern vertex, `usize::MAX` if unset.
    mapping: Vec<usize>,
    /// Occupied target sites.
    used: Vec<bool>,
    /// Next candidate site to try at each depth.
    cursor: Vec<usize>,
    depth: usize,
    exhausted: bool,
}

impl<'a> Mappings<'a> {
    fn new(pattern: &'a InteractionGraph, target: &'a CouplingGraph) -> Self {
        let n = pattern.node_count();
        let mapped_neighbors = (0..n).map(|d| pattern.neighbors_below(d)).collect();
        let degrees = (0..n).map(|d| pattern.degree(d)).collect();
        Self {
            pattern,
            target,
            mapped_neighbors,
            degrees,
            mapping: vec![usize::MAX; n],
            used: vec![false; target.num_sites()],
            cursor: vec![0; n],
            depth: 0,
            exhausted: n > target.num_sites(),
        }
    }

    /// Feasibility of assigning pattern vertex `d` to target site `t`.
    fn feasible(&self, d: usize, t: usize) -> bool {
        // Degree pruning: the site must support at least as many couplings
        // as the vertex demands.
        if self.target.degree(t) < self.degrees[d] {
            return false;
        }
        // Consistency: every already-mapped neighbor must sit on a coupled
        // site (non-induced, so nothing is required of non-neighbors).
        for &nb in &self.mapped_neighbors[d] {
            if !self.target.are_coupled(self.mapping[nb], t) {
                return false;
            }
        }
        // Neighborhood-count pruning: enough free coupled sites must remain
        // for the vertex's still-unmapped neighbors.
        let unmapped = self.degrees[d] - self.mapped_neighbors[d].len();
        if unmapped > 0 {
            let free = self
                .target
                .neighbors(t)
                .iter()
                .filter(|&&s| !self.used[s])
                .count();
            if free < unmapped {
                return false;
            }
        }
        true
    }

    fn backtrack(&mut self) {
        self.depth -= 1;
        let t = self.mapping[self.depth];
        self.used[t] = false;
        self.mapping[self.depth] = usize::MAX;
    }

    fn build(&self) -> Vec<(QubitId, Position)> {
        self.mapping
            .iter()
            .enumerate()
            .map(|(d, &t)| (self.pattern.qubit(d), self.target.site(t)))
            .collect()
    }
}

impl Iterator for Mappings<'_> {
    type Item = Vec<(QubitId, Position)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let n = self.mapping.len();
        if n == 0 {
            // Empty pattern embeds exactly once.
            self.exhausted = true;
            return Some(Vec::new());
        }
        let m = self.target.num_sites();

        loop {
            if self.depth == n {
                let result = self.build();
                self.backtrack();
                return Some(result);
            }

            let mut placed = false;
            let mut t = self.cursor[self.depth];
            while t < m {
                self.cursor[self.depth] = t + 1;
                if !self.used[t] && self.feasible(self.depth, t) {
                    self.mapping[self.depth] = t;
                    self.used[t] = true;
                    self.depth += 1;
                    if self.depth < n {
                        self.cursor[self.depth] = 0;
                    }
                    placed = true;
                    break;
                }
                t += 1;
            }

            if !placed {
                if self.depth == 0 {
                    self.exhausted = true;
                    return None;
                }
                self.backtrack();
            }
        }
    }
}
