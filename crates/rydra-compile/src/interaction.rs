//! Logical interaction graphs derived from gate lists.

use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use rustc_hash::FxHashMap;
use std::collections::VecDeque;

use rydra_ir::{Gate, QubitId};

/// The simple undirected graph induced by a gate list: one vertex per
/// participating qubit, one edge per distinct interacting pair.
///
/// Repeated gates collapse to a single edge; qubits that appear in no gate
/// of the list have no vertex here (the completer deals with them later).
/// Vertices are created in ascending qubit order, so node index `i` is the
/// `i`-th smallest participating qubit and every iteration over the graph is
/// deterministic.
#[derive(Debug, Clone)]
pub struct InteractionGraph {
    graph: UnGraph<QubitId, ()>,
    index: FxHashMap<QubitId, NodeIndex>,
}

impl InteractionGraph {
    /// Build the interaction graph of a gate list.
    pub fn from_gates(gates: &[Gate]) -> Self {
        let mut qubits: Vec<QubitId> = gates.iter().flat_map(|g| g.qubits()).collect();
        qubits.sort_unstable();
        qubits.dedup();

        let mut graph = UnGraph::default();
        let mut index = FxHashMap::default();
        for q in qubits {
            index.insert(q, graph.add_node(q));
        }
        for gate in gates {
            let a = index[&gate.a];
            let b = index[&gate.b];
            graph.update_edge(a, b, ());
        }

        Self { graph, index }
    }

    /// Number of vertices.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The qubit at a node index.
    #[inline]
    pub fn qubit(&self, idx: usize) -> QubitId {
        self.graph[NodeIndex::new(idx)]
    }

    /// Participating qubits in ascending order.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.graph.node_indices().map(|i| self.graph[i])
    }

    /// Degree of a node index.
    pub fn degree(&self, idx: usize) -> usize {
        self.graph.neighbors(NodeIndex::new(idx)).count()
    }

    /// Neighbor node indices of `idx` that are smaller than `idx`.
    ///
    /// The VF2 enumerator matches vertices in ascending index order, so these
    /// are exactly the already-mapped neighbors when `idx` is being matched.
    pub fn neighbors_below(&self, idx: usize) -> Vec<usize> {
        let mut below: Vec<usize> = self
            .graph
            .neighbors(NodeIndex::new(idx))
            .map(NodeIndex::index)
            .filter(|&n| n < idx)
            .collect();
        below.sort_unstable();
        below
    }

    /// Check adjacency of two node indices.
    pub fn adjacent(&self, a: usize, b: usize) -> bool {
        self.graph
            .find_edge(NodeIndex::new(a), NodeIndex::new(b))
            .is_some()
    }

    /// Connected components as qubit sets, each sorted ascending, components
    /// ordered by their smallest member.
    pub fn components(&self) -> Vec<Vec<QubitId>> {
        let n = self.graph.node_count();
        let mut uf = UnionFind::new(n);
        for edge in self.graph.edge_indices() {
            let (a, b) = self.graph.edge_endpoints(edge).expect("edge exists");
            uf.union(a.index(), b.index());
        }

        let mut groups: FxHashMap<usize, Vec<QubitId>> = FxHashMap::default();
        for idx in 0..n {
            groups
                .entry(uf.find(idx))
                .or_default()
                .push(self.graph[NodeIndex::new(idx)]);
        }

        let mut components: Vec<Vec<QubitId>> = groups.into_values().collect();
        // Members are pushed in ascending node order, so each component is
        // already sorted; order the components themselves.
        components.sort_unstable_by_key(|c| c[0]);
        components
    }

    /// Graph diameter in hops, `None` when disconnected or empty.
    pub fn diameter(&self) -> Option<u32> {
        let n = self.graph.node_count();
        if n == 0 {
            return None;
        }

        let mut max = 0u32;
        for src in 0..n {
            let mut dist = vec![u32::MAX; n];
            dist[src] = 0;
            let mut queue = VecDeque::new();
            queue.push_back(src);
            while let Some(cur) = queue.pop_front() {
                for nb in self.graph.neighbors(NodeIndex::new(cur)) {
                    if dist[nb.index()] == u32::MAX {
                        dist[nb.index()] = dist[cur] + 1;
                        queue.push_back(nb.index());
                    }
                }
            }
            for &d in &dist {
                if d == u32::MAX {
                    return None;
                }
                max = max.max(d);
            }
        }
        Some(max)
    }
}
