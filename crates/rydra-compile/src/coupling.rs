//! Hardware coupling graph for neutral-atom grids.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;

use rydra_ir::Position;

/// The hardware coupling graph of a square atom array.
///
/// Vertices are the `side * side` grid sites; an edge connects every pair of
/// sites within Euclidean distance `radius` (the Rydberg interaction radius
/// `Rb`). Long-range edges are what distinguish this from a plain grid graph:
/// with `Rb = 2` a site in the bulk reaches twelve neighbors, not four, which
/// admits denser embeddings and fewer partitions.
///
/// Sites iterate in row-major order (lexicographic by `(x, y)`), and
/// adjacency lists are kept sorted, so every traversal of the graph is
/// deterministic.
///
/// ## Performance
///
/// On construction an all-pairs hop-distance matrix is precomputed with BFS
/// from each site. This makes the completer's nearest-free-site queries O(1)
/// per candidate instead of a BFS per query.
#[derive(Debug, Clone)]
pub struct CouplingGraph {
    /// Grid side length.
    side: u32,
    /// Interaction radius in grid units.
    radius: f64,
    /// All sites in row-major order.
    sites: Vec<Position>,
    /// Site -> index into `sites`.
    index: FxHashMap<Position, usize>,
    /// Edge list with `a < b` by site index.
    edges: Vec<(usize, usize)>,
    /// Sorted adjacency lists.
    adjacency: Vec<Vec<usize>>,
    /// `dist_matrix[a][b]` is the hop distance, `u32::MAX` if unreachable.
    dist_matrix: Vec<Vec<u32>>,
}

impl CouplingGraph {
    /// Build the coupling graph for a `side x side` array with interaction
    /// radius `radius`.
    pub fn new(side: u32, radius: f64) -> Self {
        let n = (side as usize) * (side as usize);
        let mut sites = Vec::with_capacity(n);
        let mut index = FxHashMap::default();
        for x in 0..side {
            for y in 0..side {
                let p = Position::new(x, y);
                index.insert(p, sites.len());
                sites.push(p);
            }
        }

        let mut edges = Vec::new();
        let mut adjacency = vec![Vec::new(); n];
        for a in 0..n {
            for b in (a + 1)..n {
                let d = sites[a].distance_to(&sites[b]);
                if d > 0.0 && d <= radius {
                    edges.push((a, b));
                    adjacency[a].push(b);
                    adjacency[b].push(a);
                }
            }
        }
        // Inner loops emit neighbors in ascending order already; keep the
        // invariant explicit for the `b < a` half.
        for list in &mut adjacency {
            list.sort_unstable();
        }

        let mut graph = Self {
            side,
            radius,
            sites,
            index,
            edges,
            adjacency,
            dist_matrix: Vec::new(),
        };
        graph.precompute_distances();
        graph
    }

    /// Build the graph this one extends to: side `n + 1`, same radius.
    ///
    /// Extension produces a fresh value; the pipeline rebinds its current
    /// graph rather than mutating in place, so earlier partitions keep
    /// referring to coordinates that remain valid in the larger grid.
    pub fn extended(&self) -> Self {
        Self::new(self.side + 1, self.radius)
    }

    /// All-pairs BFS over the adjacency lists.
    fn precompute_distances(&mut self) {
        let n = self.sites.len();
        self.dist_matrix = vec![vec![u32::MAX; n]; n];

        for src in 0..n {
            self.dist_matrix[src][src] = 0;
            let mut queue = VecDeque::new();
            queue.push_back(src);

            while let Some(current) = queue.pop_front() {
                for &neighbor in &self.adjacency[current] {
                    if self.dist_matrix[src][neighbor] == u32::MAX {
                        self.dist_matrix[src][neighbor] = self.dist_matrix[src][current] + 1;
                        queue.push_back(neighbor);
                    }
                }
            }
        }
    }

    /// Grid side length.
    #[inline]
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Interaction radius.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Number of sites.
    #[inline]
    pub fn num_sites(&self) -> usize {
        self.sites.len()
    }

    /// Sites in row-major order.
    pub fn sites(&self) -> &[Position] {
        &self.sites
    }

    /// The site at a given index.
    #[inline]
    pub fn site(&self, idx: usize) -> Position {
        self.sites[idx]
    }

    /// Index of a site, if it lies on this grid.
    #[inline]
    pub fn site_index(&self, p: Position) -> Option<usize> {
        self.index.get(&p).copied()
    }

    /// Check whether two site indices are coupled.
    pub fn are_coupled(&self, a: usize, b: usize) -> bool {
        self.adjacency[a].binary_search(&b).is_ok()
    }

    /// Check whether two sites are coupled.
    pub fn is_edge(&self, p: Position, q: Position) -> bool {
        match (self.site_index(p), self.site_index(q)) {
            (Some(a), Some(b)) => self.are_coupled(a, b),
            _ => false,
        }
    }

    /// Sorted neighbors of a site index.
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        &self.adjacency[idx]
    }

    /// Degree of a site index.
    #[inline]
    pub fn degree(&self, idx: usize) -> usize {
        self.adjacency[idx].len()
    }

    /// Number of coupling edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Hop distance between two sites, `None` if either is off-grid or
    /// unreachable.
    pub fn hop_distance(&self, p: Position, q: Position) -> Option<u32> {
        let a = self.site_index(p)?;
        let b = self.site_index(q)?;
        let d = self.dist_matrix[a][b];
        (d != u32::MAX).then_some(d)
    }

    /// Edge list as position pairs, each pair ordered and the list sorted.
    ///
    /// Listing edges this way is idempotent: rebuilding a graph with the same
    /// `(side, radius)` yields the identical listing.
    pub fn sorted_edges(&self) -> Vec<(Position, Position)> {
        let mut out: Vec<(Position, Position)> = self
            .edges
            .iter()
            .map(|&(a, b)| {
                let (p, q) = (self.sites[a], self.sites[b]);
                if p <= q { (p, q) } else { (q, p) }
            })
            .collect();
        out.sort_unstable();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_radius_is_plain_grid() {
        let g = CouplingGraph::new(3, 1.0);
        assert_eq!(g.num_sites(), 9);
        // 2 * n * (n - 1) orthogonal edges on an n x n grid.
        assert_eq!(g.num_edges(), 12);
        assert!(g.is_edge(Position::new(0, 0), Position::new(0, 1)));
        assert!(!g.is_edge(Position::new(0, 0), Position::new(1, 1)));
    }

    #[test]
    fn test_radius_two_reaches_diagonals_and_knights() {
        let g = CouplingGraph::new(3, 2.0);
        let origin = Position::new(0, 0);
        assert!(g.is_edge(origin, Position::new(1, 1))); // sqrt(2)
        assert!(g.is_edge(origin, Position::new(0, 2))); // 2
        assert!(!g.is_edge(origin, Position::new(2, 1))); // sqrt(5)
        assert!(!g.is_edge(origin, origin)); // loop-free
    }

    #[test]
    fn test_center_degree() {
        let g = CouplingGraph::new(3, 2.0);
        let center = g.site_index(Position::new(1, 1)).unwrap();
        // Every other site of the 3x3 array is within 2 of the center.
        assert_eq!(g.degree(center), 8);
    }

    #[test]
    fn test_hop_distance() {
        let g = CouplingGraph::new(3, 1.0);
        assert_eq!(
            g.hop_distance(Position::new(0, 0), Position::new(2, 2)),
            Some(4)
        );
        assert_eq!(
            g.hop_distance(Position::new(0, 0), Position::new(0, 0)),
            Some(0)
        );
        assert_eq!(g.hop_distance(Position::new(0, 0), Position::new(5, 5)), None);
    }

    #[test]
    fn test_sorted_edges_idempotent() {
        let a = CouplingGraph::new(4, 2.0).sorted_edges();
        let b = CouplingGraph::new(4, 2.0).sorted_edges();
        assert_eq!(a, b);
        assert!(a.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_extension_grows_by_one() {
        let g = CouplingGraph::new(3, 1.5);
        let bigger = g.extended();
        assert_eq!(bigger.side(), 4);
        assert_eq!(bigger.radius(), 1.5);
        assert_eq!(bigger.extended().side(), 5);
    }

    #[test]
    fn test_site_order_is_row_major() {
        let g = CouplingGraph::new(2, 1.0);
        let sites: Vec<Position> = g.sites().to_vec();
        assert_eq!(
            sites,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1),
            ]
        );
    }
}
