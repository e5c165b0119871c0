use std::collections::{HashMap, HashSet};

/// Undirected edge between two vertex labels.
pub type Edge = (usize, usize);

/// Immutable undirected graph with a fixed vertex order.
///
/// Vertex order: explicitly listed vertices first, then endpoints in order of
/// first appearance in the edge list. Repeated pairs (in either orientation)
/// collapse into one edge. Self-loops are stored as given; the Laplacian stage
/// rejects them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    vertices: Vec<usize>,
    edges: Vec<Edge>,
    index: HashMap<usize, usize>,
}

impl Graph {
    /// Graph whose vertex set is exactly the set of edge endpoints.
    pub fn from_edges(edges: &[Edge]) -> Self {
        Self::with_vertices(&[], edges)
    }

    /// Graph with an explicit vertex list (which may include isolated vertices).
    pub fn with_vertices(vertices: &[usize], edges: &[Edge]) -> Self {
        let mut order = Vec::with_capacity(vertices.len() + 2 * edges.len());
        let mut index = HashMap::new();
        let mut push = |v: usize, order: &mut Vec<usize>| {
            if !index.contains_key(&v) {
                index.insert(v, order.len());
                order.push(v);
            }
        };
        for &v in vertices {
            push(v, &mut order);
        }
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(edges.len());
        for &(a, b) in edges {
            push(a, &mut order);
            push(b, &mut order);
            if seen.insert((a.min(b), a.max(b))) {
                kept.push((a, b));
            }
        }
        Self {
            vertices: order,
            edges: kept,
            index,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Vertex labels in matrix order.
    #[inline]
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Edges as given (after de-duplication), in labels.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edges as `(row, col)` matrix indices.
    pub fn edge_indices(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges
            .iter()
            .map(move |&(a, b)| (self.index[&a], self.index[&b]))
    }

    /// Degree of every vertex in matrix order. A self-loop contributes 2.
    pub fn degrees(&self) -> Vec<usize> {
        let mut deg = vec![0usize; self.vertices.len()];
        for (i, j) in self.edge_indices() {
            deg[i] += 1;
            deg[j] += 1;
        }
        deg
    }

    /// `(label, degree)` pairs in matrix order.
    pub fn degree_sequence(&self) -> Vec<(usize, usize)> {
        self.vertices
            .iter()
            .copied()
            .zip(self.degrees())
            .collect()
    }

    /// Cycle rank `e - v + 1` (first Betti number for a connected graph).
    #[inline]
    pub fn cycle_rank(&self) -> i64 {
        self.edges.len() as i64 - self.vertices.len() as i64 + 1
    }

    /// Connectivity via union-find over the edge list.
    pub fn is_connected(&self) -> bool {
        let n = self.vertices.len();
        if n == 0 {
            return false;
        }
        let mut parent: Vec<usize> = (0..n).collect();
        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }
        let mut components = n;
        for (i, j) in self.edge_indices() {
            let (ri, rj) = (find(&mut parent, i), find(&mut parent, j));
            if ri != rj {
                parent[ri] = rj;
                components -= 1;
            }
        }
        components == 1
    }
}
