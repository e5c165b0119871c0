//! Random connected simple graphs (spanning tree + extra edges).
//!
//! Purpose
//! - Feed property tests and benches with reproducible connected graphs of
//!   bounded size, so spectral invariants are checked beyond the two presets.
//!
//! Model
//! - Vertex `i > 0` attaches to a uniformly drawn earlier vertex (random
//!   spanning tree, hence connected), then each remaining pair is added with
//!   probability `extra_edge_prob`.
//! - Determinism: a single `StdRng` seeded from `seed`.

use super::types::{Edge, Graph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Upper bound on the vertex count of sampled graphs.
pub const MAX_RANDOM_VERTICES: usize = 16;

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct RandomGraphCfg {
    /// Vertex count, clamped to `[2, MAX_RANDOM_VERTICES]`.
    pub vertices: usize,
    /// Probability of each non-tree edge. Clamped to `[0, 1]`.
    pub extra_edge_prob: f64,
}

impl Default for RandomGraphCfg {
    fn default() -> Self {
        Self {
            vertices: 8,
            extra_edge_prob: 0.2,
        }
    }
}

/// Draw a connected simple graph with vertices `0..n`.
pub fn random_connected(cfg: RandomGraphCfg, seed: u64) -> Graph {
    let n = cfg.vertices.clamp(2, MAX_RANDOM_VERTICES);
    let p = if cfg.extra_edge_prob.is_finite() {
        cfg.extra_edge_prob.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let mut tree: Vec<Edge> = Vec::with_capacity(n - 1);
    for i in 1..n {
        tree.push((rng.gen_range(0..i), i));
    }
    let mut edges = tree.clone();
    for i in 0..n {
        for j in (i + 1)..n {
            let in_tree = tree.iter().any(|&(a, b)| (a, b) == (i, j) || (a, b) == (j, i));
            if !in_tree && rng.gen_bool(p) {
                edges.push((i, j));
            }
        }
    }
    let vertices: Vec<usize> = (0..n).collect();
    Graph::with_vertices(&vertices, &edges)
}
