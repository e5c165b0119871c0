//! Adjacency, degree, Laplacian and normalized Laplacian of a `Graph`.
//!
//! Definitions (rows/columns in `Graph::vertices()` order)
//! - `A[i][j] = 1` iff `{i, j}` is an edge; `D = diag(row sums of A)`.
//! - `L = D - A`.
//! - `L̄[i][i] = 1`, `L̄[i][j] = -1/√(d_i d_j)` for adjacent `i, j`, else 0.
//!
//! `L̄` is assembled entrywise, checked against `SpectralCfg::eps_symmetry`,
//! then symmetrized so downstream symmetric solvers see an exactly symmetric
//! matrix.

use std::fmt;

use nalgebra::DMatrix;

use crate::cfg::SpectralCfg;
use crate::graph::Graph;

/// Matrices derived from one graph.
#[derive(Clone, Debug)]
pub struct LaplacianMatrices {
    pub adjacency: DMatrix<f64>,
    pub degree: DMatrix<f64>,
    pub laplacian: DMatrix<f64>,
    pub normalized: DMatrix<f64>,
}

/// Malformed-graph errors.
#[derive(Debug, Clone, PartialEq)]
pub enum LaplacianError {
    /// Graph without vertices.
    Empty,
    /// Edge from a vertex to itself.
    SelfLoop { vertex: usize },
    /// Degree-zero vertex (normalization would divide by zero).
    IsolatedVertex { vertex: usize },
    /// `max |L̄ - L̄ᵀ|` exceeded the tolerance.
    Asymmetric { max_deviation: f64 },
}

impl fmt::Display for LaplacianError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaplacianError::Empty => write!(f, "graph has no vertices"),
            LaplacianError::SelfLoop { vertex } => {
                write!(f, "graph has a self-loop at vertex {vertex}")
            }
            LaplacianError::IsolatedVertex { vertex } => {
                write!(f, "graph has isolated vertex {vertex}")
            }
            LaplacianError::Asymmetric { max_deviation } => write!(
                f,
                "normalized Laplacian is not symmetric (max deviation {max_deviation:e})"
            ),
        }
    }
}

impl std::error::Error for LaplacianError {}

/// Build `A`, `D`, `L`, `L̄` for `graph`.
pub fn laplacian_matrices(
    graph: &Graph,
    cfg: &SpectralCfg,
) -> Result<LaplacianMatrices, LaplacianError> {
    let n = graph.vertex_count();
    if n == 0 {
        return Err(LaplacianError::Empty);
    }
    let mut adjacency = DMatrix::<f64>::zeros(n, n);
    for (i, j) in graph.edge_indices() {
        if i == j {
            return Err(LaplacianError::SelfLoop {
                vertex: graph.vertices()[i],
            });
        }
        adjacency[(i, j)] = 1.0;
        adjacency[(j, i)] = 1.0;
    }

    let deg: Vec<f64> = adjacency.row_iter().map(|r| r.sum()).collect();
    if let Some(k) = deg.iter().position(|&d| d < 1.0) {
        return Err(LaplacianError::IsolatedVertex {
            vertex: graph.vertices()[k],
        });
    }
    let degree = DMatrix::from_diagonal(&nalgebra::DVector::from_vec(deg.clone()));
    let laplacian = &degree - &adjacency;

    let mut normalized = DMatrix::<f64>::identity(n, n);
    for i in 0..n {
        for j in 0..n {
            if i != j && adjacency[(i, j)] != 0.0 {
                normalized[(i, j)] = -1.0 / (deg[i] * deg[j]).sqrt();
            }
        }
    }
    let transpose = normalized.transpose();
    let max_deviation = (&normalized - &transpose).amax();
    if max_deviation > cfg.eps_symmetry {
        return Err(LaplacianError::Asymmetric { max_deviation });
    }
    let normalized = (normalized + transpose) * 0.5;

    Ok(LaplacianMatrices {
        adjacency,
        degree,
        laplacian,
        normalized,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Topology;

    #[test]
    fn theta_matrices_match_definitions() {
        let g = Topology::theta().build_graph();
        let m = laplacian_matrices(&g, &SpectralCfg::default()).unwrap();
        assert_eq!(m.adjacency[(0, 1)], 1.0);
        assert_eq!(m.adjacency[(6, 3)], 1.0);
        assert_eq!(m.adjacency[(0, 2)], 0.0);
        assert_eq!(m.degree[(1, 1)], 3.0);
        assert_eq!(m.degree[(0, 0)], 2.0);
        assert_eq!(m.degree[(0, 1)], 0.0);
        assert_eq!(m.laplacian[(1, 1)], 3.0);
        assert_eq!(m.laplacian[(1, 2)], -1.0);
        // Laplacian rows sum to zero.
        for r in m.laplacian.row_iter() {
            assert!(r.sum().abs() < 1e-12);
        }
        // L̄[0][1] = -1/√(2·3)
        assert!((m.normalized[(0, 1)] + 1.0 / 6f64.sqrt()).abs() < 1e-15);
        assert!((m.normalized[(6, 1)] + 1.0 / 3.0).abs() < 1e-15);
        assert_eq!(m.normalized[(4, 4)], 1.0);
        assert_eq!(m.normalized, m.normalized.transpose());
    }

    #[test]
    fn isolated_vertex_is_rejected() {
        let g = Graph::with_vertices(&[0, 1, 2, 7], &[(0, 1), (1, 2)]);
        let err = laplacian_matrices(&g, &SpectralCfg::default()).unwrap_err();
        assert_eq!(err, LaplacianError::IsolatedVertex { vertex: 7 });
        assert!(err.to_string().contains("isolated vertex"));
    }

    #[test]
    fn self_loop_and_empty_are_rejected() {
        let g = Graph::from_edges(&[(0, 1), (1, 1)]);
        assert_eq!(
            laplacian_matrices(&g, &SpectralCfg::default()).unwrap_err(),
            LaplacianError::SelfLoop { vertex: 1 }
        );
        let empty = Graph::from_edges(&[]);
        assert_eq!(
            laplacian_matrices(&empty, &SpectralCfg::default()).unwrap_err(),
            LaplacianError::Empty
        );
    }
}
