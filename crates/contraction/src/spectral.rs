//! Spectrum and pseudoinverse trace of the normalized Laplacian.
//!
//! Two independent routes to `Tr(L̄†)` are computed and must agree:
//! - direct: trace of the SVD-based Moore–Penrose pseudoinverse;
//! - spectral: `Σ 1/λ` over eigenvalues with `|λ| > eps_zero`, from the
//!   symmetric eigen-solver.
//!
//! A connected graph has exactly one kernel eigenvalue; any other count means
//! the graph is disconnected or malformed and is reported, never masked.

use std::fmt;

use nalgebra::{DMatrix, SymmetricEigen, SVD};

use crate::cfg::SpectralCfg;

/// Spectral data of `L̄`.
#[derive(Clone, Debug)]
pub struct Spectrum {
    /// Eigenvalues, ascending.
    pub eigenvalues: Vec<f64>,
    pub pseudoinverse: DMatrix<f64>,
    /// `Tr(L̄†)` from the pseudoinverse.
    pub trace: f64,
    /// `Σ 1/λ` over the nonzero eigenvalues.
    pub trace_from_eigenvalues: f64,
    pub nonzero_count: usize,
}

impl Spectrum {
    #[inline]
    pub fn trace_deviation(&self) -> f64 {
        (self.trace - self.trace_from_eigenvalues).abs()
    }
}

/// Malformed-graph and computation-integrity errors of the spectral stage.
#[derive(Debug, Clone, PartialEq)]
pub enum SpectralError {
    /// Input is not square.
    NotSquare { rows: usize, cols: usize },
    /// The symmetric eigen-solver did not converge.
    EigenNoConvergence,
    /// The SVD behind the pseudoinverse did not converge.
    PseudoinverseFailed { reason: String },
    /// Number of eigenvalues below `eps_zero` differs from one.
    KernelDimension { zero_eigenvalues: usize },
    /// Eigenvalue outside `[0, 2]` beyond tolerance.
    OutOfRange { eigenvalue: f64 },
    /// The two trace routes disagree beyond `trace_tol`.
    TraceMismatch { direct: f64, spectral: f64 },
}

impl fmt::Display for SpectralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpectralError::NotSquare { rows, cols } => {
                write!(f, "matrix is not square ({rows}x{cols})")
            }
            SpectralError::EigenNoConvergence => {
                write!(f, "symmetric eigen-decomposition did not converge")
            }
            SpectralError::PseudoinverseFailed { reason } => {
                write!(f, "pseudoinverse failed: {reason}")
            }
            SpectralError::KernelDimension { zero_eigenvalues } => write!(
                f,
                "expected exactly one zero eigenvalue, found {zero_eigenvalues} (graph disconnected or malformed)"
            ),
            SpectralError::OutOfRange { eigenvalue } => write!(
                f,
                "normalized Laplacian eigenvalue {eigenvalue} lies outside [0, 2]"
            ),
            SpectralError::TraceMismatch { direct, spectral } => write!(
                f,
                "pseudoinverse trace {direct:.12} disagrees with eigenvalue sum {spectral:.12}"
            ),
        }
    }
}

impl std::error::Error for SpectralError {}

/// Spectrum, pseudoinverse and cross-checked trace of a normalized Laplacian.
pub fn analyze_spectrum(
    normalized: &DMatrix<f64>,
    cfg: &SpectralCfg,
) -> Result<Spectrum, SpectralError> {
    let (rows, cols) = normalized.shape();
    if rows != cols {
        return Err(SpectralError::NotSquare { rows, cols });
    }

    let eigen = SymmetricEigen::try_new(normalized.clone(), f64::EPSILON, 0)
        .ok_or(SpectralError::EigenNoConvergence)?;
    let mut eigenvalues: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
    eigenvalues.sort_by(|a, b| a.total_cmp(b));

    if let Some(&bad) = eigenvalues
        .iter()
        .find(|&&l| l < -cfg.range_tol || l > 2.0 + cfg.range_tol)
    {
        return Err(SpectralError::OutOfRange { eigenvalue: bad });
    }
    let zero_eigenvalues = eigenvalues
        .iter()
        .filter(|l| l.abs() <= cfg.eps_zero)
        .count();
    if zero_eigenvalues != 1 {
        return Err(SpectralError::KernelDimension { zero_eigenvalues });
    }

    let pseudoinverse = pseudo_inverse(normalized, cfg.eps_zero)?;
    let trace = pseudoinverse.trace();

    let nonzero: Vec<f64> = eigenvalues
        .iter()
        .copied()
        .filter(|l| l.abs() > cfg.eps_zero)
        .collect();
    let trace_from_eigenvalues: f64 = nonzero.iter().map(|l| 1.0 / l).sum();
    let deviation = (trace - trace_from_eigenvalues).abs();
    if deviation.is_nan() || deviation > cfg.trace_tol {
        return Err(SpectralError::TraceMismatch {
            direct: trace,
            spectral: trace_from_eigenvalues,
        });
    }

    Ok(Spectrum {
        eigenvalues,
        pseudoinverse,
        trace,
        trace_from_eigenvalues,
        nonzero_count: nonzero.len(),
    })
}

/// Moore–Penrose pseudoinverse; singular values `<= eps` are treated as zero.
fn pseudo_inverse(m: &DMatrix<f64>, eps: f64) -> Result<DMatrix<f64>, SpectralError> {
    let svd = SVD::try_new(m.clone(), true, true, f64::EPSILON, 0).ok_or_else(|| {
        SpectralError::PseudoinverseFailed {
            reason: "SVD did not converge".to_string(),
        }
    })?;
    svd.pseudo_inverse(eps)
        .map_err(|reason| SpectralError::PseudoinverseFailed {
            reason: reason.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::rand::{random_connected, RandomGraphCfg};
    use crate::graph::{Graph, Topology};
    use crate::laplacian::laplacian_matrices;
    use proptest::prelude::*;

    fn spectrum_of(g: &Graph) -> Result<Spectrum, SpectralError> {
        let cfg = SpectralCfg::default();
        let m = laplacian_matrices(g, &cfg).expect("valid graph");
        analyze_spectrum(&m.normalized, &cfg)
    }

    #[test]
    fn theta_trace_routes_agree() {
        let s = spectrum_of(&Topology::theta().build_graph()).unwrap();
        assert_eq!(s.eigenvalues.len(), 7);
        assert_eq!(s.nonzero_count, 6);
        assert!((s.trace - 6.3).abs() < 1e-9);
        assert!(s.trace_deviation() < 1e-6);
        // Bipartite: largest eigenvalue is 2.
        assert!((s.eigenvalues[6] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn tree_trace_routes_agree() {
        let s = spectrum_of(&Topology::tree().build_graph()).unwrap();
        assert_eq!(s.eigenvalues.len(), 10);
        assert!((s.trace - 16.5).abs() < 1e-9);
        assert!((s.trace_from_eigenvalues - 16.5).abs() < 1e-9);
        assert!(s.eigenvalues[0].abs() < 1e-10);
        assert!(s.eigenvalues[1] > 0.18);
    }

    #[test]
    fn pseudoinverse_is_symmetric_and_reproduces_projection() {
        let cfg = SpectralCfg::default();
        let g = Topology::theta().build_graph();
        let m = laplacian_matrices(&g, &cfg).unwrap();
        let s = analyze_spectrum(&m.normalized, &cfg).unwrap();
        // L̄ L̄† L̄ = L̄
        let back = &m.normalized * &s.pseudoinverse * &m.normalized;
        assert!((back - &m.normalized).amax() < 1e-10);
        assert!((&s.pseudoinverse - s.pseudoinverse.transpose()).amax() < 1e-10);
    }

    #[test]
    fn disconnected_graph_reports_kernel_dimension() {
        let g = Graph::from_edges(&[(0, 1), (1, 2), (2, 0), (3, 4)]);
        let err = spectrum_of(&g).unwrap_err();
        assert_eq!(err, SpectralError::KernelDimension { zero_eigenvalues: 2 });
    }

    #[test]
    fn tight_trace_tolerance_is_enforced() {
        let g = Topology::tree().build_graph();
        let m = laplacian_matrices(&g, &SpectralCfg::default()).unwrap();
        let cfg = SpectralCfg {
            trace_tol: -1.0,
            ..SpectralCfg::default()
        };
        assert!(matches!(
            analyze_spectrum(&m.normalized, &cfg),
            Err(SpectralError::TraceMismatch { .. })
        ));
    }

    #[test]
    fn non_square_is_rejected() {
        let m = DMatrix::<f64>::zeros(2, 3);
        assert_eq!(
            analyze_spectrum(&m, &SpectralCfg::default()).unwrap_err(),
            SpectralError::NotSquare { rows: 2, cols: 3 }
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn random_connected_spectrum_invariants(
            seed in any::<u64>(),
            n in 2usize..=12,
            p in 0.0f64..0.8,
        ) {
            let g = random_connected(RandomGraphCfg { vertices: n, extra_edge_prob: p }, seed);
            let s = spectrum_of(&g).unwrap();
            prop_assert_eq!(s.eigenvalues.len(), n);
            prop_assert!(s.eigenvalues.iter().all(|&l| l > -1e-8 && l < 2.0 + 1e-8));
            prop_assert_eq!(s.eigenvalues.iter().filter(|l| l.abs() <= 1e-10).count(), 1);
            prop_assert!(s.trace_deviation() < 1e-6);
        }
    }
}
