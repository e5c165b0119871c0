//! Contraction factor `g(G∞)` and the per-topology pipeline.
//!
//! Closed form (infinite-subdivision limit, normalized Laplacian):
//!
//! `g(G∞) = 3 · [Tr(L̄†) + loops/3 − 1/6] / e²`,  `loops = e − v + 1`.
//!
//! `analyze` runs graph → Laplacian → spectrum → `g` for one `Topology` and
//! returns every intermediate value so the report can show the whole chain.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cfg::{SpectralCfg, G_MAX_DENOMINATOR, RATIO_MAX_DENOMINATOR};
use crate::graph::{Graph, Topology};
use crate::laplacian::{laplacian_matrices, LaplacianError, LaplacianMatrices};
use crate::rational::{best_rational, Rational};
use crate::spectral::{analyze_spectrum, SpectralError, Spectrum};
use crate::store::ResultBlob;

/// Counts entering the formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyMetrics {
    pub vertices: usize,
    pub edges: usize,
    pub loops: i64,
}

impl TopologyMetrics {
    pub fn of(graph: &Graph) -> Self {
        Self {
            vertices: graph.vertex_count(),
            edges: graph.edge_count(),
            loops: graph.cycle_rank(),
        }
    }
}

/// Terms of the formula, kept for the substitution printout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FactorTerms {
    /// `3 · (trace + loops/3 − 1/6)`
    pub numerator: f64,
    /// `e²`
    pub denominator: f64,
    pub g: f64,
}

/// Apply the closed form. Returns `None` for a graph without edges.
pub fn contraction_factor(metrics: TopologyMetrics, trace: f64) -> Option<FactorTerms> {
    if metrics.edges == 0 {
        return None;
    }
    let numerator = 3.0 * (trace + metrics.loops as f64 / 3.0 - 1.0 / 6.0);
    let denominator = (metrics.edges * metrics.edges) as f64;
    Some(FactorTerms {
        numerator,
        denominator,
        g: numerator / denominator,
    })
}

/// Failure anywhere along the per-topology pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    Laplacian(LaplacianError),
    Spectral(SpectralError),
    /// The graph splits into several components; g is defined for connected graphs only.
    Disconnected,
    NoEdges,
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Laplacian(e) => write!(f, "malformed graph: {e}"),
            AnalysisError::Spectral(e) => write!(f, "spectral analysis failed: {e}"),
            AnalysisError::Disconnected => write!(f, "malformed graph: not connected"),
            AnalysisError::NoEdges => write!(f, "graph has no edges (e² = 0)"),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Laplacian(e) => Some(e),
            AnalysisError::Spectral(e) => Some(e),
            AnalysisError::Disconnected | AnalysisError::NoEdges => None,
        }
    }
}

impl From<LaplacianError> for AnalysisError {
    fn from(e: LaplacianError) -> Self {
        AnalysisError::Laplacian(e)
    }
}

impl From<SpectralError> for AnalysisError {
    fn from(e: SpectralError) -> Self {
        AnalysisError::Spectral(e)
    }
}

/// Structured result of one pipeline run.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub topology: Topology,
    pub graph: Graph,
    pub matrices: LaplacianMatrices,
    pub spectrum: Spectrum,
    pub metrics: TopologyMetrics,
    pub terms: FactorTerms,
    /// `g` with denominator ≤ `G_MAX_DENOMINATOR` (display only).
    pub g_rational: Option<Rational>,
    /// Trace with denominator ≤ `RATIO_MAX_DENOMINATOR` (display only).
    pub trace_rational: Option<Rational>,
}

impl Analysis {
    #[inline]
    pub fn g(&self) -> f64 {
        self.terms.g
    }

    #[inline]
    pub fn trace(&self) -> f64 {
        self.spectrum.trace
    }

    /// Persistable record of this run.
    pub fn to_blob(&self) -> ResultBlob {
        ResultBlob::new(&self.topology.name, self.g(), self.trace(), self.metrics)
    }
}

/// Run the full pipeline for `topology`.
pub fn analyze(topology: &Topology, cfg: &SpectralCfg) -> Result<Analysis, AnalysisError> {
    let graph = topology.build_graph();
    let matrices = laplacian_matrices(&graph, cfg)?;
    if !graph.is_connected() {
        return Err(AnalysisError::Disconnected);
    }
    let spectrum = analyze_spectrum(&matrices.normalized, cfg)?;
    let metrics = TopologyMetrics::of(&graph);
    let terms = contraction_factor(metrics, spectrum.trace).ok_or(AnalysisError::NoEdges)?;
    Ok(Analysis {
        topology: topology.clone(),
        g_rational: best_rational(terms.g, G_MAX_DENOMINATOR),
        trace_rational: best_rational(spectrum.trace, RATIO_MAX_DENOMINATOR),
        graph,
        matrices,
        spectrum,
        metrics,
        terms,
    })
}
