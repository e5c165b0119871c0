//! Curated internal API for the CLI and experiments (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for project-internal
//!   code. Breaking changes are allowed and expected.

// Graph construction
pub use crate::graph::rand::{random_connected, RandomGraphCfg};
pub use crate::graph::{Graph, Topology, TopologyError};
// Per-topology pipeline
pub use crate::factor::{analyze, contraction_factor, Analysis, AnalysisError, TopologyMetrics};
pub use crate::laplacian::{laplacian_matrices, LaplacianError, LaplacianMatrices};
pub use crate::spectral::{analyze_spectrum, SpectralError, Spectrum};
// Persistence and comparison
pub use crate::compare::{compare, CompareError, Comparison};
pub use crate::store::{
    default_blob_path, read_blob, write_blob, ResultBlob, StoreError, SCHEMA_VERSION,
};
// Block averaging
pub use crate::blockavg::series::{parse_series, read_series, SeriesError, TimeSeries};
pub use crate::blockavg::{
    analyse_pair, block_average, ratio_of_means, BlockError, BlockEstimate, BlockSize,
    EstimateMethod, RatioEstimate,
};
// Display helpers
pub use crate::rational::{best_rational, Rational};
pub use crate::report::{render_analysis, render_block_average, render_comparison};
