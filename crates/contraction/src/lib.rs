//! Contraction factors of polymer topologies via the normalized graph Laplacian.
//!
//! Pipeline per topology: `graph` → `laplacian` → `spectral` → `factor`, with the
//! result persisted through `store` and two results combined by `compare`.
//! `blockavg` is an independent post-processor for simulated Rg² time series.
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API.
//! - Computation returns structured values; `report` renders them as text and
//!   is the only place that formats numbers for humans.

pub mod api;
pub mod blockavg;
pub mod cfg;
pub mod compare;
pub mod factor;
pub mod graph;
pub mod laplacian;
pub mod rational;
pub mod report;
pub mod spectral;
pub mod store;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::SpectralCfg;
pub use factor::{analyze, Analysis, AnalysisError, TopologyMetrics};
pub use graph::{Graph, Topology};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::blockavg::{block_average, ratio_of_means, BlockEstimate, BlockSize};
    pub use crate::compare::{compare, Comparison};
    pub use crate::factor::{analyze, Analysis, TopologyMetrics};
    pub use crate::graph::{Graph, Topology};
    pub use crate::rational::{best_rational, Rational};
    pub use crate::store::ResultBlob;
    pub use crate::SpectralCfg;
    pub use nalgebra::DMatrix;
}
