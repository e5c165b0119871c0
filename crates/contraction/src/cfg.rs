//! Tolerances for the spectral pipeline and display constants.
//!
//! Policy
//! - Defaults are fixed constants; `SpectralCfg` exists so tests and callers can
//!   tighten or loosen a single check without touching call sites.

/// Eigenvalues with `|λ| <= ZERO_EPS` count as the Laplacian kernel.
pub const ZERO_EPS: f64 = 1e-10;
/// Allowed asymmetry `max |L̄ - L̄ᵀ|` before the normalized Laplacian is rejected.
pub const SYMMETRY_EPS: f64 = 1e-10;
/// Absolute agreement required between the two trace routes.
pub const TRACE_TOL: f64 = 1e-6;
/// Slack on the `[0, 2]` eigenvalue bracket of the normalized Laplacian.
pub const SPECTRUM_RANGE_TOL: f64 = 1e-8;

/// Denominator bound for the rational display of `g`.
pub const G_MAX_DENOMINATOR: u64 = 10_000;
/// Denominator bound for the rational display of traces and ratios.
pub const RATIO_MAX_DENOMINATOR: u64 = 1_000;

/// Spectral tolerances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpectralCfg {
    pub eps_zero: f64,
    pub eps_symmetry: f64,
    pub trace_tol: f64,
    pub range_tol: f64,
}

impl Default for SpectralCfg {
    fn default() -> Self {
        Self {
            eps_zero: ZERO_EPS,
            eps_symmetry: SYMMETRY_EPS,
            trace_tol: TRACE_TOL,
            range_tol: SPECTRUM_RANGE_TOL,
        }
    }
}
