//! Block averaging of autocorrelated time series and the ratio of two means.
//!
//! Method
//! - Split the series into contiguous blocks of exactly `B` samples (a shorter
//!   trailing remainder is dropped), average each block, then report the mean
//!   of block means with standard error `s / √n_blocks` (`s` with ddof = 1).
//! - No full block: fall back to the naive mean and standard error of the
//!   raw series.
//! - Exactly one full block: the mean is that block's mean (the remainder is
//!   still dropped); the ddof = 1 spread of one block mean is undefined, so the
//!   standard error is the naive one over the block's own samples.
//! - Either case yields a less reliable error for short trajectories; callers
//!   can inspect `EstimateMethod` to flag it.
//! - Ratio `g = m_a / m_b` with first-order propagation
//!   `σ_g = |g| · √((σ_a/m_a)² + (σ_b/m_b)²)`, treating the two series as
//!   independent.

pub mod series;

use std::fmt;
use std::num::NonZeroUsize;

use serde::Serialize;

/// Default block length used by the CLI.
pub const DEFAULT_BLOCK: usize = 500;

/// Validated positive block length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockSize(NonZeroUsize);

impl BlockSize {
    /// Accepts any integer; non-positive values are a configuration error.
    pub fn new(samples: i64) -> Result<Self, BlockError> {
        usize::try_from(samples)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(BlockSize)
            .ok_or(BlockError::InvalidBlockSize { given: samples })
    }

    #[inline]
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for BlockSize {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_BLOCK).unwrap_or(NonZeroUsize::MIN))
    }
}

/// How an estimate was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateMethod {
    Blocked,
    /// One full block: block mean, naive standard error within the block.
    SingleBlock,
    /// No full block; raw-series estimate.
    Naive,
}

/// Mean and standard error of one series.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BlockEstimate {
    pub mean: f64,
    pub sem: f64,
    /// Number of full blocks used (0 for the naive fallback).
    pub blocks: usize,
    pub samples: usize,
    pub method: EstimateMethod,
}

/// Ratio of two block-averaged means.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RatioEstimate {
    pub series_a: BlockEstimate,
    pub series_b: BlockEstimate,
    pub ratio: f64,
    pub ratio_err: f64,
}

impl RatioEstimate {
    /// Whether either side had fewer than two full blocks.
    pub fn used_naive_fallback(&self) -> bool {
        self.series_a.method != EstimateMethod::Blocked
            || self.series_b.method != EstimateMethod::Blocked
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BlockError {
    /// Block length ≤ 0.
    InvalidBlockSize { given: i64 },
    /// Series without samples.
    EmptySeries,
    /// One sample: the ddof = 1 standard error is undefined.
    TooFewSamples { samples: usize },
    /// Mean of `label` is zero; ratio and propagation undefined.
    ZeroMean { label: &'static str },
}

impl fmt::Display for BlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockError::InvalidBlockSize { given } => {
                write!(f, "block size must be positive, got {given}")
            }
            BlockError::EmptySeries => write!(f, "series has no samples"),
            BlockError::TooFewSamples { samples } => write!(
                f,
                "series has {samples} sample(s); a standard error needs at least 2"
            ),
            BlockError::ZeroMean { label } => {
                write!(f, "mean of {label} is zero; ratio is undefined")
            }
        }
    }
}

impl std::error::Error for BlockError {}

fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Sample standard deviation (ddof = 1). Requires `xs.len() >= 2`.
fn sample_std(xs: &[f64]) -> f64 {
    let m = mean(xs);
    let ss: f64 = xs.iter().map(|x| (x - m) * (x - m)).sum();
    (ss / (xs.len() - 1) as f64).sqrt()
}

/// Block-averaged mean and standard error of `values`.
pub fn block_average(values: &[f64], block: BlockSize) -> Result<BlockEstimate, BlockError> {
    let n = values.len();
    if n == 0 {
        return Err(BlockError::EmptySeries);
    }
    let b = block.get();
    let full = n / b;
    if full < 2 {
        // One full block keeps only its own samples; b >= 2 here since n >= 2.
        let (kept, method) = match full {
            0 => (values, EstimateMethod::Naive),
            _ => (&values[..b], EstimateMethod::SingleBlock),
        };
        if kept.len() < 2 {
            return Err(BlockError::TooFewSamples { samples: n });
        }
        return Ok(BlockEstimate {
            mean: mean(kept),
            sem: sample_std(kept) / (kept.len() as f64).sqrt(),
            blocks: full,
            samples: n,
            method,
        });
    }
    let block_means: Vec<f64> = values[..full * b].chunks_exact(b).map(mean).collect();
    Ok(BlockEstimate {
        mean: mean(&block_means),
        sem: sample_std(&block_means) / (full as f64).sqrt(),
        blocks: full,
        samples: n,
        method: EstimateMethod::Blocked,
    })
}

/// `m_a / m_b` with propagated standard error.
pub fn ratio_of_means(a: BlockEstimate, b: BlockEstimate) -> Result<RatioEstimate, BlockError> {
    if a.mean == 0.0 {
        return Err(BlockError::ZeroMean { label: "series_a" });
    }
    if b.mean == 0.0 {
        return Err(BlockError::ZeroMean { label: "series_b" });
    }
    let ratio = a.mean / b.mean;
    let rel_a = a.sem / a.mean;
    let rel_b = b.sem / b.mean;
    Ok(RatioEstimate {
        series_a: a,
        series_b: b,
        ratio,
        ratio_err: ratio.abs() * (rel_a * rel_a + rel_b * rel_b).sqrt(),
    })
}

/// Block-average both series and form their ratio.
pub fn analyse_pair(
    series_a: &[f64],
    series_b: &[f64],
    block: BlockSize,
) -> Result<RatioEstimate, BlockError> {
    let a = block_average(series_a, block)?;
    let b = block_average(series_b, block)?;
    ratio_of_means(a, b)
}
