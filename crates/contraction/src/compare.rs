//! Relative contraction factor of two persisted results.

use std::fmt;

use serde::Serialize;

use crate::cfg::RATIO_MAX_DENOMINATOR;
use crate::rational::{best_rational, Rational};
use crate::store::ResultBlob;

/// `g_subject / g_reference` with both inputs carried along for the table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Comparison {
    pub subject: ResultBlob,
    pub reference: ResultBlob,
    pub ratio: f64,
    /// Ratio with denominator ≤ `RATIO_MAX_DENOMINATOR` (display only).
    pub ratio_rational: Option<Rational>,
}

impl Comparison {
    /// Ratio as a percentage ("X% as compact as the reference").
    #[inline]
    pub fn percent(&self) -> f64 {
        100.0 * self.ratio
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompareError {
    /// Reference contraction factor is zero or not finite.
    DegenerateReference { topology: String, g: f64 },
}

impl fmt::Display for CompareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareError::DegenerateReference { topology, g } => write!(
                f,
                "reference contraction factor g({topology}) = {g} cannot be a divisor"
            ),
        }
    }
}

impl std::error::Error for CompareError {}

/// Ratio `g_subject / g_reference` (plain `f64` division, no further rounding).
pub fn compare(subject: &ResultBlob, reference: &ResultBlob) -> Result<Comparison, CompareError> {
    if reference.g == 0.0 || !reference.g.is_finite() {
        return Err(CompareError::DegenerateReference {
            topology: reference.topology.clone(),
            g: reference.g,
        });
    }
    let ratio = subject.g / reference.g;
    Ok(Comparison {
        subject: subject.clone(),
        reference: reference.clone(),
        ratio,
        ratio_rational: best_rational(ratio, RATIO_MAX_DENOMINATOR),
    })
}
