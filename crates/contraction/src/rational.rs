//! Best rational approximation with a bounded denominator (display only).
//!
//! Method
//! - Take the exact binary value of the `f64` as `n / 2^k`, run the
//!   continued-fraction expansion until the next convergent's denominator
//!   would exceed the bound, then choose between the last convergent and the
//!   best semiconvergent. This is the bounded-denominator Diophantine
//!   approximation, not a truncation of the decimal expansion.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reduced fraction `num / den`, `den >= 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rational {
    pub num: i64,
    pub den: u64,
}

impl Rational {
    /// Reduced fraction; `den` must be nonzero.
    pub fn new(num: i64, den: u64) -> Self {
        debug_assert!(den != 0);
        let g = gcd(num.unsigned_abs(), den).max(1);
        Self {
            num: num / g as i64,
            den: den / g,
        }
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Largest power-of-two denominator kept exactly; smaller magnitudes lose low bits.
const MAX_DEN_SHIFT: u32 = 120;

/// Exact `|x|` as `(num, den)` with `den` a power of two, reduced.
/// `None` if `x` is an integer too large for `i64`.
fn exact_ratio(x: f64) -> Option<(u128, u128)> {
    let bits = x.abs().to_bits();
    let exp_bits = ((bits >> 52) & 0x7ff) as i32;
    let frac = bits & ((1u64 << 52) - 1);
    let (mut mant, exp) = if exp_bits == 0 {
        (frac, -1074)
    } else {
        (frac | (1u64 << 52), exp_bits - 1075)
    };
    if mant == 0 {
        return Some((0, 1));
    }
    if exp >= 0 {
        // 53-bit mantissa shifted by `exp` must stay below 2^63.
        if exp > 10 || (mant << exp) > i64::MAX as u64 {
            return None;
        }
        return Some(((mant << exp) as u128, 1));
    }
    let mut shift = (-exp) as u32;
    if shift > MAX_DEN_SHIFT {
        mant >>= (shift - MAX_DEN_SHIFT).min(63);
        shift = MAX_DEN_SHIFT;
        if mant == 0 {
            return Some((0, 1));
        }
    }
    let tz = mant.trailing_zeros().min(shift);
    mant >>= tz;
    shift -= tz;
    Some((mant as u128, 1u128 << shift))
}

fn signed(negative: bool, num: u128, den: u128) -> Option<Rational> {
    let num = i64::try_from(num).ok()?;
    let den = u64::try_from(den).ok()?;
    Some(Rational::new(if negative { -num } else { num }, den))
}

/// Closest fraction to `x` with denominator at most `max_den`.
///
/// `None` for non-finite `x`, `max_den == 0`, or integers beyond `i64`.
pub fn best_rational(x: f64, max_den: u64) -> Option<Rational> {
    if !x.is_finite() || max_den == 0 {
        return None;
    }
    let negative = x < 0.0;
    let (num, den) = exact_ratio(x)?;
    let bound = max_den as u128;
    if den <= bound {
        return signed(negative, num, den);
    }

    // Convergents p/q: (p0/q0) previous, (p1/q1) current.
    let (mut p0, mut q0, mut p1, mut q1) = (0u128, 1u128, 1u128, 0u128);
    let (mut n, mut d) = (num, den);
    loop {
        let a = n / d;
        let q2 = a.checked_mul(q1).and_then(|aq| aq.checked_add(q0));
        match q2 {
            Some(q2) if q2 <= bound => {
                let p2 = p0 + a * p1;
                (p0, q0, p1, q1) = (p1, q1, p2, q2);
                (n, d) = (d, n - a * d);
            }
            _ => break,
        }
    }
    // Best semiconvergent below the bound.
    let k = (bound - q0) / q1;
    let semi = (p0 + k * p1, q0 + k * q1);
    // |p1/q1 − x| ≤ |semi − x|  ⇔  2·d·(q0 + k·q1) ≤ den
    let convergent_wins = 2u128
        .checked_mul(d)
        .and_then(|v| v.checked_mul(semi.1))
        .is_some_and(|lhs| lhs <= den);
    if convergent_wins {
        signed(negative, p1, q1)
    } else {
        signed(negative, semi.0, semi.1)
    }
}
