//! Scalar type and approximate comparison of reals.

/// Component and time type.
pub type Real = f64;

/// Absolute/relative tolerance pair.
///
/// Two finite values agree when their difference is within `abs`, or within
/// `rel` times the larger magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Tolerances {
    pub const fn new(abs: Real, rel: Real) -> Self {
        Self { abs, rel }
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self::new(1e-12, 1e-9)
    }
}

/// Non-finite values only agree with an identical value.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    if !(a.is_finite() && b.is_finite()) {
        return a == b;
    }
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}
