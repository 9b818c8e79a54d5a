//! DerivativeFn trait for pluggable acceleration laws.

use osc_core::{OscResult, Vector};

/// Caller-supplied acceleration: `a = f(value, rate)`.
///
/// Integrators treat implementations as opaque and assume they are pure:
/// the same inputs must always give the same output. Closures with the
/// matching signature implement this trait directly.
pub trait DerivativeFn {
    fn eval(&self, value: &Vector, rate: &Vector) -> OscResult<Vector>;
}

impl<F> DerivativeFn for F
where
    F: Fn(&Vector, &Vector) -> OscResult<Vector>,
{
    fn eval(&self, value: &Vector, rate: &Vector) -> OscResult<Vector> {
        self(value, rate)
    }
}
