//! Fixed-step explicit integrators.

use osc_core::Real;

use crate::derivative::DerivativeFn;
use crate::error::{SimError, SimResult};
use crate::state::State;

/// Trait for time integrators.
///
/// `step` is a pure function of its input and the integrator's fixed
/// configuration: the same state always produces the same next state.
pub trait Integrator {
    /// Advance state by one time step.
    fn step(&self, state: &State) -> SimResult<State>;

    /// Fixed time step (seconds).
    fn dt(&self) -> Real;

    /// Global order of accuracy.
    fn order(&self) -> u32;

    /// Derivative function evaluations per step.
    fn evaluations_per_step(&self) -> u32;

    fn name(&self) -> &'static str;
}

fn check_dt(dt: Real) -> SimResult<Real> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(SimError::InvalidArg {
            what: "dt must be finite and non-negative",
        });
    }
    Ok(dt)
}

/// Forward Euler (explicit, 1st order).
/// Calls the derivative once per step.
#[derive(Clone, Debug)]
pub struct Euler<D> {
    derivative: D,
    dt: Real,
}

impl<D: DerivativeFn> Euler<D> {
    pub fn new(derivative: D, dt: Real) -> SimResult<Self> {
        Ok(Self {
            derivative,
            dt: check_dt(dt)?,
        })
    }
}

impl<D: DerivativeFn> Integrator for Euler<D> {
    fn step(&self, state: &State) -> SimResult<State> {
        state.check_dimensions()?;

        let accel = self.derivative.eval(&state.value, &state.rate)?;

        let value = state.value.add(&state.rate.scale(self.dt))?;
        let rate = state.rate.add(&accel.scale(self.dt))?;

        Ok(State { value, rate })
    }

    fn dt(&self) -> Real {
        self.dt
    }

    fn order(&self) -> u32 {
        1
    }

    fn evaluations_per_step(&self) -> u32 {
        1
    }

    fn name(&self) -> &'static str {
        "euler"
    }
}

/// Two-stage Heun integrator (explicit trapezoidal rule, 2nd order).
///
/// Predicts a full Euler step, re-evaluates the acceleration at the
/// predicted point and advances with the average of both slopes.
/// Calls the derivative twice per step.
#[derive(Clone, Debug)]
pub struct Rk2<D> {
    derivative: D,
    dt: Real,
}

impl<D: DerivativeFn> Rk2<D> {
    pub fn new(derivative: D, dt: Real) -> SimResult<Self> {
        Ok(Self {
            derivative,
            dt: check_dt(dt)?,
        })
    }
}

impl<D: DerivativeFn> Integrator for Rk2<D> {
    fn step(&self, state: &State) -> SimResult<State> {
        state.check_dimensions()?;
        let dt = self.dt;
        let half_dt = dt / 2.0;

        // Stage 1 at the current point
        let k1_rate = &state.rate;
        let k1_accel = self.derivative.eval(&state.value, &state.rate)?;

        // Stage 2 at the Euler-predicted endpoint
        let p2_value = state.value.add(&state.rate.scale(dt))?;
        let p2_rate = state.rate.add(&k1_accel.scale(dt))?;
        let k2_accel = self.derivative.eval(&p2_value, &p2_rate)?;
        let k2_rate = p2_rate;

        let value = state
            .value
            .add(&k1_rate.scale(half_dt))?
            .add(&k2_rate.scale(half_dt))?;
        let rate = state
            .rate
            .add(&k1_accel.scale(half_dt))?
            .add(&k2_accel.scale(half_dt))?;

        Ok(State { value, rate })
    }

    fn dt(&self) -> Real {
        self.dt
    }

    fn order(&self) -> u32 {
        2
    }

    fn evaluations_per_step(&self) -> u32 {
        2
    }

    fn name(&self) -> &'static str {
        "rk2"
    }
}
