//! Linear spring-mass oscillator with optional viscous damping.
//!
//! Acceleration law, applied component-wise:
//!
//! ```text
//! a = -(k * x + c * v) / m
//! ```
//!
//! The analytic reference is the underdamped response released from the
//! origin:
//!
//! ```text
//! x(t) = -A * exp(-zeta * w * t) * sin(w_d * t)
//! A    = m * amplitude_factor / k
//! w    = sqrt(k / m),  zeta = c / (2 sqrt(k m)),  w_d = w sqrt(1 - zeta^2)
//! ```
//!
//! `amplitude_factor` is a property of the reference curve only; it never
//! enters the acceleration law.

use osc_core::{OscResult, Real, Vector};
use osc_sim::{DerivativeFn, State};

use crate::error::{ModelError, ModelResult};

/// Acceleration-like constant used by the reference amplitude (m/s^2).
pub const DEFAULT_AMPLITUDE_FACTOR: Real = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringMass {
    /// Mass (kg)
    pub mass: Real,
    /// Spring constant (N/m)
    pub spring_constant: Real,
    /// Viscous damping coefficient (N*s/m)
    pub damping: Real,
    /// Reference amplitude factor (m/s^2)
    pub amplitude_factor: Real,
}

impl SpringMass {
    /// Undamped oscillator with the default amplitude factor.
    pub fn new(mass: Real, spring_constant: Real) -> Self {
        Self {
            mass,
            spring_constant,
            damping: 0.0,
            amplitude_factor: DEFAULT_AMPLITUDE_FACTOR,
        }
    }

    pub fn with_damping(mut self, damping: Real) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_amplitude_factor(mut self, amplitude_factor: Real) -> Self {
        self.amplitude_factor = amplitude_factor;
        self
    }

    pub fn validate(&self) -> ModelResult<()> {
        positive("mass", self.mass)?;
        positive("spring_constant", self.spring_constant)?;
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(ModelError::InvalidParameter {
                what: "damping",
                value: self.damping,
            });
        }
        if !self.amplitude_factor.is_finite() {
            return Err(ModelError::InvalidParameter {
                what: "amplitude_factor",
                value: self.amplitude_factor,
            });
        }
        let ratio = self.damping_ratio();
        if ratio >= 1.0 {
            return Err(ModelError::NotUnderdamped { ratio });
        }
        Ok(())
    }

    /// Natural angular frequency sqrt(k/m) (rad/s).
    pub fn omega(&self) -> Real {
        (self.spring_constant / self.mass).sqrt()
    }

    /// Reference amplitude m * amplitude_factor / k (m).
    pub fn amplitude(&self) -> Real {
        self.mass * self.amplitude_factor / self.spring_constant
    }

    pub fn damping_ratio(&self) -> Real {
        self.damping / (2.0 * (self.spring_constant * self.mass).sqrt())
    }

    /// Damped angular frequency (rad/s).
    pub fn damped_omega(&self) -> Real {
        let zeta = self.damping_ratio();
        self.omega() * (1.0 - zeta * zeta).max(0.0).sqrt()
    }

    pub fn analytic_position(&self, t: Real) -> Real {
        let decay = (-self.damping_ratio() * self.omega() * t).exp();
        -self.amplitude() * decay * (self.damped_omega() * t).sin()
    }

    pub fn analytic_velocity(&self, t: Real) -> Real {
        let zeta_w = self.damping_ratio() * self.omega();
        let wd = self.damped_omega();
        let decay = (-zeta_w * t).exp();
        -self.amplitude() * decay * (wd * (wd * t).cos() - zeta_w * (wd * t).sin())
    }

    /// One-dimensional state at t = 0 that follows the analytic reference.
    pub fn reference_initial_state(&self) -> OscResult<State> {
        Ok(State::new(
            Vector::new([self.analytic_position(0.0)])?,
            Vector::new([self.analytic_velocity(0.0)])?,
        ))
    }

    pub fn acceleration(&self, value: &Vector, rate: &Vector) -> OscResult<Vector> {
        let restoring = value.scale(-self.spring_constant / self.mass);
        if self.damping == 0.0 {
            return Ok(restoring);
        }
        restoring.add(&rate.scale(-self.damping / self.mass))
    }
}

impl Default for SpringMass {
    fn default() -> Self {
        Self::new(1.0, 100.0)
    }
}

impl DerivativeFn for SpringMass {
    fn eval(&self, value: &Vector, rate: &Vector) -> OscResult<Vector> {
        self.acceleration(value, rate)
    }
}

fn positive(what: &'static str, value: Real) -> ModelResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidParameter { what, value })
    }
}
