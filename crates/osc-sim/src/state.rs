//! Value/rate snapshot at one instant of simulated time.

use osc_core::{OscError, Vector};

use crate::error::SimResult;

/// Position (`value`) and its time-derivative (`rate`).
#[derive(Clone, Debug, PartialEq)]
pub struct State {
    pub value: Vector,
    pub rate: Vector,
}

impl State {
    pub fn new(value: Vector, rate: Vector) -> Self {
        Self { value, rate }
    }

    /// Fails with `DimensionMismatch` when value and rate disagree.
    pub fn check_dimensions(&self) -> SimResult<()> {
        if self.value.dim() != self.rate.dim() {
            return Err(OscError::DimensionMismatch {
                left: self.value.dim(),
                right: self.rate.dim(),
            }
            .into());
        }
        Ok(())
    }

    pub fn dim(&self) -> usize {
        self.value.dim()
    }
}
