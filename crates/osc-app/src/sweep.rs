//! Step-size convergence sweep.
//!
//! Each step size is an independent simulation, so the sweep runs them in
//! parallel; the integrators and the model are immutable values and need no
//! coordination between threads.

use osc_core::Real;
use osc_project::Scenario;
use osc_sim::IntegratorType;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::compare::{max_abs_deviation, observed_order};
use crate::error::{AppError, AppResult};
use crate::run_service::{run_single, spring_mass, starts_on_reference};

/// Max deviation of both integrators at one step size.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SweepPoint {
    pub dt: Real,
    pub steps: usize,
    pub euler_max_abs: Real,
    pub rk2_max_abs: Real,
    /// Order observed against the previous point, if any.
    pub euler_order: Option<Real>,
    pub rk2_order: Option<Real>,
}

/// Run the scenario once per step size and report convergence.
///
/// Orders are computed between consecutive entries of `dts` in the order
/// given; pass step sizes from coarse to fine.
pub fn convergence_sweep(scenario: &Scenario, dts: &[Real]) -> AppResult<Vec<SweepPoint>> {
    if dts.is_empty() {
        return Err(AppError::InvalidInput(
            "sweep needs at least one step size".to_string(),
        ));
    }
    if let Some(bad) = dts.iter().find(|dt| !(dt.is_finite() && **dt > 0.0)) {
        return Err(AppError::InvalidInput(format!(
            "step size must be finite and positive, got {bad}"
        )));
    }

    info!(points = dts.len(), "running convergence sweep");
    let model = spring_mass(&scenario.oscillator)?;
    if !starts_on_reference(&model, scenario, scenario.output.component)? {
        warn!("initial state is off the analytic reference; observed orders are not meaningful");
    }

    let errors = dts
        .par_iter()
        .map(|&dt| point_errors(scenario, dt))
        .collect::<AppResult<Vec<_>>>()?;

    let mut points: Vec<SweepPoint> = Vec::with_capacity(errors.len());
    for (&dt, (steps, euler_max_abs, rk2_max_abs)) in dts.iter().zip(errors) {
        let (euler_order, rk2_order) = match points.last() {
            Some(prev) => (
                observed_order(prev.dt, prev.euler_max_abs, dt, euler_max_abs),
                observed_order(prev.dt, prev.rk2_max_abs, dt, rk2_max_abs),
            ),
            None => (None, None),
        };
        points.push(SweepPoint {
            dt,
            steps,
            euler_max_abs,
            rk2_max_abs,
            euler_order,
            rk2_order,
        });
    }
    Ok(points)
}

fn point_errors(scenario: &Scenario, dt: Real) -> AppResult<(usize, Real, Real)> {
    let mut scenario = scenario.clone();
    scenario.timing.dt_s = dt;
    scenario.output.record_every = 1;
    let model = spring_mass(&scenario.oscillator)?;
    let component = scenario.output.component;
    let reference = |t: Real| model.analytic_position(t);

    let euler = run_single(&scenario, IntegratorType::Euler)?;
    let rk2 = run_single(&scenario, IntegratorType::Rk2)?;
    // every point must cover the same horizon for the orders to compare
    if euler.truncated || rk2.truncated {
        return Err(AppError::InvalidInput(format!(
            "step size {dt} needs more than the step limit to reach t_end"
        )));
    }

    Ok((
        euler.len().saturating_sub(1),
        max_abs_deviation(&euler.t, &euler.positions(component), reference),
        max_abs_deviation(&rk2.t, &rk2.positions(component), reference),
    ))
}
