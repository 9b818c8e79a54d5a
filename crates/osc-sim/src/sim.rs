//! Simulation runner and result recording.

use osc_core::Real;
use tracing::{debug, warn};

use crate::derivative::DerivativeFn;
use crate::error::{SimError, SimResult};
use crate::integrator::{Euler, Integrator, Rk2};
use crate::state::State;

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// Forward Euler (1st-order, 1 derivative call per step).
    Euler,
    /// Heun RK2 (default, 2nd-order, 2 derivative calls per step).
    #[default]
    Rk2,
}

impl IntegratorType {
    /// Name matching `Integrator::name` of the integrator it selects.
    pub fn label(&self) -> &'static str {
        match self {
            IntegratorType::Euler => "euler",
            IntegratorType::Rk2 => "rk2",
        }
    }
}

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Fixed time step (seconds)
    pub dt: Real,
    /// Final simulation time (seconds)
    pub t_end: Real,
    /// Maximum number of steps (safety limit)
    pub max_steps: usize,
    /// Record every N-th step (decimation)
    pub record_every: usize,
    /// Integrator type (default: Rk2)
    pub integrator: IntegratorType,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 0.01,
            t_end: 3.0,
            max_steps: 1_000_000,
            record_every: 1,
            integrator: IntegratorType::default(),
        }
    }
}

impl SimOptions {
    pub fn validate(&self) -> SimResult<()> {
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(SimError::InvalidArg {
                what: "dt must be positive",
            });
        }
        if !(self.t_end >= 0.0 && self.t_end.is_finite()) {
            return Err(SimError::InvalidArg {
                what: "t_end must be non-negative",
            });
        }
        if self.max_steps == 0 {
            return Err(SimError::InvalidArg {
                what: "max_steps must be positive",
            });
        }
        if self.record_every == 0 {
            return Err(SimError::InvalidArg {
                what: "record_every must be positive",
            });
        }
        Ok(())
    }
}

/// Record of simulation results.
#[derive(Clone, Debug, PartialEq)]
pub struct SimRecord {
    /// Time points (seconds)
    pub t: Vec<Real>,
    /// State snapshots
    pub states: Vec<State>,
    /// Run stopped at `max_steps` before reaching `t_end`
    pub truncated: bool,
}

impl SimRecord {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Time series of one position component.
    pub fn positions(&self, component: usize) -> Vec<Real> {
        self.states
            .iter()
            .map(|s| s.value.get(component).unwrap_or(Real::NAN))
            .collect()
    }

    pub fn final_state(&self) -> Option<&State> {
        self.states.last()
    }
}

/// Number of whole steps of size `dt` that fit in `[0, t_end]`.
///
/// A small slack absorbs representation error, so `t_end = 3.0, dt = 0.01`
/// gives 300 steps rather than 299.
pub fn step_count(dt: Real, t_end: Real) -> usize {
    (t_end / dt + 1e-9).floor() as usize
}

/// Run a fixed-step simulation from `initial` up to `opts.t_end`.
pub fn run_sim<D: DerivativeFn>(
    derivative: D,
    initial: State,
    opts: &SimOptions,
) -> SimResult<SimRecord> {
    opts.validate()?;
    let requested = step_count(opts.dt, opts.t_end);
    let steps = requested.min(opts.max_steps);
    if steps < requested {
        warn!(
            integrator = opts.integrator.label(),
            requested,
            max_steps = opts.max_steps,
            reached_t = steps as Real * opts.dt,
            t_end = opts.t_end,
            "step limit stops the run before t_end"
        );
    }

    let mut record = match opts.integrator {
        IntegratorType::Euler => {
            let integrator = Euler::new(derivative, opts.dt)?;
            run_with(&integrator, initial, steps, opts.record_every)?
        }
        IntegratorType::Rk2 => {
            let integrator = Rk2::new(derivative, opts.dt)?;
            run_with(&integrator, initial, steps, opts.record_every)?
        }
    };
    record.truncated = steps < requested;
    Ok(record)
}

/// Advance `initial` by `steps` steps of an already-built integrator.
///
/// The initial state is recorded at `t = 0`, then every `record_every`-th
/// state; the final state is always recorded.
pub fn run_with<I: Integrator>(
    integrator: &I,
    initial: State,
    steps: usize,
    record_every: usize,
) -> SimResult<SimRecord> {
    if record_every == 0 {
        return Err(SimError::InvalidArg {
            what: "record_every must be positive",
        });
    }
    initial.check_dimensions()?;

    let dt = integrator.dt();
    debug!(
        integrator = integrator.name(),
        dt, steps, record_every, "starting fixed-step run"
    );

    let mut t_record = vec![0.0];
    let mut x_record = vec![initial.clone()];

    let mut x = initial;
    for step in 1..=steps {
        x = integrator.step(&x)?;
        if step % record_every == 0 || step == steps {
            t_record.push(step as Real * dt);
            x_record.push(x.clone());
        }
    }

    debug!(
        integrator = integrator.name(),
        recorded = t_record.len(),
        "finished fixed-step run"
    );

    Ok(SimRecord {
        t: t_record,
        states: x_record,
        truncated: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use osc_core::{OscError, OscResult, Vector};

    fn spring(value: &Vector, _rate: &Vector) -> OscResult<Vector> {
        Ok(value.scale(-100.0))
    }

    fn initial() -> State {
        State::new(Vector::new([0.0]).unwrap(), Vector::new([-1.0]).unwrap())
    }

    #[test]
    fn sim_options_defaults() {
        let opts = SimOptions::default();
        assert_eq!(opts.dt, 0.01);
        assert_eq!(opts.t_end, 3.0);
        assert_eq!(opts.max_steps, 1_000_000);
        assert_eq!(opts.record_every, 1);
        assert_eq!(opts.integrator, IntegratorType::Rk2);
    }

    #[test]
    fn sim_options_invalid() {
        let zero_dt = SimOptions {
            dt: 0.0,
            ..SimOptions::default()
        };
        assert!(matches!(
            run_sim(spring, initial(), &zero_dt),
            Err(SimError::InvalidArg { .. })
        ));

        let no_record = SimOptions {
            record_every: 0,
            ..SimOptions::default()
        };
        assert!(no_record.validate().is_err());

        let negative_end = SimOptions {
            t_end: -1.0,
            ..SimOptions::default()
        };
        assert!(negative_end.validate().is_err());
    }

    #[test]
    fn step_count_absorbs_rounding() {
        assert_eq!(step_count(0.01, 3.0), 300);
        assert_eq!(step_count(0.05, 3.0), 60);
        assert_eq!(step_count(0.1, 0.0), 0);
        assert_eq!(step_count(0.4, 1.0), 2);
    }

    #[test]
    fn records_initial_and_every_step() {
        let record = run_sim(spring, initial(), &SimOptions::default()).unwrap();
        assert_eq!(record.len(), 301);
        assert_eq!(record.t[0], 0.0);
        assert_eq!(record.states[0], initial());
        assert!((record.t[300] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn decimation_keeps_final_state() {
        let opts = SimOptions {
            dt: 0.1,
            t_end: 1.0,
            record_every: 3,
            integrator: IntegratorType::Euler,
            ..SimOptions::default()
        };
        let record = run_sim(spring, initial(), &opts).unwrap();
        // t = 0, 0.3, 0.6, 0.9, 1.0
        assert_eq!(record.len(), 5);
        assert!((record.t[4] - 1.0).abs() < 1e-12);

        let full = run_sim(
            spring,
            initial(),
            &SimOptions {
                record_every: 1,
                ..opts
            },
        )
        .unwrap();
        assert_eq!(record.final_state(), full.final_state());
    }

    #[test]
    fn max_steps_caps_run() {
        let opts = SimOptions {
            max_steps: 5,
            ..SimOptions::default()
        };
        let record = run_sim(spring, initial(), &opts).unwrap();
        assert_eq!(record.len(), 6);
        assert!(record.truncated);
        assert!((record.t[5] - 0.05).abs() < 1e-12);
    }

    #[test]
    fn full_run_is_not_truncated() {
        let record = run_sim(spring, initial(), &SimOptions::default()).unwrap();
        assert!(!record.truncated);

        // limit equal to the requested count still reaches t_end
        let exact = SimOptions {
            max_steps: 300,
            ..SimOptions::default()
        };
        assert!(!run_sim(spring, initial(), &exact).unwrap().truncated);
    }

    #[test]
    fn labels_match_integrator_names() {
        let euler = Euler::new(spring, 0.1).unwrap();
        let rk2 = Rk2::new(spring, 0.1).unwrap();
        assert_eq!(IntegratorType::Euler.label(), euler.name());
        assert_eq!(IntegratorType::Rk2.label(), rk2.name());
    }

    #[test]
    fn mismatched_initial_state_rejected() {
        let bad = State::new(Vector::new([0.0]).unwrap(), Vector::new([0.0, 0.0]).unwrap());
        assert_eq!(
            run_sim(spring, bad, &SimOptions::default()),
            Err(SimError::Vector(OscError::DimensionMismatch { left: 1, right: 2 }))
        );
    }

    #[test]
    fn positions_extracts_component() {
        let record = run_sim(
            spring,
            initial(),
            &SimOptions {
                t_end: 0.02,
                ..SimOptions::default()
            },
        )
        .unwrap();
        let xs = record.positions(0);
        assert_eq!(xs.len(), record.len());
        assert_eq!(xs[0], 0.0);
        assert!(record.positions(3).iter().all(|x| x.is_nan()));
    }
}
