//! Run a scenario through both integrators and compare against the reference.

use osc_core::{Real, Tolerances, Vector, nearly_equal};
use osc_model::SpringMass;
use osc_project::{OscillatorDef, Scenario};
use osc_sim::{IntegratorType, SimOptions, SimRecord, State, run_sim};
use tracing::{info, warn};

use crate::compare::{DeviationSummary, deviation_summary};
use crate::error::{AppError, AppResult};

/// One recorded instant of the comparison table.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonRow {
    pub t: Real,
    pub analytic: Real,
    pub euler: Real,
    pub rk2: Real,
}

/// Euler and RK2 trajectories from the same initial state, side by side
/// with the analytic reference.
#[derive(Clone, Debug)]
pub struct ComparisonRun {
    pub scenario_name: String,
    pub model: SpringMass,
    pub component: usize,
    pub dt: Real,
    pub rows: Vec<ComparisonRow>,
    pub euler: DeviationSummary,
    pub rk2: DeviationSummary,
    pub euler_record: SimRecord,
    pub rk2_record: SimRecord,
    /// Initial state at `component` is the one the analytic reference starts from
    pub on_reference: bool,
    /// Both runs stopped at the step limit before `t_end`
    pub truncated: bool,
}

/// Tolerance for matching a scenario's initial state to the reference.
///
/// Loose enough for hand-written decimals in scenario files.
const REFERENCE_TOLERANCE: Tolerances = Tolerances::new(1e-9, 1e-9);

pub fn spring_mass(def: &OscillatorDef) -> AppResult<SpringMass> {
    let model = SpringMass::new(def.mass_kg, def.spring_constant_n_per_m)
        .with_damping(def.damping_n_s_per_m)
        .with_amplitude_factor(def.amplitude_factor_m_per_s2);
    model.validate()?;
    Ok(model)
}

pub fn initial_state(scenario: &Scenario) -> State {
    State::new(scenario.initial.value.clone(), scenario.initial.rate.clone())
}

/// Whether `component` of the scenario's initial state matches the state the
/// model's analytic reference starts from. Deviations from the reference are
/// meaningless otherwise.
pub fn starts_on_reference(
    model: &SpringMass,
    scenario: &Scenario,
    component: usize,
) -> AppResult<bool> {
    let reference = model.reference_initial_state()?;
    let agrees = |actual: &Vector, expected: &Vector| {
        match (actual.get(component), expected.get(0)) {
            (Some(a), Some(e)) => nearly_equal(a, e, REFERENCE_TOLERANCE),
            _ => false,
        }
    };
    Ok(agrees(&scenario.initial.value, &reference.value)
        && agrees(&scenario.initial.rate, &reference.rate))
}

pub fn sim_options(scenario: &Scenario, integrator: IntegratorType) -> SimOptions {
    let defaults = SimOptions::default();
    SimOptions {
        dt: scenario.timing.dt_s,
        t_end: scenario.timing.t_end_s,
        max_steps: scenario.timing.max_steps.unwrap_or(defaults.max_steps),
        record_every: scenario.output.record_every,
        integrator,
    }
}

/// Run one integrator over the scenario.
pub fn run_single(scenario: &Scenario, integrator: IntegratorType) -> AppResult<SimRecord> {
    osc_project::validate_scenario(scenario).map_err(osc_project::ProjectError::from)?;
    let model = spring_mass(&scenario.oscillator)?;
    let record = run_sim(
        model,
        initial_state(scenario),
        &sim_options(scenario, integrator),
    )?;
    Ok(record)
}

pub fn run_comparison(scenario: &Scenario) -> AppResult<ComparisonRun> {
    osc_project::validate_scenario(scenario).map_err(osc_project::ProjectError::from)?;
    let model = spring_mass(&scenario.oscillator)?;
    let component = scenario.output.component;

    info!(
        scenario = %scenario.name,
        dt = scenario.timing.dt_s,
        t_end = scenario.timing.t_end_s,
        "running euler/rk2 comparison"
    );

    let on_reference = starts_on_reference(&model, scenario, component)?;
    if !on_reference {
        let reference = model.reference_initial_state()?;
        warn!(
            component,
            value = ?scenario.initial.value.get(component),
            rate = ?scenario.initial.rate.get(component),
            reference_value = reference.value[0],
            reference_rate = reference.rate[0],
            "initial state is off the analytic reference; deviations do not measure integrator error"
        );
    }

    let euler_record = run_sim(
        model,
        initial_state(scenario),
        &sim_options(scenario, IntegratorType::Euler),
    )?;
    let rk2_record = run_sim(
        model,
        initial_state(scenario),
        &sim_options(scenario, IntegratorType::Rk2),
    )?;

    if euler_record.t != rk2_record.t {
        return Err(AppError::Simulation(
            "euler and rk2 recorded different time points".to_string(),
        ));
    }

    let euler_x = euler_record.positions(component);
    let rk2_x = rk2_record.positions(component);
    let reference = |t: Real| model.analytic_position(t);

    let rows = euler_record
        .t
        .iter()
        .zip(euler_x.iter().zip(&rk2_x))
        .map(|(&t, (&euler, &rk2))| ComparisonRow {
            t,
            analytic: reference(t),
            euler,
            rk2,
        })
        .collect();

    let euler = deviation_summary(
        IntegratorType::Euler.label(),
        &euler_record.t,
        &euler_x,
        reference,
    );
    let rk2 = deviation_summary(IntegratorType::Rk2.label(), &rk2_record.t, &rk2_x, reference);

    if euler.max_abs > model.amplitude().abs() {
        warn!(
            max_abs = euler.max_abs,
            amplitude = model.amplitude(),
            "euler deviation exceeds reference amplitude; consider a smaller dt"
        );
    }
    info!(
        euler_max = euler.max_abs,
        rk2_max = rk2.max_abs,
        "comparison finished"
    );

    Ok(ComparisonRun {
        scenario_name: scenario.name.clone(),
        model,
        component,
        dt: scenario.timing.dt_s,
        rows,
        euler,
        rk2,
        truncated: euler_record.truncated || rk2_record.truncated,
        euler_record,
        rk2_record,
        on_reference,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sim_options_follow_scenario() {
        let mut scenario = Scenario::default();
        scenario.timing.max_steps = Some(12);
        scenario.output.record_every = 3;
        let opts = sim_options(&scenario, IntegratorType::Euler);
        assert_eq!(opts.dt, 0.01);
        assert_eq!(opts.t_end, 3.0);
        assert_eq!(opts.max_steps, 12);
        assert_eq!(opts.record_every, 3);
        assert_eq!(opts.integrator, IntegratorType::Euler);
    }

    #[test]
    fn bundled_defaults_start_on_reference() {
        let scenario = Scenario::default();
        let model = spring_mass(&scenario.oscillator).unwrap();
        assert!(starts_on_reference(&model, &scenario, 0).unwrap());
        assert!(!starts_on_reference(&model, &scenario, 1).unwrap());
    }

    #[test]
    fn stiffer_spring_with_default_rate_is_off_reference() {
        // k = 400 starts the reference at v0 = -A w = -0.5, not -1
        let mut scenario = Scenario::default();
        scenario.oscillator.spring_constant_n_per_m = 400.0;
        let run = run_comparison(&scenario).unwrap();
        assert!(!run.on_reference);

        let reference = run.model.reference_initial_state().unwrap();
        scenario.initial.rate = reference.rate;
        assert!(run_comparison(&scenario).unwrap().on_reference);
    }

    #[test]
    fn step_limit_marks_comparison_truncated() {
        let mut scenario = Scenario::default();
        scenario.timing.max_steps = Some(10);
        let run = run_comparison(&scenario).unwrap();
        assert!(run.truncated);
        assert_eq!(run.rows.len(), 11);
        assert!(!run_comparison(&Scenario::default()).unwrap().truncated);
    }

    #[test]
    fn overdamped_scenario_rejected() {
        let mut scenario = Scenario::default();
        scenario.oscillator.damping_n_s_per_m = 25.0;
        assert!(matches!(
            run_comparison(&scenario),
            Err(AppError::Model(_))
        ));
    }

    #[test]
    fn invalid_scenario_rejected() {
        let mut scenario = Scenario::default();
        scenario.timing.dt_s = 0.0;
        assert!(matches!(
            run_single(&scenario, IntegratorType::Rk2),
            Err(AppError::Project(_))
        ));
    }
}
