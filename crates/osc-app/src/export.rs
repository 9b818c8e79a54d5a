//! CSV and JSON renderings of comparison runs and sweeps.

use serde::Serialize;

use crate::compare::DeviationSummary;
use crate::error::AppResult;
use crate::run_service::ComparisonRun;
use crate::sweep::SweepPoint;

pub const COMPARISON_HEADER: &str = "time_s,analytic,euler,rk2";

/// One line per recorded instant: time, analytic reference, Euler, RK2.
pub fn comparison_csv(run: &ComparisonRun) -> String {
    let mut csv = String::from(COMPARISON_HEADER);
    csv.push('\n');
    for row in &run.rows {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            row.t, row.analytic, row.euler, row.rk2
        ));
    }
    csv
}

pub fn sweep_csv(points: &[SweepPoint]) -> String {
    let mut csv = String::from("dt_s,steps,euler_max_abs,rk2_max_abs,euler_order,rk2_order\n");
    for p in points {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            p.dt,
            p.steps,
            p.euler_max_abs,
            p.rk2_max_abs,
            p.euler_order.map(|o| o.to_string()).unwrap_or_default(),
            p.rk2_order.map(|o| o.to_string()).unwrap_or_default(),
        ));
    }
    csv
}

#[derive(Serialize)]
struct SummaryDoc<'a> {
    scenario: &'a str,
    dt: f64,
    omega: f64,
    amplitude: f64,
    on_reference: bool,
    truncated: bool,
    euler: &'a DeviationSummary,
    rk2: &'a DeviationSummary,
}

pub fn summary_json(run: &ComparisonRun) -> AppResult<String> {
    let doc = SummaryDoc {
        scenario: &run.scenario_name,
        dt: run.dt,
        omega: run.model.omega(),
        amplitude: run.model.amplitude(),
        on_reference: run.on_reference,
        truncated: run.truncated,
        euler: &run.euler,
        rk2: &run.rk2,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}
