use clap::{Parser, Subcommand};
use osc_app::export::{comparison_csv, summary_json, sweep_csv};
use osc_app::{AppResult, ComparisonRun, DeviationSummary, convergence_sweep, run_comparison};
use osc_project::Scenario;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::debug;

#[derive(Parser)]
#[command(name = "osc-cli")]
#[command(about = "Oscillon CLI - Euler vs RK2 on a spring-mass oscillator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct ScenarioArgs {
    /// Scenario file (YAML or JSON); the reference setup is used when omitted
    #[arg(short, long)]
    scenario: Option<PathBuf>,
    /// Time step in seconds (overrides the scenario)
    #[arg(long)]
    dt: Option<f64>,
    /// End time in seconds (overrides the scenario)
    #[arg(long)]
    t_end: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run both integrators and print the trajectory table as CSV
    Run {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Output CSV file path (optional, defaults to the scenario's csv_path, then stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the deviation of each integrator from the analytic reference
    Compare {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convergence study over several step sizes (coarse to fine)
    Sweep {
        #[command(flatten)]
        scenario: ScenarioArgs,
        /// Step sizes in seconds, comma separated
        #[arg(long = "dts", value_delimiter = ',', default_value = "0.02,0.01,0.005,0.0025")]
        dts: Vec<f64>,
        /// Emit the table as CSV
        #[arg(long)]
        csv: bool,
    },
    /// Write the reference scenario to a file
    Init {
        /// Path of the scenario file to create (.yaml, .yml or .json)
        path: PathBuf,
    },
    /// Validate scenario file syntax and values
    Validate {
        /// Path to the scenario file
        path: PathBuf,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { scenario, output } => cmd_run(&scenario, output.as_deref()),
        Commands::Compare { scenario, json } => cmd_compare(&scenario, json),
        Commands::Sweep { scenario, dts, csv } => cmd_sweep(&scenario, &dts, csv),
        Commands::Init { path } => cmd_init(&path),
        Commands::Validate { path } => cmd_validate(&path),
    }
}

fn resolve_scenario(args: &ScenarioArgs) -> AppResult<Scenario> {
    let mut scenario = match &args.scenario {
        Some(path) => osc_project::load(path)?,
        None => Scenario::default(),
    };
    if let Some(dt) = args.dt {
        scenario.timing.dt_s = dt;
    }
    if let Some(t_end) = args.t_end {
        scenario.timing.t_end_s = t_end;
    }
    osc_project::validate_scenario(&scenario).map_err(osc_project::ProjectError::from)?;
    debug!(?scenario, "resolved scenario");
    Ok(scenario)
}

fn cmd_run(args: &ScenarioArgs, output: Option<&Path>) -> AppResult<()> {
    let scenario = resolve_scenario(args)?;
    let started = Instant::now();
    let run = run_comparison(&scenario)?;
    let elapsed = started.elapsed().as_secs_f64();

    let csv = comparison_csv(&run);
    let output = output
        .map(Path::to_path_buf)
        .or_else(|| scenario.output.csv_path.as_ref().map(PathBuf::from));

    if let Some(path) = output {
        std::fs::write(&path, csv)?;
        println!(
            "✓ Exported {} time points to {}",
            run.rows.len(),
            path.display()
        );
        print_summary(&run, elapsed);
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn cmd_compare(args: &ScenarioArgs, json: bool) -> AppResult<()> {
    let scenario = resolve_scenario(args)?;
    let started = Instant::now();
    let run = run_comparison(&scenario)?;
    let elapsed = started.elapsed().as_secs_f64();

    if json {
        println!("{}", summary_json(&run)?);
    } else {
        print_summary(&run, elapsed);
    }
    Ok(())
}

fn cmd_sweep(args: &ScenarioArgs, dts: &[f64], csv: bool) -> AppResult<()> {
    let scenario = resolve_scenario(args)?;
    let points = convergence_sweep(&scenario, dts)?;

    if csv {
        print!("{}", sweep_csv(&points));
        return Ok(());
    }

    println!("Convergence sweep: {}", scenario.name);
    println!(
        "  {:>10}  {:>8}  {:>12}  {:>6}  {:>12}  {:>6}",
        "dt (s)", "steps", "euler max", "order", "rk2 max", "order"
    );
    for p in &points {
        println!(
            "  {:>10.5}  {:>8}  {:>12.4e}  {:>6}  {:>12.4e}  {:>6}",
            p.dt,
            p.steps,
            p.euler_max_abs,
            format_order(p.euler_order),
            p.rk2_max_abs,
            format_order(p.rk2_order)
        );
    }
    Ok(())
}

fn cmd_init(path: &Path) -> AppResult<()> {
    osc_project::save(path, &Scenario::default())?;
    println!("✓ Wrote reference scenario to {}", path.display());
    Ok(())
}

fn cmd_validate(path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", path.display());
    let scenario = osc_project::load(path)?;
    osc_app::run_service::spring_mass(&scenario.oscillator)?;
    println!("✓ Scenario is valid");
    Ok(())
}

fn format_order(order: Option<f64>) -> String {
    order.map(|o| format!("{:.2}", o)).unwrap_or_else(|| "-".to_string())
}

fn print_summary(run: &ComparisonRun, elapsed_s: f64) {
    println!("\nScenario: {}", run.scenario_name);
    println!(
        "  omega = {:.4} rad/s, amplitude = {:.4} m, damping ratio = {:.4}",
        run.model.omega(),
        run.model.amplitude(),
        run.model.damping_ratio()
    );
    println!(
        "  dt = {:.4} s, time points = {}, component = {}",
        run.dt,
        run.rows.len(),
        run.component
    );
    if !run.on_reference {
        println!("  ! initial state is off the analytic reference curve");
    }
    if run.truncated {
        println!("  ! step limit reached before t_end");
    }
    println!("\nDeviation from analytic reference:");
    print_deviation(&run.euler);
    print_deviation(&run.rk2);
    println!("  Elapsed: {:.3}s", elapsed_s);
}

fn print_deviation(summary: &DeviationSummary) {
    println!(
        "  {:<6} max = {:.4e} (t = {:.3} s)  rms = {:.4e}  final = {:.4e}",
        summary.integrator, summary.max_abs, summary.t_at_max, summary.rms, summary.final_abs
    );
}
