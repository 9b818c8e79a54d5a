//! osc-app: service layer shared by front ends.
//!
//! Turns a scenario into trajectories and reports:
//! - `run_service`: Euler and RK2 from one initial state, with the analytic reference
//! - `compare`: deviation metrics and observed convergence order
//! - `sweep`: parallel step-size convergence study
//! - `export`: CSV/JSON renderings

pub mod compare;
pub mod error;
pub mod export;
pub mod run_service;
pub mod sweep;

pub use compare::DeviationSummary;
pub use error::{AppError, AppResult};
pub use run_service::{ComparisonRow, ComparisonRun, run_comparison, run_single};
pub use sweep::{SweepPoint, convergence_sweep};
