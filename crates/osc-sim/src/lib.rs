//! Fixed-step time integration for second-order systems.
//!
//! Provides:
//! - `State` (value, rate) snapshots over `osc_core::Vector`
//! - `DerivativeFn` capability for the caller-supplied acceleration law
//! - Explicit Euler and two-stage Heun (RK2) integrators
//! - A fixed-step runner that records the trajectory

pub mod derivative;
pub mod error;
pub mod integrator;
pub mod sim;
pub mod state;

// Re-exports for public API
pub use derivative::DerivativeFn;
pub use error::{SimError, SimResult};
pub use integrator::{Euler, Integrator, Rk2};
pub use sim::{IntegratorType, SimOptions, SimRecord, run_sim, run_with, step_count};
pub use state::State;
