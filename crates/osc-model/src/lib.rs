//! Physical models driven by the oscillon integrators.
//!
//! Provides:
//! - `SpringMass`: linear (optionally damped) spring-mass acceleration law
//! - closed-form analytic reference for the underdamped case

pub mod error;
pub mod spring_mass;

pub use error::{ModelError, ModelResult};
pub use spring_mass::{DEFAULT_AMPLITUDE_FACTOR, SpringMass};
