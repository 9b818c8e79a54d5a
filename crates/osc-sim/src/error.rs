//! Error types for simulation operations.

use osc_core::OscError;
use thiserror::Error;

/// Errors encountered while stepping or running a simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Vector arithmetic failed (empty vector or dimension mismatch).
    #[error(transparent)]
    Vector(#[from] OscError),

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

pub type SimResult<T> = Result<T, SimError>;
