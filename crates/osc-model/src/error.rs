//! Error types for model parameters.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid parameter {what}: {value}")]
    InvalidParameter { what: &'static str, value: f64 },

    #[error("Not underdamped: damping ratio {ratio} must be below 1")]
    NotUnderdamped { ratio: f64 },
}

pub type ModelResult<T> = Result<T, ModelError>;
