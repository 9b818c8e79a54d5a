//! Error types for the osc-app service layer.

/// Application error type that wraps errors from the backend crates
/// and provides a unified error interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Scenario error: {0}")]
    Project(String),

    #[error("Model error: {0}")]
    Model(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for osc-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<osc_project::ProjectError> for AppError {
    fn from(err: osc_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<osc_model::ModelError> for AppError {
    fn from(err: osc_model::ModelError) -> Self {
        AppError::Model(err.to_string())
    }
}

impl From<osc_sim::SimError> for AppError {
    fn from(err: osc_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<osc_core::OscError> for AppError {
    fn from(err: osc_core::OscError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
