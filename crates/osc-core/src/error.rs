use thiserror::Error;

pub type OscResult<T> = Result<T, OscError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OscError {
    #[error("Invalid dimension: a vector needs at least one component")]
    InvalidDimension,

    #[error("Dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}
