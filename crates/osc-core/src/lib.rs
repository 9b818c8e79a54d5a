//! osc-core: stable foundation for oscillon.
//!
//! Contains:
//! - vector (immutable fixed-dimension state vector)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod vector;

// Re-exports: nice ergonomics for downstream crates
pub use error::{OscError, OscResult};
pub use numeric::*;
pub use vector::Vector;
