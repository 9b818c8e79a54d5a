//! Scenario validation logic.

use crate::schema::{LATEST_VERSION, Scenario};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Dimension mismatch: initial value has {value} components, rate has {rate}")]
    DimensionMismatch { value: usize, rate: usize },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version == 0 || scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }

    let osc = &scenario.oscillator;
    require_positive("oscillator.mass_kg", osc.mass_kg)?;
    require_positive(
        "oscillator.spring_constant_n_per_m",
        osc.spring_constant_n_per_m,
    )?;
    if !(osc.damping_n_s_per_m.is_finite() && osc.damping_n_s_per_m >= 0.0) {
        return Err(invalid(
            "oscillator.damping_n_s_per_m",
            osc.damping_n_s_per_m,
            "must be finite and non-negative",
        ));
    }
    if !osc.amplitude_factor_m_per_s2.is_finite() {
        return Err(invalid(
            "oscillator.amplitude_factor_m_per_s2",
            osc.amplitude_factor_m_per_s2,
            "must be finite",
        ));
    }

    let initial = &scenario.initial;
    if initial.value.dim() != initial.rate.dim() {
        return Err(ValidationError::DimensionMismatch {
            value: initial.value.dim(),
            rate: initial.rate.dim(),
        });
    }

    let timing = &scenario.timing;
    require_positive("timing.dt_s", timing.dt_s)?;
    if !(timing.t_end_s.is_finite() && timing.t_end_s >= 0.0) {
        return Err(invalid(
            "timing.t_end_s",
            timing.t_end_s,
            "must be finite and non-negative",
        ));
    }
    if timing.max_steps == Some(0) {
        return Err(invalid("timing.max_steps", 0, "must be positive"));
    }

    let output = &scenario.output;
    if output.record_every == 0 {
        return Err(invalid("output.record_every", 0, "must be positive"));
    }
    if output.component >= initial.value.dim() {
        return Err(invalid(
            "output.component",
            output.component,
            "must index a component of the initial state",
        ));
    }

    Ok(())
}

fn require_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite and positive"))
    }
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
