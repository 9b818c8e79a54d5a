//! Scenario schema definitions.

use osc_core::{Real, Vector};
use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

/// One oscillator run: physical parameters, initial state and timing.
///
/// Every section has defaults, so an empty document describes the
/// reference setup (1 kg, 100 N/m, released from the origin at -1 m/s,
/// dt = 0.01 s over 3 s).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub oscillator: OscillatorDef,
    #[serde(default)]
    pub initial: InitialStateDef,
    #[serde(default)]
    pub timing: TimingDef,
    #[serde(default)]
    pub output: OutputDef,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            version: LATEST_VERSION,
            name: default_name(),
            oscillator: OscillatorDef::default(),
            initial: InitialStateDef::default(),
            timing: TimingDef::default(),
            output: OutputDef::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OscillatorDef {
    #[serde(default = "default_mass")]
    pub mass_kg: Real,
    #[serde(default = "default_spring_constant")]
    pub spring_constant_n_per_m: Real,
    #[serde(default)]
    pub damping_n_s_per_m: Real,
    #[serde(default = "default_amplitude_factor")]
    pub amplitude_factor_m_per_s2: Real,
}

impl Default for OscillatorDef {
    fn default() -> Self {
        Self {
            mass_kg: default_mass(),
            spring_constant_n_per_m: default_spring_constant(),
            damping_n_s_per_m: 0.0,
            amplitude_factor_m_per_s2: default_amplitude_factor(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitialStateDef {
    #[serde(default = "default_value")]
    pub value: Vector,
    #[serde(default = "default_rate")]
    pub rate: Vector,
}

impl Default for InitialStateDef {
    fn default() -> Self {
        Self {
            value: default_value(),
            rate: default_rate(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimingDef {
    #[serde(default = "default_dt")]
    pub dt_s: Real,
    #[serde(default = "default_t_end")]
    pub t_end_s: Real,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,
}

impl Default for TimingDef {
    fn default() -> Self {
        Self {
            dt_s: default_dt(),
            t_end_s: default_t_end(),
            max_steps: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputDef {
    #[serde(default = "default_record_every")]
    pub record_every: usize,
    /// Position component reported against the analytic reference.
    #[serde(default)]
    pub component: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv_path: Option<String>,
}

impl Default for OutputDef {
    fn default() -> Self {
        Self {
            record_every: default_record_every(),
            component: 0,
            csv_path: None,
        }
    }
}

fn default_version() -> u32 {
    LATEST_VERSION
}

fn default_name() -> String {
    "Spring-mass oscillator".to_string()
}

fn default_mass() -> Real {
    1.0
}

fn default_spring_constant() -> Real {
    100.0
}

fn default_amplitude_factor() -> Real {
    10.0
}

fn default_value() -> Vector {
    Vector::scalar(0.0)
}

fn default_rate() -> Vector {
    Vector::scalar(-1.0)
}

fn default_dt() -> Real {
    0.01
}

fn default_t_end() -> Real {
    3.0
}

fn default_record_every() -> usize {
    1
}
