// src/solvers/mod.rs
pub mod euler_maruyama;

use crate::params::ParameterSet;

/// One simulated sample path on the uniform grid `t_i = i * (T / steps)`.
///
/// Produced by a single integrator run and read-only afterward:
/// `time[0] == 0`, `values[0] == X0`, both sequences have `steps + 1` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct SdePath {
    pub time: Vec<f64>,
    pub values: Vec<f64>,
    pub parameters: ParameterSet,
}

impl SdePath {
    /// Value at the time horizon T.
    pub fn terminal_value(&self) -> f64 {
        self.values[self.values.len() - 1]
    }
}
