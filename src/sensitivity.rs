// src/sensitivity.rs
//! Parameter sensitivity analysis.
//!
//! The 1-D sweep perturbs one parameter over a candidate list and summarizes
//! the terminal-value distribution of a mini-ensemble per candidate. The 2-D
//! sweep varies two parameters over a grid of cells. Both modes take their
//! ensemble sizes from [`SensitivityConfig`] so the sampling semantics are
//! explicit rather than baked in; the defaults are 20 paths per candidate and
//! a single path per grid cell.

use crate::error::{SdeError, SdeResult};
use crate::models::SdeModel;
use crate::params::ParameterSet;
use crate::rng::RngFactory;
use crate::solvers::euler_maruyama::EulerMaruyama;
use crate::solvers::SdePath;
use rayon::prelude::*;

/// The parameters a sweep may vary. `steps` is deliberately absent: its
/// integer semantics do not fit a float candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepParameter {
    Mu,
    Sigma,
    Theta,
    X0,
    /// The time horizon T
    Horizon,
}

impl SweepParameter {
    /// Resolve a parameter name from the string-facing boundary.
    pub fn from_name(name: &str) -> SdeResult<SweepParameter> {
        match name {
            "mu" => Ok(SweepParameter::Mu),
            "sigma" => Ok(SweepParameter::Sigma),
            "theta" => Ok(SweepParameter::Theta),
            "X0" | "x0" => Ok(SweepParameter::X0),
            "T" | "t" => Ok(SweepParameter::Horizon),
            _ => Err(SdeError::InvalidParameter {
                parameter: name.to_string(),
                value: f64::NAN,
                constraint: "not a sweepable parameter (mu, sigma, theta, X0, T)".to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SweepParameter::Mu => "mu",
            SweepParameter::Sigma => "sigma",
            SweepParameter::Theta => "theta",
            SweepParameter::X0 => "X0",
            SweepParameter::Horizon => "T",
        }
    }

    /// A copy of `base` with this parameter replaced by `value`.
    fn apply(&self, base: &ParameterSet, value: f64) -> ParameterSet {
        let mut params = *base;
        match self {
            SweepParameter::Mu => params.mu = value,
            SweepParameter::Sigma => params.sigma = value,
            SweepParameter::Theta => params.theta = Some(value),
            SweepParameter::X0 => params.x0 = value,
            SweepParameter::Horizon => params.t = value,
        }
        params
    }
}

/// Sampling sizes for the two sweep modes.
#[derive(Debug, Clone)]
pub struct SensitivityConfig {
    /// Paths per candidate value in the 1-D sweep
    pub ensemble_size: usize,
    /// Paths per cell in the 2-D sweep
    pub grid_ensemble_size: usize,
    /// Base seed for the per-path streams
    pub seed: u64,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        SensitivityConfig {
            ensemble_size: 20,
            grid_ensemble_size: 1,
            seed: 12345,
        }
    }
}

/// Terminal-value summary for one tested candidate value.
#[derive(Debug, Clone)]
pub struct SensitivityPoint {
    /// The candidate value substituted into the base parameters
    pub value: f64,
    /// Terminal value of each mini-ensemble path
    pub final_values: Vec<f64>,
    pub mean_final_value: f64,
    /// Population standard deviation of the terminal values
    pub std_final_value: f64,
}

/// Result of a 1-D sweep: one point per candidate, plus the unperturbed
/// base-case path for reference.
#[derive(Debug, Clone)]
pub struct SensitivityAnalysis {
    pub parameter: SweepParameter,
    pub base_case: SdePath,
    pub points: Vec<SensitivityPoint>,
}

/// Result of a 2-D sweep: mean terminal value per grid cell.
/// `terminal_values[i][j]` corresponds to `row_values[i]` x `col_values[j]`.
#[derive(Debug, Clone)]
pub struct ParameterGrid {
    pub row_parameter: SweepParameter,
    pub col_parameter: SweepParameter,
    pub row_values: Vec<f64>,
    pub col_values: Vec<f64>,
    pub terminal_values: Vec<Vec<f64>>,
}

/// Sweep one parameter over `candidates`, running a fresh mini-ensemble per
/// candidate value.
///
/// Perturbed parameter sets are re-validated through the model factory, so a
/// candidate that leaves the valid region (say a negative `sigma`) surfaces
/// as [`SdeError::InvalidParameter`] instead of simulating garbage.
pub fn analyze_sensitivity(
    model_tag: &str,
    base_params: &ParameterSet,
    parameter: SweepParameter,
    candidates: &[f64],
    config: &SensitivityConfig,
) -> SdeResult<SensitivityAnalysis> {
    let base_model = SdeModel::from_tag(model_tag, base_params)?;
    let solver = EulerMaruyama::new();
    let factory = RngFactory::new(config.seed);

    let mut base_rng = factory.path_rng(0);
    let base_case = solver.integrate(&base_model, base_params, &mut base_rng)?;

    let runs = config.ensemble_size.max(1);
    let points: Vec<SensitivityPoint> = candidates
        .par_iter()
        .enumerate()
        .map(|(ci, &value)| {
            let params = parameter.apply(base_params, value);
            let model = SdeModel::from_tag(model_tag, &params)?;

            let mut final_values = Vec::with_capacity(runs);
            for pi in 0..runs {
                // Disjoint stream ids across the whole sweep; offset past the
                // base-case stream.
                let stream = 1 + (ci * runs + pi) as u64;
                let mut rng = factory.path_rng(stream);
                let path = solver.integrate(&model, &params, &mut rng)?;
                final_values.push(path.terminal_value());
            }

            let mean = final_values.iter().sum::<f64>() / runs as f64;
            let variance =
                final_values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / runs as f64;

            Ok(SensitivityPoint {
                value,
                final_values,
                mean_final_value: mean,
                std_final_value: variance.sqrt(),
            })
        })
        .collect::<SdeResult<Vec<_>>>()?;

    Ok(SensitivityAnalysis {
        parameter,
        base_case,
        points,
    })
}

/// Sweep two parameters over independent value lists, producing the mean
/// terminal value per `(row, col)` cell from `config.grid_ensemble_size`
/// paths (a single path by default).
pub fn parameter_sweep_2d(
    model_tag: &str,
    base_params: &ParameterSet,
    row_parameter: SweepParameter,
    row_values: &[f64],
    col_parameter: SweepParameter,
    col_values: &[f64],
    config: &SensitivityConfig,
) -> SdeResult<ParameterGrid> {
    // Validate the base before fanning out over the grid.
    SdeModel::from_tag(model_tag, base_params)?;
    let solver = EulerMaruyama::new();
    let factory = RngFactory::new(config.seed);
    let runs = config.grid_ensemble_size.max(1);
    let cols = col_values.len();

    let terminal_values: Vec<Vec<f64>> = row_values
        .par_iter()
        .enumerate()
        .map(|(i, &row_value)| {
            let mut row = Vec::with_capacity(cols);
            for (j, &col_value) in col_values.iter().enumerate() {
                let params =
                    col_parameter.apply(&row_parameter.apply(base_params, row_value), col_value);
                let model = SdeModel::from_tag(model_tag, &params)?;

                let mut sum = 0.0;
                for pi in 0..runs {
                    let stream = ((i * cols + j) * runs + pi) as u64;
                    let mut rng = factory.path_rng(stream);
                    sum += solver.integrate(&model, &params, &mut rng)?.terminal_value();
                }
                row.push(sum / runs as f64);
            }
            Ok(row)
        })
        .collect::<SdeResult<Vec<_>>>()?;

    Ok(ParameterGrid {
        row_parameter,
        col_parameter,
        row_values: row_values.to_vec(),
        col_values: col_values.to_vec(),
        terminal_values,
    })
}
