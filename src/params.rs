// src/params.rs
//! Simulation parameter record shared by every engine entry point.

use crate::error::{validation::*, SdeError, SdeResult};

/// Parameters describing one SDE simulation problem.
///
/// `theta` is only meaningful for mean-reverting models; the model factory
/// rejects an `ou` request without it rather than defaulting the reversion
/// rate silently.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSet {
    /// Drift coefficient μ
    pub mu: f64,
    /// Volatility / diffusion coefficient σ
    pub sigma: f64,
    /// Mean reversion rate θ (Ornstein-Uhlenbeck only)
    pub theta: Option<f64>,
    /// Initial value X₀
    pub x0: f64,
    /// Time horizon T
    pub t: f64,
    /// Number of time steps
    pub steps: usize,
}

impl ParameterSet {
    /// Check the invariants every model shares: finite coefficients,
    /// `T > 0`, `sigma >= 0`, `steps` within the engine's supported range.
    pub fn validate(&self) -> SdeResult<()> {
        validate_finite("mu", self.mu)?;
        validate_non_negative("sigma", self.sigma)?;
        validate_finite("X0", self.x0)?;
        validate_positive("T", self.t)?;
        validate_steps(self.steps)?;
        if let Some(theta) = self.theta {
            validate_finite("theta", theta)?;
        }
        Ok(())
    }

    /// Additional check for mean-reverting models: `theta` must be present
    /// and positive. Returns the reversion rate on success.
    pub fn require_theta(&self) -> SdeResult<f64> {
        match self.theta {
            Some(theta) => {
                validate_positive("theta", theta)?;
                Ok(theta)
            }
            None => Err(SdeError::InvalidParameter {
                parameter: "theta".to_string(),
                value: f64::NAN,
                constraint: "required for mean-reverting models".to_string(),
            }),
        }
    }

    /// Grid spacing `dt = T / steps`.
    pub fn dt(&self) -> f64 {
        self.t / self.steps as f64
    }
}
