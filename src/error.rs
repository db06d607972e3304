// src/error.rs
use crate::params::ParameterSet;
use std::fmt;

/// Custom error types for the sde-explorer library
#[derive(Debug, Clone)]
pub enum SdeError {
    /// Invalid parameter values, detected before any simulation work begins
    InvalidParameter {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Unrecognized model tag at factory selection
    UnsupportedModel { tag: String },

    /// A path's integration produced a non-finite state despite clamping.
    /// Carries the failing step index and the parameters in effect.
    NumericalInstability {
        step: usize,
        model: String,
        parameters: ParameterSet,
    },

    /// Statistics requested over zero paths
    EmptyEnsemble,
}

impl fmt::Display for SdeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SdeError::InvalidParameter {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            SdeError::UnsupportedModel { tag } => {
                write!(
                    f,
                    "Unsupported model tag '{}' (expected one of: gbm, ou, abm)",
                    tag
                )
            }
            SdeError::NumericalInstability {
                step,
                model,
                parameters,
            } => {
                write!(
                    f,
                    "Numerical instability detected at step {} ({}): mu={}, sigma={}, X0={}, T={}, steps={}",
                    step, model, parameters.mu, parameters.sigma, parameters.x0,
                    parameters.t, parameters.steps
                )
            }
            SdeError::EmptyEnsemble => {
                write!(f, "Statistics requested over an empty ensemble (no paths)")
            }
        }
    }
}

impl std::error::Error for SdeError {}

/// Result type alias for sde-explorer operations
pub type SdeResult<T> = Result<T, SdeError>;

/// Validation utilities
pub mod validation {
    use super::{SdeError, SdeResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> SdeResult<()> {
        validate_finite(name, value)?;
        if value <= 0.0 {
            Err(SdeError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> SdeResult<()> {
        validate_finite(name, value)?;
        if value < 0.0 {
            Err(SdeError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> SdeResult<()> {
        if !value.is_finite() {
            Err(SdeError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a probability-like value lies strictly inside (0, 1)
    pub fn validate_unit_interval(name: &str, value: f64) -> SdeResult<()> {
        validate_finite(name, value)?;
        if value <= 0.0 || value >= 1.0 {
            Err(SdeError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must lie strictly between 0 and 1".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate paths count
    pub fn validate_paths(paths: usize) -> SdeResult<()> {
        if paths == 0 {
            Err(SdeError::InvalidParameter {
                parameter: "paths".to_string(),
                value: 0.0,
                constraint: "must be greater than 0".to_string(),
            })
        } else if paths > 1_000_000_000 {
            Err(SdeError::InvalidParameter {
                parameter: "paths".to_string(),
                value: paths as f64,
                constraint: "exceeds maximum allowed (1 billion)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate steps count
    pub fn validate_steps(steps: usize) -> SdeResult<()> {
        if steps == 0 {
            Err(SdeError::InvalidParameter {
                parameter: "steps".to_string(),
                value: 0.0,
                constraint: "must be greater than 0".to_string(),
            })
        } else if steps > 100_000 {
            Err(SdeError::InvalidParameter {
                parameter: "steps".to_string(),
                value: steps as f64,
                constraint: "exceeds maximum allowed (100,000)".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
