// src/models.rs
//! SDE process models.
//!
//! Each model supplies the drift μ(X,t) and diffusion σ(X,t) coefficients of
//!
//! ```text
//! dX_t = μ(X_t, t) dt + σ(X_t, t) dW_t
//! ```
//!
//! The set of models is a closed enumeration so that callers can match
//! exhaustively; new processes are added as variants, not subclasses.

use crate::error::{SdeError, SdeResult};
use crate::params::ParameterSet;

/// The model tags accepted by [`SdeModel::from_tag`].
pub const MODEL_TAGS: [&str; 3] = ["gbm", "ou", "abm"];

/// Supported SDE process models, with their coefficients baked in at
/// construction time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SdeModel {
    /// Geometric Brownian Motion: dX = μX dt + σX dW
    Gbm { mu: f64, sigma: f64 },

    /// Ornstein-Uhlenbeck process: dX = θ(μ - X) dt + σ dW
    OrnsteinUhlenbeck { theta: f64, mu: f64, sigma: f64 },

    /// Arithmetic Brownian Motion: dX = μ dt + σ dW
    Abm { mu: f64, sigma: f64 },
}

impl SdeModel {
    /// Build a model from its string tag, validating the parameter set.
    ///
    /// The `ou` tag requires `theta` to be present and positive; this is a
    /// construction-time error so a missing reversion rate is never papered
    /// over with an implicit default. Unknown tags fail with
    /// [`SdeError::UnsupportedModel`].
    pub fn from_tag(tag: &str, params: &ParameterSet) -> SdeResult<SdeModel> {
        params.validate()?;
        match tag {
            "gbm" => Ok(SdeModel::Gbm {
                mu: params.mu,
                sigma: params.sigma,
            }),
            "ou" => {
                let theta = params.require_theta()?;
                Ok(SdeModel::OrnsteinUhlenbeck {
                    theta,
                    mu: params.mu,
                    sigma: params.sigma,
                })
            }
            "abm" => Ok(SdeModel::Abm {
                mu: params.mu,
                sigma: params.sigma,
            }),
            _ => Err(SdeError::UnsupportedModel {
                tag: tag.to_string(),
            }),
        }
    }

    /// Drift coefficient μ(X, t)
    pub fn drift(&self, x: f64, _t: f64) -> f64 {
        match self {
            SdeModel::Gbm { mu, .. } => mu * x,
            SdeModel::OrnsteinUhlenbeck { theta, mu, .. } => theta * (mu - x),
            SdeModel::Abm { mu, .. } => *mu,
        }
    }

    /// Diffusion coefficient σ(X, t)
    pub fn diffusion(&self, x: f64, _t: f64) -> f64 {
        match self {
            SdeModel::Gbm { sigma, .. } => sigma * x,
            SdeModel::OrnsteinUhlenbeck { sigma, .. } => *sigma,
            SdeModel::Abm { sigma, .. } => *sigma,
        }
    }

    /// Human-readable model name for display
    pub fn name(&self) -> &'static str {
        match self {
            SdeModel::Gbm { .. } => "Geometric Brownian Motion",
            SdeModel::OrnsteinUhlenbeck { .. } => "Ornstein-Uhlenbeck Process",
            SdeModel::Abm { .. } => "Arithmetic Brownian Motion",
        }
    }

    /// LaTeX representation of the model equation
    pub fn equation_latex(&self) -> &'static str {
        match self {
            SdeModel::Gbm { .. } => "dX_t = \\mu X_t dt + \\sigma X_t dW_t",
            SdeModel::OrnsteinUhlenbeck { .. } => "dX_t = \\theta(\\mu - X_t) dt + \\sigma dW_t",
            SdeModel::Abm { .. } => "dX_t = \\mu dt + \\sigma dW_t",
        }
    }

    /// The string tag this model is selected by
    pub fn tag(&self) -> &'static str {
        match self {
            SdeModel::Gbm { .. } => "gbm",
            SdeModel::OrnsteinUhlenbeck { .. } => "ou",
            SdeModel::Abm { .. } => "abm",
        }
    }
}
