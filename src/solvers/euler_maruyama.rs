// src/solvers/euler_maruyama.rs
//! Euler-Maruyama Scheme for SDE Integration
//!
//! # Mathematical Framework
//!
//! For a general SDE:
//! ```text
//! dX_t = a(X_t, t) dt + b(X_t, t) dW_t
//! ```
//!
//! The Euler-Maruyama scheme provides the discretization:
//! ```text
//! X_{n+1} = X_n + a(X_n, t_n) Δt + b(X_n, t_n) ΔW_n
//! ```
//!
//! Where:
//! - `a(x,t)` is the drift coefficient
//! - `b(x,t)` is the diffusion coefficient
//! - `ΔW_n ~ N(0, Δt)` are independent normal increments
//!
//! # Stability Policy
//!
//! Each step's drift contribution and diffusion contribution is clamped
//! independently to `[-C, C]` before the update, so one pathological step
//! cannot push the state out of representable range. If the state is still
//! non-finite after clamping, integration stops with
//! [`SdeError::NumericalInstability`] carrying the failing step index; a path
//! is either fully finite or not returned at all.

use crate::error::{SdeError, SdeResult};
use crate::models::SdeModel;
use crate::params::ParameterSet;
use crate::rng;
use crate::solvers::SdePath;
use rand::{Rng, SeedableRng};

/// Default bound on each step term (drift and diffusion contributions).
pub const DEFAULT_TERM_CLAMP: f64 = 1.0e3;

/// Euler-Maruyama numerical scheme for SDE integration
pub struct EulerMaruyama {
    term_clamp: f64,
}

impl Default for EulerMaruyama {
    fn default() -> Self {
        Self::new()
    }
}

impl EulerMaruyama {
    pub fn new() -> Self {
        EulerMaruyama {
            term_clamp: DEFAULT_TERM_CLAMP,
        }
    }

    /// Override the per-term clamp bound. `f64::INFINITY` disables clamping.
    pub fn with_term_clamp(term_clamp: f64) -> Self {
        EulerMaruyama { term_clamp }
    }

    /// Integrate one path, drawing Wiener increments from `rng`.
    pub fn integrate<R: Rng + ?Sized>(
        &self,
        model: &SdeModel,
        params: &ParameterSet,
        rng: &mut R,
    ) -> SdeResult<SdePath> {
        let dt = params.dt();
        self.run(model, params, |_| rng::wiener_increment(rng, dt))
    }

    /// Integrate one path from pre-generated increments.
    ///
    /// `increments.len()` must equal `params.steps`.
    pub fn integrate_with_increments(
        &self,
        model: &SdeModel,
        params: &ParameterSet,
        increments: &[f64],
    ) -> SdeResult<SdePath> {
        if increments.len() != params.steps {
            return Err(SdeError::InvalidParameter {
                parameter: "increments".to_string(),
                value: increments.len() as f64,
                constraint: format!("must contain exactly {} increments", params.steps),
            });
        }
        self.run(model, params, |i| increments[i])
    }

    fn run<F: FnMut(usize) -> f64>(
        &self,
        model: &SdeModel,
        params: &ParameterSet,
        mut next_dw: F,
    ) -> SdeResult<SdePath> {
        let steps = params.steps;
        let dt = params.dt();

        let mut time = Vec::with_capacity(steps + 1);
        let mut values = Vec::with_capacity(steps + 1);
        time.push(0.0);
        values.push(params.x0);

        let mut x = params.x0;
        for i in 0..steps {
            let t = i as f64 * dt;
            let dw = next_dw(i);

            let drift_term = (model.drift(x, t) * dt).clamp(-self.term_clamp, self.term_clamp);
            let diffusion_term =
                (model.diffusion(x, t) * dw).clamp(-self.term_clamp, self.term_clamp);

            x += drift_term + diffusion_term;
            if !x.is_finite() {
                return Err(SdeError::NumericalInstability {
                    step: i,
                    model: model.name().to_string(),
                    parameters: *params,
                });
            }

            time.push((i + 1) as f64 * dt);
            values.push(x);
        }

        Ok(SdePath {
            time,
            values,
            parameters: *params,
        })
    }
}

/// Generate one sample path for the model selected by `model_tag`.
///
/// Increments come from a fresh entropy-seeded stream; use [`solve_seeded`]
/// when reproducibility matters.
pub fn solve(model_tag: &str, params: &ParameterSet) -> SdeResult<SdePath> {
    let mut rng = rand::rngs::StdRng::from_entropy();
    solve_with_rng(model_tag, params, &mut rng)
}

/// Deterministic variant of [`solve`]: identical seed and parameters produce
/// bit-identical paths.
pub fn solve_seeded(model_tag: &str, params: &ParameterSet, seed: u64) -> SdeResult<SdePath> {
    let mut rng = rng::seed_rng_from_u64(seed);
    solve_with_rng(model_tag, params, &mut rng)
}

fn solve_with_rng<R: Rng + ?Sized>(
    model_tag: &str,
    params: &ParameterSet,
    rng: &mut R,
) -> SdeResult<SdePath> {
    let model = SdeModel::from_tag(model_tag, params)?;
    EulerMaruyama::new().integrate(&model, params, rng)
}
