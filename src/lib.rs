//! # sde-explorer: Monte Carlo Simulation for Stochastic Differential Equations
//!
//! A Rust library for numerically solving SDEs of the form
//! `dX = μ(X,t) dt + σ(X,t) dW`, building Monte Carlo ensembles of sample
//! paths, and deriving cross-path statistics and parameter-sensitivity
//! summaries.
//!
//! ## Key Features
//!
//! - **Three process models**: Geometric Brownian Motion, Ornstein-Uhlenbeck,
//!   Arithmetic Brownian Motion, selected by tag through a closed enum
//! - **Euler-Maruyama integration** with an explicit stability contract:
//!   clamped step terms, fail-fast on non-finite states
//! - **Parallel ensembles**: Rayon worker pool with an independent seeded
//!   random stream per path, monotone progress reporting, cooperative
//!   cancellation
//! - **Statistics**: per-time-step mean, population variance, and
//!   interpolated percentile bands; normal-approximation confidence intervals
//! - **Sensitivity analysis**: 1-D parameter sweeps with mini-ensembles and
//!   2-D parameter grids
//!
//! ## Quick Start
//!
//! ```rust
//! use sde_explorer::{simulate_ensemble, calculate_statistics, EnsembleConfig, ParameterSet};
//!
//! let params = ParameterSet {
//!     mu: 0.05,       // 5% annual drift
//!     sigma: 0.2,     // 20% annual volatility
//!     theta: None,
//!     x0: 100.0,      // Starting value
//!     t: 1.0,         // 1 year horizon
//!     steps: 252,     // Daily steps
//! };
//!
//! let config = EnsembleConfig { paths: 1_000, seed: 42, ..Default::default() };
//! let ensemble = simulate_ensemble("gbm", &params, &config, None, None)
//!     .expect("valid configuration");
//! let stats = calculate_statistics(&ensemble).expect("non-empty ensemble");
//! println!("median terminal value: {:.2}", stats.p50[stats.p50.len() - 1]);
//! ```

// Module declarations
pub mod error;
pub mod rng;
pub mod params;
pub mod models;
pub mod solvers;
pub mod mc;
pub mod sensitivity;
pub mod presets;

// Re-export the engine's boundary for convenience
pub use error::{SdeError, SdeResult};
pub use mc::ensemble::{
    simulate_ensemble, CancelToken, Ensemble, EnsembleConfig, InstabilityPolicy,
};
pub use mc::statistics::{
    calculate_statistics, confidence_intervals, ConfidenceBands, StatisticsSummary,
};
pub use models::{SdeModel, MODEL_TAGS};
pub use params::ParameterSet;
pub use sensitivity::{
    analyze_sensitivity, parameter_sweep_2d, ParameterGrid, SensitivityAnalysis,
    SensitivityConfig, SensitivityPoint, SweepParameter,
};
pub use solvers::euler_maruyama::{solve, solve_seeded, EulerMaruyama, DEFAULT_TERM_CLAMP};
pub use solvers::SdePath;
