// src/mc/ensemble.rs
//! Parallel Monte Carlo ensemble runner.
//!
//! Path computations are embarrassingly parallel: each path owns its working
//! state and its own seeded random stream, so the rayon workers share nothing
//! mutable. The only synchronization points are the progress counter and the
//! final collection handed to the statistics aggregator.
//!
//! Cancellation is cooperative and granular at path boundaries: a path that
//! has started integrating runs to completion, and a cancelled run returns
//! the partial ensemble with `cancelled` set rather than truncating silently.

use crate::error::{validation::*, SdeResult};
use crate::models::SdeModel;
use crate::params::ParameterSet;
use crate::rng::RngFactory;
use crate::solvers::euler_maruyama::{EulerMaruyama, DEFAULT_TERM_CLAMP};
use crate::solvers::SdePath;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// What to do when a single path inside the ensemble hits numerical
/// instability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstabilityPolicy {
    /// Fail the whole ensemble with the first path's error.
    Abort,
    /// Drop the failing path, continue, and report the count in
    /// [`Ensemble::dropped_paths`].
    DropPath,
}

/// Configuration for one ensemble run.
#[derive(Debug, Clone)]
pub struct EnsembleConfig {
    /// Number of independent paths N
    pub paths: usize,
    /// Base seed; path i draws from stream `seed + i`
    pub seed: u64,
    /// Per-path instability handling
    pub instability_policy: InstabilityPolicy,
    /// Step-term clamp forwarded to the integrator
    pub term_clamp: f64,
    /// Progress callback granularity (paths per report)
    pub progress_batch: usize,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        EnsembleConfig {
            paths: 1_000,
            seed: 12345,
            instability_policy: InstabilityPolicy::Abort,
            term_clamp: DEFAULT_TERM_CLAMP,
            progress_batch: 16,
        }
    }
}

/// Cooperative cancellation flag, checked between path computations.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; paths not yet started will be skipped.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// An ordered collection of independently simulated paths sharing one time
/// grid and parameter set.
#[derive(Debug, Clone)]
pub struct Ensemble {
    pub paths: Vec<SdePath>,
    /// Paths discarded under [`InstabilityPolicy::DropPath`]
    pub dropped_paths: usize,
    /// Whether the run was cut short by a [`CancelToken`]
    pub cancelled: bool,
}

/// Simulate an ensemble of `config.paths` independent paths on the rayon
/// worker pool.
///
/// `progress` is invoked with monotonically increasing values in `(0, 1]`,
/// batched every `config.progress_batch` completed paths, and reaches exactly
/// `1.0` when an uncancelled run finishes. `cancel` is polled at each path
/// start.
pub fn simulate_ensemble(
    model_tag: &str,
    params: &ParameterSet,
    config: &EnsembleConfig,
    progress: Option<&(dyn Fn(f64) + Sync)>,
    cancel: Option<&CancelToken>,
) -> SdeResult<Ensemble> {
    let model = SdeModel::from_tag(model_tag, params)?;
    validate_paths(config.paths)?;

    let n = config.paths;
    let batch = config.progress_batch.max(1);
    let solver = EulerMaruyama::with_term_clamp(config.term_clamp);
    let factory = RngFactory::new(config.seed);

    let completed = AtomicUsize::new(0);
    // Reports go through one lock so observed progress is strictly increasing
    // regardless of worker interleaving.
    let last_reported = Mutex::new(0.0_f64);
    let report = |done: usize| {
        if let Some(cb) = progress {
            if done % batch == 0 || done == n {
                let fraction = done as f64 / n as f64;
                if let Ok(mut last) = last_reported.lock() {
                    if fraction > *last {
                        *last = fraction;
                        cb(fraction);
                    }
                }
            }
        }
    };

    // None marks a path skipped due to cancellation.
    let results: Vec<Option<SdeResult<SdePath>>> = (0..n)
        .into_par_iter()
        .map(|i| {
            if cancel.map_or(false, CancelToken::is_cancelled) {
                return None;
            }
            let mut rng = factory.path_rng(i as u64);
            let result = solver.integrate(&model, params, &mut rng);
            let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
            report(done);
            Some(result)
        })
        .collect();

    let mut paths = Vec::with_capacity(n);
    let mut dropped_paths = 0;
    let mut cancelled = false;
    for result in results {
        match result {
            None => cancelled = true,
            Some(Ok(path)) => paths.push(path),
            Some(Err(err)) => match config.instability_policy {
                InstabilityPolicy::Abort => return Err(err),
                InstabilityPolicy::DropPath => dropped_paths += 1,
            },
        }
    }

    Ok(Ensemble {
        paths,
        dropped_paths,
        cancelled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdeError;

    fn gbm_params() -> ParameterSet {
        ParameterSet {
            mu: 0.05,
            sigma: 0.2,
            theta: None,
            x0: 100.0,
            t: 1.0,
            steps: 50,
        }
    }

    #[test]
    fn test_ensemble_shape_and_independence() {
        let config = EnsembleConfig {
            paths: 64,
            seed: 42,
            ..Default::default()
        };
        let ensemble = simulate_ensemble("gbm", &gbm_params(), &config, None, None).unwrap();

        assert_eq!(ensemble.paths.len(), 64);
        assert_eq!(ensemble.dropped_paths, 0);
        assert!(!ensemble.cancelled);
        for path in &ensemble.paths {
            assert_eq!(path.values.len(), 51);
            assert_eq!(path.time, ensemble.paths[0].time);
        }
        // Independent streams: paths must differ.
        assert_ne!(ensemble.paths[0].values, ensemble.paths[1].values);
    }

    #[test]
    fn test_reproducible_across_runs() {
        let config = EnsembleConfig {
            paths: 16,
            seed: 7,
            ..Default::default()
        };
        let a = simulate_ensemble("gbm", &gbm_params(), &config, None, None).unwrap();
        let b = simulate_ensemble("gbm", &gbm_params(), &config, None, None).unwrap();

        for (pa, pb) in a.paths.iter().zip(&b.paths) {
            assert_eq!(pa.values, pb.values);
        }
    }

    #[test]
    fn test_progress_monotone_and_complete() {
        let config = EnsembleConfig {
            paths: 100,
            seed: 1,
            progress_batch: 8,
            ..Default::default()
        };
        let seen = Mutex::new(Vec::new());
        let cb = |fraction: f64| {
            if let Ok(mut v) = seen.lock() {
                v.push(fraction);
            }
        };
        simulate_ensemble("gbm", &gbm_params(), &config, Some(&cb), None).unwrap();

        let seen = seen.into_inner().unwrap();
        assert!(!seen.is_empty());
        for pair in seen.windows(2) {
            assert!(pair[0] < pair[1], "progress not monotone: {:?}", seen);
        }
        assert_eq!(*seen.last().unwrap(), 1.0);
    }

    #[test]
    fn test_cancellation_returns_flagged_partial() {
        let token = CancelToken::new();
        token.cancel();

        let config = EnsembleConfig {
            paths: 32,
            seed: 2,
            ..Default::default()
        };
        let ensemble =
            simulate_ensemble("gbm", &gbm_params(), &config, None, Some(&token)).unwrap();

        assert!(ensemble.cancelled);
        assert!(ensemble.paths.is_empty());
    }

    fn explosive_params() -> ParameterSet {
        ParameterSet {
            mu: 1.0e308,
            sigma: 0.0,
            theta: None,
            x0: 1.0e308,
            t: 1.0,
            steps: 5,
        }
    }

    #[test]
    fn test_instability_abort_policy() {
        let config = EnsembleConfig {
            paths: 8,
            seed: 3,
            instability_policy: InstabilityPolicy::Abort,
            term_clamp: f64::INFINITY,
            ..Default::default()
        };
        let err = simulate_ensemble("gbm", &explosive_params(), &config, None, None).unwrap_err();
        assert!(matches!(err, SdeError::NumericalInstability { .. }));
    }

    #[test]
    fn test_instability_drop_policy_reports_count() {
        let config = EnsembleConfig {
            paths: 8,
            seed: 3,
            instability_policy: InstabilityPolicy::DropPath,
            term_clamp: f64::INFINITY,
            ..Default::default()
        };
        let ensemble = simulate_ensemble("gbm", &explosive_params(), &config, None, None).unwrap();
        assert_eq!(ensemble.dropped_paths, 8);
        assert!(ensemble.paths.is_empty());
    }

    #[test]
    fn test_zero_paths_rejected() {
        let config = EnsembleConfig {
            paths: 0,
            ..Default::default()
        };
        assert!(simulate_ensemble("gbm", &gbm_params(), &config, None, None).is_err());
    }
}
