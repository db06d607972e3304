// tests/engine_test.rs
use sde_explorer::{solve, solve_seeded, ParameterSet, SdeError};

fn gbm_params() -> ParameterSet {
    ParameterSet {
        mu: 0.05,
        sigma: 0.2,
        theta: None,
        x0: 100.0,
        t: 1.0,
        steps: 100,
    }
}

#[test]
fn test_solve_grid_shape() {
    let params = gbm_params();
    let path = solve("gbm", &params).expect("valid configuration");

    assert_eq!(path.time.len(), params.steps + 1);
    assert_eq!(path.values.len(), params.steps + 1);
    assert_eq!(path.values[0], params.x0);
    assert_eq!(path.time[0], 0.0);

    // time must be the arithmetic sequence 0, dt, 2dt, ..., T
    let dt = params.t / params.steps as f64;
    for (i, t) in path.time.iter().enumerate() {
        assert!(
            (t - i as f64 * dt).abs() < 1e-12,
            "time[{}] = {} is off the grid",
            i,
            t
        );
    }
    assert!((path.time[params.steps] - params.t).abs() < 1e-12);
    assert!(path.values.iter().all(|v| v.is_finite()));
}

#[test]
fn test_seeded_determinism() {
    let params = gbm_params();

    let a = solve_seeded("gbm", &params, 987).expect("valid configuration");
    let b = solve_seeded("gbm", &params, 987).expect("valid configuration");
    assert_eq!(a.values, b.values, "identical seeds must give bit-identical paths");
    assert_eq!(a.time, b.time);

    let c = solve_seeded("gbm", &params, 988).expect("valid configuration");
    assert_ne!(a.values, c.values, "different seeds should diverge");
}

#[test]
fn test_ou_without_theta_is_invalid() {
    let params = ParameterSet {
        mu: 0.0,
        sigma: 1.0,
        theta: None,
        x0: 1.0,
        t: 1.0,
        steps: 100,
    };
    match solve("ou", &params) {
        Err(SdeError::InvalidParameter { parameter, .. }) => assert_eq!(parameter, "theta"),
        other => panic!("expected InvalidParameter for missing theta, got {:?}", other),
    }
}

#[test]
fn test_unknown_tag_is_unsupported() {
    match solve("unknown", &gbm_params()) {
        Err(SdeError::UnsupportedModel { tag }) => assert_eq!(tag, "unknown"),
        other => panic!("expected UnsupportedModel, got {:?}", other),
    }
}

#[test]
fn test_invalid_fields_rejected_before_simulation() {
    let mut params = gbm_params();
    params.t = -1.0;
    assert!(matches!(
        solve("gbm", &params),
        Err(SdeError::InvalidParameter { .. })
    ));

    let mut params = gbm_params();
    params.steps = 0;
    assert!(solve("gbm", &params).is_err());

    let mut params = gbm_params();
    params.sigma = -0.2;
    assert!(solve("gbm", &params).is_err());

    let mut params = gbm_params();
    params.x0 = f64::INFINITY;
    assert!(solve("gbm", &params).is_err());
}

#[test]
fn test_ou_pulls_toward_long_run_mean() {
    // With strong reversion and small noise, the terminal mean over seeds
    // should sit near mu + (X0 - mu) * exp(-theta * T).
    let params = ParameterSet {
        mu: 0.05,
        sigma: 0.001,
        theta: Some(2.0),
        x0: 0.50,
        t: 2.0,
        steps: 400,
    };

    let num_runs = 200;
    let mut sum = 0.0;
    for seed in 0..num_runs {
        sum += solve_seeded("ou", &params, seed).expect("valid configuration").terminal_value();
    }
    let simulated_mean = sum / num_runs as f64;
    let exact_mean = params.mu + (params.x0 - params.mu) * (-2.0_f64 * params.t).exp();

    println!("OU simulated mean: {}, exact: {}", simulated_mean, exact_mean);
    assert!(
        (simulated_mean - exact_mean).abs() < 0.01,
        "OU mean off: simulated {} vs exact {}",
        simulated_mean,
        exact_mean
    );
}

#[test]
fn test_gbm_terminal_mean_matches_exponential_growth() {
    // E[X_T] = X0 * exp(mu * T) for GBM.
    let params = ParameterSet {
        mu: 0.1,
        sigma: 0.1,
        theta: None,
        x0: 100.0,
        t: 1.0,
        steps: 200,
    };

    let num_runs = 2_000;
    let mut sum = 0.0;
    for seed in 0..num_runs {
        sum += solve_seeded("gbm", &params, seed).expect("valid configuration").terminal_value();
    }
    let simulated_mean = sum / num_runs as f64;
    let exact_mean = params.x0 * (params.mu * params.t).exp();
    let rel_error = (simulated_mean - exact_mean).abs() / exact_mean;

    println!(
        "GBM simulated mean: {}, exact: {}, rel error: {}",
        simulated_mean, exact_mean, rel_error
    );
    assert!(rel_error < 0.01, "Relative error exceeds 1%: {}", rel_error);
}

#[test]
fn test_all_presets_solve() {
    for preset in &sde_explorer::presets::PRESETS {
        let path = solve_seeded(preset.model_tag, &preset.parameters, 42)
            .unwrap_or_else(|e| panic!("preset '{}' failed: {}", preset.name, e));
        assert_eq!(path.values.len(), preset.parameters.steps + 1);
        assert!(path.values.iter().all(|v| v.is_finite()));
    }
}
