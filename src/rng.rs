// src/rng.rs
//! Random Increment Sampling for Monte Carlo Simulations
//!
//! # Design Philosophy
//!
//! Monte Carlo ensembles need random increments with specific properties:
//! 1. **Reproducibility**: Same seed → same results (critical for debugging/validation)
//! 2. **Parallel safety**: Different workers must have independent streams
//! 3. **No ambient state**: every sampling call takes an explicit `&mut R: Rng`;
//!    there is no process-wide generator anywhere in the crate
//!
//! # Box-Muller Transform
//!
//! Wiener increments are produced from uniform random variables via
//! ```text
//! Z = √(-2 ln(U₁)) * cos(2πU₂)
//! ΔW = Z * √(Δt)
//! ```
//! where U₁, U₂ ~ Uniform(0,1). A draw of U₁ = 0 would feed the logarithm an
//! undefined input, so zero draws are rejected and redrawn.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Factory handing out independent, reproducible per-path random streams.
///
/// Each path id maps to its own `StdRng`, so workers never share mutable
/// generator state and results are identical for any thread count.
pub struct RngFactory {
    base_seed: u64,
}

impl RngFactory {
    pub fn new(base_seed: u64) -> Self {
        Self { base_seed }
    }

    /// Create the random stream for a specific path.
    pub fn path_rng(&self, path_id: u64) -> StdRng {
        StdRng::seed_from_u64(self.base_seed.wrapping_add(path_id))
    }
}

/// Seed a standalone random stream.
pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// One Wiener process increment ΔW ~ N(0, dt).
///
/// Uses the Box-Muller transform on two uniform draws; a uniform draw of
/// exactly 0 is redrawn before it can reach the logarithm.
pub fn wiener_increment<R: Rng + ?Sized>(rng: &mut R, dt: f64) -> f64 {
    let mut u1: f64 = rng.gen();
    while u1 <= 0.0 {
        u1 = rng.gen();
    }
    let u2: f64 = rng.gen();

    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z * dt.sqrt()
}

/// A full step-grid of independent Wiener increments.
pub fn wiener_increments<R: Rng + ?Sized>(rng: &mut R, dt: f64, steps: usize) -> Vec<f64> {
    (0..steps).map(|_| wiener_increment(rng, dt)).collect()
}

/// A cumulative Wiener process path W_0 = 0, W_{i+1} = W_i + ΔW_i
/// over `steps` increments of size `T / steps`.
pub fn wiener_path<R: Rng + ?Sized>(rng: &mut R, t: f64, steps: usize) -> Vec<f64> {
    let dt = t / steps as f64;
    let mut path = Vec::with_capacity(steps + 1);
    path.push(0.0);
    let mut w = 0.0;
    for _ in 0..steps {
        w += wiener_increment(rng, dt);
        path.push(w);
    }
    path
}

/// Raw standard normal draw, for callers that want N(0,1) directly.
pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_rng_reproducibility() {
        let factory = RngFactory::new(42);

        let mut rng1 = factory.path_rng(0);
        let mut rng2 = factory.path_rng(0);

        for _ in 0..100 {
            assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
        }
    }

    #[test]
    fn test_path_rng_independent_streams() {
        let factory = RngFactory::new(42);

        let mut rng1 = factory.path_rng(0);
        let mut rng2 = factory.path_rng(1);

        let vals1: Vec<u64> = (0..10).map(|_| rng1.gen()).collect();
        let vals2: Vec<u64> = (0..10).map(|_| rng2.gen()).collect();

        assert_ne!(vals1, vals2);
    }

    #[test]
    fn test_wiener_increment_moments() {
        let mut rng = seed_rng_from_u64(7);
        let dt = 0.25;

        let samples: Vec<f64> = (0..50_000).map(|_| wiener_increment(&mut rng, dt)).collect();

        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let variance =
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64;

        assert!(mean.abs() < 0.01, "Mean should be close to 0, got {}", mean);
        assert!(
            (variance - dt).abs() < 0.01,
            "Variance should be close to dt = {}, got {}",
            dt,
            variance
        );
    }

    #[test]
    fn test_wiener_increments_are_finite() {
        let mut rng = seed_rng_from_u64(11);
        for dw in wiener_increments(&mut rng, 1e-9, 10_000) {
            assert!(dw.is_finite());
        }
    }

    #[test]
    fn test_wiener_path_shape() {
        let mut rng = seed_rng_from_u64(3);
        let path = wiener_path(&mut rng, 1.0, 100);

        assert_eq!(path.len(), 101);
        assert_eq!(path[0], 0.0);
        assert!(path.iter().all(|w| w.is_finite()));
    }

    #[test]
    fn test_box_muller_matches_library_normal() {
        // Cross-check the Box-Muller sampler against rand_distr's N(0,1).
        let mut rng1 = seed_rng_from_u64(21);
        let mut rng2 = seed_rng_from_u64(22);
        let n = 50_000;

        let var1 = (0..n)
            .map(|_| wiener_increment(&mut rng1, 1.0))
            .map(|z| z * z)
            .sum::<f64>()
            / n as f64;
        let var2 = (0..n)
            .map(|_| get_normal_draw(&mut rng2))
            .map(|z: f64| z * z)
            .sum::<f64>()
            / n as f64;

        assert!((var1 - 1.0).abs() < 0.05, "Box-Muller variance {}", var1);
        assert!((var2 - 1.0).abs() < 0.05, "StandardNormal variance {}", var2);
    }
}
