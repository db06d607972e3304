// src/presets.rs
//! Named parameter presets for common SDE applications.
//!
//! Pure data: each preset is just a model tag plus a [`ParameterSet`] that
//! feeds the ordinary `solve` / `simulate_ensemble` entry points.

use crate::params::ParameterSet;

/// A ready-made simulation setup with a descriptive name.
#[derive(Debug, Clone, Copy)]
pub struct SdePreset {
    pub name: &'static str,
    pub description: &'static str,
    pub model_tag: &'static str,
    pub category: &'static str,
    pub parameters: ParameterSet,
}

/// All built-in presets, grouped by application domain.
pub const PRESETS: [SdePreset; 9] = [
    SdePreset {
        name: "Stock Price (Bull Market)",
        description: "Geometric Brownian Motion modeling a bullish stock",
        model_tag: "gbm",
        category: "Finance",
        parameters: ParameterSet {
            mu: 0.15,
            sigma: 0.25,
            theta: None,
            x0: 100.0,
            t: 1.0,
            steps: 252,
        },
    },
    SdePreset {
        name: "Stock Price (Bear Market)",
        description: "Geometric Brownian Motion modeling a bearish stock",
        model_tag: "gbm",
        category: "Finance",
        parameters: ParameterSet {
            mu: -0.10,
            sigma: 0.35,
            theta: None,
            x0: 100.0,
            t: 1.0,
            steps: 252,
        },
    },
    SdePreset {
        name: "Cryptocurrency",
        description: "High volatility asset modeling",
        model_tag: "gbm",
        category: "Finance",
        parameters: ParameterSet {
            mu: 0.50,
            sigma: 0.80,
            theta: None,
            x0: 1000.0,
            t: 0.25,
            steps: 90,
        },
    },
    SdePreset {
        name: "Interest Rate (Mean Reverting)",
        description: "Vasicek model for interest rates",
        model_tag: "ou",
        category: "Interest Rates",
        parameters: ParameterSet {
            mu: 0.05,
            sigma: 0.01,
            theta: Some(2.0),
            x0: 0.03,
            t: 5.0,
            steps: 260,
        },
    },
    SdePreset {
        name: "Central Bank Rate",
        description: "Slowly adjusting policy rate",
        model_tag: "ou",
        category: "Interest Rates",
        parameters: ParameterSet {
            mu: 0.02,
            sigma: 0.005,
            theta: Some(0.5),
            x0: 0.025,
            t: 3.0,
            steps: 156,
        },
    },
    SdePreset {
        name: "Particle Diffusion",
        description: "Brownian motion of a particle in fluid",
        model_tag: "abm",
        category: "Physics",
        parameters: ParameterSet {
            mu: 0.0,
            sigma: 1.0,
            theta: None,
            x0: 0.0,
            t: 10.0,
            steps: 1000,
        },
    },
    SdePreset {
        name: "Temperature Fluctuation",
        description: "Room temperature around set point",
        model_tag: "ou",
        category: "Physics",
        parameters: ParameterSet {
            mu: 20.0,
            sigma: 0.5,
            theta: Some(1.0),
            x0: 22.0,
            t: 24.0,
            steps: 288,
        },
    },
    SdePreset {
        name: "Population Growth",
        description: "Stochastic population dynamics",
        model_tag: "gbm",
        category: "Biology",
        parameters: ParameterSet {
            mu: 0.02,
            sigma: 0.10,
            theta: None,
            x0: 1000.0,
            t: 50.0,
            steps: 500,
        },
    },
    SdePreset {
        name: "Drug Concentration",
        description: "Drug elimination with random fluctuations",
        model_tag: "ou",
        category: "Biology",
        parameters: ParameterSet {
            mu: 0.0,
            sigma: 2.0,
            theta: Some(0.3),
            x0: 100.0,
            t: 24.0,
            steps: 96,
        },
    },
];

/// Presets belonging to one category.
pub fn presets_by_category(category: &str) -> Vec<SdePreset> {
    PRESETS
        .iter()
        .filter(|p| p.category == category)
        .copied()
        .collect()
}

/// The distinct categories, in first-appearance order.
pub fn categories() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for preset in &PRESETS {
        if !out.contains(&preset.category) {
            out.push(preset.category);
        }
    }
    out
}
