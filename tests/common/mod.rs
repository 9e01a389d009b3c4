//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use flowplot_rs::plot::Surface;
use flowplot_rs::{AppConfig, Plotter, Trace};

/// Transition duration used by every test plotter
pub const TRANSITION_MS: f64 = 700.0;

/// A plotter on the standard surface with its first render done at `t = 0`
pub fn rendered_plotter(trace: Trace) -> Plotter {
    let config = AppConfig {
        transition_ms: TRANSITION_MS,
        ..AppConfig::default()
    };
    let mut plotter = Plotter::create(trace, &config, &Surface::standard())
        .expect("standard surface has every anchor");
    plotter.process_events(0.0);
    plotter
}

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}
